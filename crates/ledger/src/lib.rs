//! Stock ledger: the sole authority for reading, reserving, and mutating
//! inventory quantities in response to order events.
//!
//! The ledger exposes three operations to the order lifecycle:
//!
//! - [`StockLedger::validate`]: read-only availability check, enumerating
//!   every shortfall in one pass.
//! - [`StockLedger::commit`]: deduct stock for an order, exactly once per
//!   product, recorded in an append-only movement log.
//! - [`StockLedger::release`]: restore previously committed stock, exactly
//!   once per product, derived from the same log.
//!
//! Committed/released state is derived by querying the movement log rather
//! than stored as overwritable flags, which doubles as an audit trail.

pub mod error;
pub mod ledger;
pub mod locks;
pub mod movement;
pub mod store;
pub mod validation;

pub use error::LedgerError;
pub use ledger::{AppliedChange, StockLedger};
pub use locks::{ProductLockGuard, ProductLockSet};
pub use movement::{MovementDirection, MovementLog, StockMovement};
pub use store::{InventoryStore, StoreError};
pub use validation::{LineAvailability, Shortfall, ShortfallList, ValidationReport};
