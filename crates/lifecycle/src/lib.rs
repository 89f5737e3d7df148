//! Order lifecycle: status transitions and their stock side effects.
//!
//! The controller is the only caller of the stock ledger. It detects which
//! edge a status change is on (commit-triggering, release-triggering, or
//! neither) and invokes the ledger at exactly those edges, holding the
//! per-product critical section across validate + status write + commit.

pub mod controller;
pub mod store;

pub use controller::{LifecycleController, StockEffect, TransitionError, TransitionOutcome};
pub use store::OrderStore;
