//! Inventory domain module.
//!
//! This crate contains business rules for inventory records, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod record;

pub use record::{Availability, InventoryRecord};
