//! Infrastructure layer: storage adapters for the ledger and lifecycle ports.
//!
//! Currently ships in-memory implementations (tests/dev). SQL-backed
//! adapters would live alongside them, implementing the same port traits.

pub mod in_memory;


pub use in_memory::{InMemoryInventoryStore, InMemoryMovementLog, InMemoryOrderStore};
