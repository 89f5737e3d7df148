//! Orders domain module.
//!
//! This crate contains business rules for customer orders, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;
pub mod transition;

pub use order::{Order, OrderLineItem, OrderStatus};
pub use transition::StatusTransition;
