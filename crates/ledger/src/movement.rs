//! Append-only stock movement records.
//!
//! Every inventory mutation the ledger performs is recorded as a movement
//! keyed by order id. "Already committed" and "already released" are derived
//! by querying this log per (order, product) rather than kept as overwritable
//! flags on the order, so a crash between a deduction and a marker write
//! leaves a queryable trace instead of silent drift. The log doubles as an
//! audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockline_core::{OrderId, ProductId};

use crate::store::StoreError;

/// Direction of a recorded inventory delta.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    /// Stock committed to an order (quantity decremented).
    Deduction,
    /// Committed stock restored on cancellation/refund (quantity incremented).
    Restock,
}

/// One applied inventory delta for one (order, product) pair.
///
/// `quantity` is the delta **actually applied**, which can be smaller than
/// the requested line quantity when a commit clamped at zero. Release uses
/// the recorded quantity, so a clamped commit is restored by exactly what it
/// deducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub movement_id: Uuid,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub direction: MovementDirection,
    pub recorded_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn deduction(order_id: OrderId, product_id: ProductId, quantity: i64) -> Self {
        Self::record(order_id, product_id, quantity, MovementDirection::Deduction)
    }

    pub fn restock(order_id: OrderId, product_id: ProductId, quantity: i64) -> Self {
        Self::record(order_id, product_id, quantity, MovementDirection::Restock)
    }

    fn record(
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
        direction: MovementDirection,
    ) -> Self {
        Self {
            movement_id: Uuid::now_v7(),
            order_id,
            product_id,
            quantity,
            direction,
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only movement log, queryable by order id.
///
/// Implementations must preserve append order within an order's history and
/// never mutate or delete recorded movements.
pub trait MovementLog: Send + Sync {
    fn append(&self, movement: StockMovement) -> Result<(), StoreError>;

    /// All movements recorded for an order, in append order.
    fn for_order(&self, order_id: OrderId) -> Result<Vec<StockMovement>, StoreError>;
}

impl<L> MovementLog for Arc<L>
where
    L: MovementLog + ?Sized,
{
    fn append(&self, movement: StockMovement) -> Result<(), StoreError> {
        (**self).append(movement)
    }

    fn for_order(&self, order_id: OrderId) -> Result<Vec<StockMovement>, StoreError> {
        (**self).for_order(order_id)
    }
}
