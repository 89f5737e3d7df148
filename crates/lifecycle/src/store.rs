//! Order storage port consumed by the lifecycle controller.

use std::sync::Arc;

use stockline_core::OrderId;
use stockline_ledger::StoreError;
use stockline_orders::{Order, OrderStatus};

/// Persisted order documents.
///
/// The controller reads the current document on every transition event and
/// writes only the status; line items are immutable once the order exists.
pub trait OrderStore: Send + Sync {
    fn find(&self, order_id: OrderId) -> Result<Option<Order>, StoreError>;

    fn insert(&self, order: Order) -> Result<(), StoreError>;

    /// Persist a status change, returning the updated document.
    /// `None` if the order does not exist.
    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn find(&self, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).find(order_id)
    }

    fn insert(&self, order: Order) -> Result<(), StoreError> {
        (**self).insert(order)
    }

    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        (**self).update_status(order_id, status)
    }
}
