//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Lock poisoning is
//! surfaced as `StoreError::Poisoned` rather than panicking.

use std::collections::HashMap;
use std::sync::RwLock;

use stockline_core::{OrderId, ProductId};
use stockline_inventory::InventoryRecord;
use stockline_ledger::{InventoryStore, MovementLog, StockMovement, StoreError};
use stockline_lifecycle::OrderStore;
use stockline_orders::{Order, OrderStatus};

/// In-memory product → inventory record map (1:1 model).
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    records: RwLock<HashMap<ProductId, InventoryRecord>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn find(&self, product_id: ProductId) -> Result<Option<InventoryRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&product_id).cloned())
    }

    fn update(&self, record: InventoryRecord) -> Result<InventoryRecord, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(record.product_id(), record.clone());
        Ok(record)
    }
}

/// In-memory order document store.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn find(&self, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::Poisoned)?;
        Ok(orders.get(&order_id).cloned())
    }

    fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| StoreError::Poisoned)?;
        orders.insert(order.id(), order);
        Ok(())
    }

    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let mut orders = self.orders.write().map_err(|_| StoreError::Poisoned)?;
        Ok(orders.get_mut(&order_id).map(|order| {
            order.set_status(status);
            order.clone()
        }))
    }
}

/// In-memory append-only movement log.
#[derive(Debug, Default)]
pub struct InMemoryMovementLog {
    movements: RwLock<Vec<StockMovement>>,
}

impl InMemoryMovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full log in append order (audit/debugging).
    pub fn all(&self) -> Result<Vec<StockMovement>, StoreError> {
        let movements = self.movements.read().map_err(|_| StoreError::Poisoned)?;
        Ok(movements.clone())
    }
}

impl MovementLog for InMemoryMovementLog {
    fn append(&self, movement: StockMovement) -> Result<(), StoreError> {
        let mut movements = self.movements.write().map_err(|_| StoreError::Poisoned)?;
        movements.push(movement);
        Ok(())
    }

    fn for_order(&self, order_id: OrderId) -> Result<Vec<StockMovement>, StoreError> {
        let movements = self.movements.read().map_err(|_| StoreError::Poisoned)?;
        Ok(movements
            .iter()
            .filter(|m| m.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_update_is_an_upsert() {
        let store = InMemoryInventoryStore::new();
        let product_id = ProductId::new();
        assert!(store.find(product_id).unwrap().is_none());

        let record = InventoryRecord::new(product_id, 5, 2).unwrap();
        store.update(record).unwrap();
        assert_eq!(store.find(product_id).unwrap().unwrap().quantity(), 5);

        let record = InventoryRecord::new(product_id, 9, 2).unwrap();
        store.update(record).unwrap();
        assert_eq!(store.find(product_id).unwrap().unwrap().quantity(), 9);
    }

    #[test]
    fn update_status_on_unknown_order_returns_none() {
        let store = InMemoryOrderStore::new();
        let updated = store
            .update_status(OrderId::new(), OrderStatus::Confirmed)
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn movement_log_filters_by_order() {
        let log = InMemoryMovementLog::new();
        let order_a = OrderId::new();
        let order_b = OrderId::new();
        let product = ProductId::new();

        log.append(StockMovement::deduction(order_a, product, 2))
            .unwrap();
        log.append(StockMovement::deduction(order_b, product, 1))
            .unwrap();
        log.append(StockMovement::restock(order_a, product, 2))
            .unwrap();

        let for_a = log.for_order(order_a).unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|m| m.order_id == order_a));
        assert_eq!(log.all().unwrap().len(), 3);
    }
}
