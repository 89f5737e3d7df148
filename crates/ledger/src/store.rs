//! Storage port consumed by the ledger.
//!
//! No storage assumptions are made here: implementations may be in-memory
//! maps (tests/dev) or SQL/NoSQL backends (production). Errors from this
//! layer are transient infrastructure failures, distinct from domain errors.

use std::sync::Arc;

use thiserror::Error;

use stockline_core::ProductId;
use stockline_inventory::InventoryRecord;

/// Storage-layer failure (transient, retryable by the caller).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Persisted mapping from product to its inventory record (1:1 model).
///
/// Implementations must:
/// - key records by `ProductId` (exactly one record per product)
/// - treat `update` as an upsert on the record's product id
/// - never let a partially written record become visible to `find`
pub trait InventoryStore: Send + Sync {
    /// Point read by product id. `None` means no record exists; callers
    /// treat that as zero availability, not as an error.
    fn find(&self, product_id: ProductId) -> Result<Option<InventoryRecord>, StoreError>;

    /// Persist the record (upsert by product id), returning the stored value.
    fn update(&self, record: InventoryRecord) -> Result<InventoryRecord, StoreError>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn find(&self, product_id: ProductId) -> Result<Option<InventoryRecord>, StoreError> {
        (**self).find(product_id)
    }

    fn update(&self, record: InventoryRecord) -> Result<InventoryRecord, StoreError> {
        (**self).update(record)
    }
}
