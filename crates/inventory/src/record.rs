use serde::{Deserialize, Serialize};

use stockline_core::{DomainError, DomainResult, ProductId};

/// Availability classification derived from quantity vs the low-stock
/// threshold. Informational only; it never gates a commit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
}

/// Persisted inventory record, keyed 1:1 by product.
///
/// `quantity` is the authoritative available count. It is never written to a
/// negative value: deductions clamp at zero, and shortfalls are surfaced by
/// availability validation before a commit reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    product_id: ProductId,
    quantity: i64,
    low_stock_threshold: i64,
}

impl InventoryRecord {
    pub fn new(
        product_id: ProductId,
        quantity: i64,
        low_stock_threshold: i64,
    ) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if low_stock_threshold < 0 {
            return Err(DomainError::validation(
                "low_stock_threshold cannot be negative",
            ));
        }
        Ok(Self {
            product_id,
            quantity,
            low_stock_threshold,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    pub fn availability(&self) -> Availability {
        if self.quantity == 0 {
            Availability::OutOfStock
        } else if self.quantity <= self.low_stock_threshold {
            Availability::LowStock
        } else {
            Availability::InStock
        }
    }

    /// Whether `requested` units can be deducted without clamping.
    pub fn can_satisfy(&self, requested: i64) -> bool {
        requested <= self.quantity
    }

    /// Deduct up to `requested` units, clamping at zero.
    ///
    /// Returns the delta actually applied. An underflow here means a caller
    /// skipped availability validation; the record stays at zero rather than
    /// going negative.
    pub fn deduct_clamped(&mut self, requested: i64) -> DomainResult<i64> {
        if requested <= 0 {
            return Err(DomainError::validation(
                "deduction quantity must be positive",
            ));
        }
        let applied = requested.min(self.quantity);
        self.quantity -= applied;
        Ok(applied)
    }

    /// Add `amount` units back (release of a previously committed deduction).
    pub fn restock(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::validation("restock amount must be positive"));
        }
        self.quantity += amount;
        Ok(())
    }
}
