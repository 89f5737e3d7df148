//! The stock ledger: validate, commit, release.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use stockline_core::{OrderId, ProductId};
use stockline_inventory::Availability;
use stockline_orders::OrderLineItem;

use crate::error::LedgerError;
use crate::locks::{ProductLockGuard, ProductLockSet};
use crate::movement::{MovementDirection, MovementLog, StockMovement};
use crate::store::InventoryStore;
use crate::validation::{LineAvailability, ShortfallList, ValidationReport};

/// Before/after summary for one applied inventory delta (observability).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedChange {
    pub product_id: ProductId,
    /// Delta actually applied; for a commit this can be less than the
    /// requested line quantity when clamped at zero.
    pub quantity: i64,
    pub before: i64,
    pub after: i64,
}

/// The sole authority for reading and mutating inventory quantities in
/// response to order events.
///
/// Committed orders correspond 1:1 with deduction movements in the log;
/// released orders 1:1 with restock movements. Both gates are derived per
/// (order, product) by querying the log, never from mutable flags.
#[derive(Debug)]
pub struct StockLedger<I, L> {
    inventory: I,
    log: L,
    locks: ProductLockSet,
}

impl<I, L> StockLedger<I, L> {
    pub fn new(inventory: I, log: L) -> Self {
        Self {
            inventory,
            log,
            locks: ProductLockSet::new(),
        }
    }
}

impl<I, L> StockLedger<I, L>
where
    I: InventoryStore,
    L: MovementLog,
{
    /// Take the per-product critical section for an order's line items.
    ///
    /// Callers hold the guard across `validate` and `commit` so no other
    /// order can deduct from the same products between the check and the
    /// write.
    pub fn guard(&self, items: &[OrderLineItem]) -> Result<ProductLockGuard<'_>, LedgerError> {
        let products = items.iter().map(OrderLineItem::product_id);
        Ok(self.locks.acquire(products)?)
    }

    /// Read-only availability check over every line item.
    ///
    /// A product without an inventory record counts as zero availability (a
    /// warning, not an error by itself). If any line is unsatisfiable, the
    /// error enumerates every failing product with requested vs available so
    /// the caller can resolve the whole order in one round trip.
    pub fn validate(&self, items: &[OrderLineItem]) -> Result<ValidationReport, LedgerError> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let available = match self.inventory.find(item.product_id())? {
                Some(record) => record.quantity(),
                None => {
                    warn!(
                        product_id = %item.product_id(),
                        "no inventory record for ordered product"
                    );
                    0
                }
            };
            lines.push(LineAvailability {
                product_id: item.product_id(),
                requested: item.quantity(),
                available,
            });
        }

        let report = ValidationReport::new(lines);
        if report.is_satisfiable() {
            Ok(report)
        } else {
            Err(LedgerError::InsufficientStock(ShortfallList::from(&report)))
        }
    }

    /// Deduct stock for an order, exactly once per product.
    ///
    /// Products that already hold a deduction movement for this order are
    /// skipped, so retried or duplicate transition events cannot deduct
    /// twice. Deductions clamp at zero: an underflow here indicates a race
    /// past validation, and never going negative wins over failing a
    /// half-applied commit. Per-item store failures are logged and do not
    /// abort the remaining items; the call fails overall if any item failed.
    pub fn commit(
        &self,
        order_id: OrderId,
        items: &[OrderLineItem],
    ) -> Result<Vec<AppliedChange>, LedgerError> {
        let movements = self.log.for_order(order_id)?;
        let already: HashSet<ProductId> = movements
            .iter()
            .filter(|m| m.direction == MovementDirection::Deduction)
            .map(|m| m.product_id)
            .collect();

        let mut changes = Vec::with_capacity(items.len());
        let mut failed = 0usize;

        for item in items {
            if already.contains(&item.product_id()) {
                debug!(
                    %order_id,
                    product_id = %item.product_id(),
                    "deduction already recorded for order, skipping"
                );
                continue;
            }

            match self.deduct_line(order_id, item) {
                Ok(Some(change)) => changes.push(change),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        %order_id,
                        product_id = %item.product_id(),
                        error = %err,
                        "line item deduction failed"
                    );
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(LedgerError::PartialFailure {
                operation: "commit",
                failed,
                total: items.len(),
            });
        }
        Ok(changes)
    }

    fn deduct_line(
        &self,
        order_id: OrderId,
        item: &OrderLineItem,
    ) -> Result<Option<AppliedChange>, LedgerError> {
        let product_id = item.product_id();

        let Some(mut record) = self.inventory.find(product_id)? else {
            warn!(%order_id, %product_id, "no inventory record for ordered product");
            return Ok(None);
        };

        let before = record.quantity();
        let applied = record
            .deduct_clamped(item.quantity())
            .map_err(|e| LedgerError::Invariant(e.to_string()))?;
        if applied < item.quantity() {
            warn!(
                %order_id,
                %product_id,
                requested = item.quantity(),
                applied,
                "deduction clamped at zero"
            );
        }

        let record = self.inventory.update(record)?;
        self.log
            .append(StockMovement::deduction(order_id, product_id, applied))?;

        let after = record.quantity();
        info!(%order_id, %product_id, before, after, "stock committed");
        if record.availability() != Availability::InStock {
            warn!(
                %product_id,
                quantity = after,
                threshold = record.low_stock_threshold(),
                "product at or below low-stock threshold"
            );
        }

        Ok(Some(AppliedChange {
            product_id,
            quantity: applied,
            before,
            after,
        }))
    }

    /// Restore stock previously committed for an order, exactly once.
    ///
    /// The restore amount per product is the outstanding delta recorded in
    /// the log (deducted minus already restocked), so a clamped commit is
    /// released by exactly what it deducted. A never-committed or
    /// already-released order is a silent no-op success.
    pub fn release(&self, order_id: OrderId) -> Result<Vec<AppliedChange>, LedgerError> {
        let movements = self.log.for_order(order_id)?;

        let mut totals: HashMap<ProductId, (i64, i64)> = HashMap::new();
        let mut any_deduction = false;
        for m in &movements {
            let entry = totals.entry(m.product_id).or_insert((0, 0));
            match m.direction {
                MovementDirection::Deduction => {
                    entry.0 += m.quantity;
                    any_deduction = true;
                }
                MovementDirection::Restock => entry.1 += m.quantity,
            }
        }

        if !any_deduction {
            debug!(%order_id, "no committed stock for order, release is a no-op");
            return Ok(vec![]);
        }

        // Deterministic order for logs and summaries.
        let mut products: Vec<_> = totals.into_iter().collect();
        products.sort_by_key(|(p, _)| *p.as_uuid().as_bytes());

        let mut changes = Vec::new();
        let mut failed = 0usize;
        let total = products.len();

        for (product_id, (deducted, restocked)) in products {
            if restocked > deducted {
                error!(
                    %order_id,
                    %product_id,
                    deducted,
                    restocked,
                    "movement log restocked more than was deducted"
                );
                return Err(LedgerError::Invariant(format!(
                    "restocked {restocked} exceeds deducted {deducted} for product {product_id}"
                )));
            }

            let outstanding = deducted - restocked;
            if outstanding == 0 {
                continue;
            }

            match self.restock_line(order_id, product_id, outstanding) {
                Ok(change) => changes.push(change),
                Err(err) => {
                    warn!(
                        %order_id,
                        %product_id,
                        error = %err,
                        "line item restock failed"
                    );
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(LedgerError::PartialFailure {
                operation: "release",
                failed,
                total,
            });
        }
        Ok(changes)
    }

    fn restock_line(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        outstanding: i64,
    ) -> Result<AppliedChange, LedgerError> {
        let Some(mut record) = self.inventory.find(product_id)? else {
            // Records are never deleted by this core; a miss here needs
            // operational follow-up.
            return Err(LedgerError::Invariant(format!(
                "inventory record missing at release for product {product_id}"
            )));
        };

        let before = record.quantity();
        record
            .restock(outstanding)
            .map_err(|e| LedgerError::Invariant(e.to_string()))?;
        let record = self.inventory.update(record)?;
        self.log
            .append(StockMovement::restock(order_id, product_id, outstanding))?;

        let after = record.quantity();
        info!(%order_id, %product_id, before, after, "stock released");

        Ok(AppliedChange {
            product_id,
            quantity: outstanding,
            before,
            after,
        })
    }

    /// Whether a deduction has ever been recorded for this order.
    pub fn has_committed(&self, order_id: OrderId) -> Result<bool, LedgerError> {
        let movements = self.log.for_order(order_id)?;
        Ok(movements
            .iter()
            .any(|m| m.direction == MovementDirection::Deduction))
    }

    /// Whether a restock has ever been recorded for this order.
    pub fn has_released(&self, order_id: OrderId) -> Result<bool, LedgerError> {
        let movements = self.log.for_order(order_id)?;
        Ok(movements
            .iter()
            .any(|m| m.direction == MovementDirection::Restock))
    }
}
