//! Transition handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use stockline_core::OrderId;
use stockline_ledger::{
    AppliedChange, InventoryStore, LedgerError, MovementLog, StockLedger, StoreError,
};
use stockline_orders::{OrderStatus, StatusTransition};

use crate::store::OrderStore;

/// Failure of a transition request.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Validation or stock mutation failed. `InsufficientStock` carries the
    /// full itemized shortfall list for the caller.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),
}

/// Stock side effect a transition produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockEffect {
    None,
    Committed(Vec<AppliedChange>),
    Released(Vec<AppliedChange>),
}

/// Result of a successful transition: the edge taken and its stock effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub effect: StockEffect,
}

/// Drives order status transitions and invokes the stock ledger at the
/// correct edges.
///
/// On a commit-triggering edge the controller holds the order's product
/// locks across validate + status write + deduction, so availability cannot
/// change under it (the race-handling strategy for concurrent confirmations).
#[derive(Debug)]
pub struct LifecycleController<O, I, L> {
    orders: O,
    ledger: StockLedger<I, L>,
}

impl<O, I, L> LifecycleController<O, I, L> {
    pub fn new(orders: O, ledger: StockLedger<I, L>) -> Self {
        Self { orders, ledger }
    }

    pub fn ledger(&self) -> &StockLedger<I, L> {
        &self.ledger
    }
}

impl<O, I, L> LifecycleController<O, I, L>
where
    O: OrderStore,
    I: InventoryStore,
    L: MovementLog,
{
    /// Apply a status change to an order, with its stock side effects.
    ///
    /// - Into Confirmed/Processing from outside that set: validate first;
    ///   on shortfall the status write is not persisted and the itemized
    ///   list is surfaced. On success the status is persisted and stock is
    ///   deducted.
    /// - Within the committing set (re-save, confirmed → processing): status
    ///   write only, no re-validation.
    /// - Into Cancelled/Refunded: status write, then release (idempotent;
    ///   silent for orders that never committed).
    /// - Anything else: status write only.
    pub fn transition(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<TransitionOutcome, TransitionError> {
        let order = self
            .orders
            .find(order_id)?
            .ok_or(TransitionError::OrderNotFound(order_id))?;
        let edge = StatusTransition::new(order.status(), new_status);

        let effect = if edge.triggers_commit() {
            // Lock spans the check and the write; see StockLedger::guard.
            let _guard = self.ledger.guard(order.items())?;
            self.ledger.validate(order.items())?;
            self.persist_status(order_id, new_status)?;
            let changes = self.ledger.commit(order_id, order.items())?;
            StockEffect::Committed(changes)
        } else if edge.triggers_release() {
            self.persist_status(order_id, new_status)?;
            let changes = self.ledger.release(order_id)?;
            StockEffect::Released(changes)
        } else {
            if edge.is_committed_noop() {
                debug!(%order_id, from = %edge.from, to = %edge.to, "order already committed, stock untouched");
            }
            self.persist_status(order_id, new_status)?;
            StockEffect::None
        };

        info!(%order_id, from = %edge.from, to = %edge.to, "order transitioned");
        Ok(TransitionOutcome {
            order_id,
            from: edge.from,
            to: edge.to,
            effect,
        })
    }

    fn persist_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), TransitionError> {
        self.orders
            .update_status(order_id, status)?
            .ok_or(TransitionError::OrderNotFound(order_id))?;
        Ok(())
    }
}
