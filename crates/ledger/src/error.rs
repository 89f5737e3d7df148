//! Ledger error model.

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ShortfallList;

/// Failure of a ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// One or more line items exceed available quantity at validation time.
    /// Recoverable by the caller (adjust the order); nothing was mutated.
    /// Missing inventory records fold into this as zero availability.
    #[error("insufficient stock: {0}")]
    InsufficientStock(ShortfallList),

    /// A store read/write failed transiently. No movement was recorded for
    /// the failed item, so a retry is safe.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// Some line items were applied and some failed. Applied items are
    /// recorded in the movement log, so retrying completes only the
    /// remainder. Reported for operational follow-up, not auto-retried.
    #[error("{operation} applied partially: {failed} of {total} line items failed")]
    PartialFailure {
        operation: &'static str,
        failed: usize,
        total: usize,
    },

    /// The movement log contradicts itself (e.g. more stock restocked than
    /// was ever deducted for an order). Rejected rather than silently
    /// mutating inventory.
    #[error("invariant violated: {0}")]
    Invariant(String),
}
