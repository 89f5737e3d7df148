use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

/// A status transition edge (old status → new status).
///
/// Classifies which stock side effect, if any, the edge carries. The ledger
/// is invoked only on the edges this type names; everything else is a plain
/// status write.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl StatusTransition {
    pub fn new(from: OrderStatus, to: OrderStatus) -> Self {
        Self { from, to }
    }

    /// First entry into a stock-committing status: validate then deduct.
    pub fn triggers_commit(self) -> bool {
        self.to.commits_stock() && !self.from.commits_stock()
    }

    /// Already committed, staying within the committing set (e.g. a re-save
    /// or confirmed → processing): no re-validation, no re-commit.
    pub fn is_committed_noop(self) -> bool {
        self.to.commits_stock() && self.from.commits_stock()
    }

    /// Entry into a releasing status. Release itself is idempotent per order,
    /// so this fires unconditionally on the edge.
    pub fn triggers_release(self) -> bool {
        self.to.releases_stock()
    }
}
