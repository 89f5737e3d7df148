use serde::{Deserialize, Serialize};

use stockline_core::{DomainError, DomainResult, OrderId, ProductId};

/// Customer order status lifecycle.
///
/// Confirmed/Processing are the stock-committing statuses; Cancelled/Refunded
/// are the stock-releasing ones. Delivered/Completed are terminal with no
/// further stock effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Entering this status commits (deducts) stock.
    pub fn commits_stock(self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Processing)
    }

    /// Entering this status releases previously committed stock.
    pub fn releases_stock(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Completed)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

/// Order line: product and requested quantity.
///
/// Validated once at construction; line items are immutable for the lifetime
/// of the order (quantity changes belong to carts, not orders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    product_id: ProductId,
    quantity: i64,
}

impl OrderLineItem {
    pub fn new(product_id: ProductId, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation(
                "line item quantity must be positive",
            ));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Customer order.
///
/// Commit/release state is not stored here: it is derived from the stock
/// movement log, so there is no overwritable marker to corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    items: Vec<OrderLineItem>,
}

impl Order {
    /// Create a new order in the initial uncommitted status.
    pub fn new(id: OrderId, items: Vec<OrderLineItem>) -> DomainResult<Self> {
        if items.is_empty() {
            return Err(DomainError::validation(
                "order must have at least one line item",
            ));
        }
        Ok(Self {
            id,
            status: OrderStatus::Pending,
            items,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}
