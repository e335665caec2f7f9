use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_catalog::Catalog;
use orderdesk_core::{DomainError, DomainResult, OrderId, ProductId};

/// Order status lifecycle.
///
/// No transition graph is enforced: any status may move to any other,
/// including backward. A stricter state machine would be an explicit
/// enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Canceled,
}

impl OrderStatus {
    /// Parse a caller-supplied status string.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "SHIPPED" => Ok(Self::Shipped),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(DomainError::validation(
                "status must be one of: PENDING, PAID, SHIPPED, CANCELED",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Shipped => "SHIPPED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order against a single product.
///
/// `product_id` must resolve at creation time but is never re-validated
/// afterward; deleting the product leaves the reference dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// The order table: an ordered map of orders plus the next-id counter.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLedger {
    orders: BTreeMap<OrderId, Order>,
    next_id: u64,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderLedger {
    pub fn new() -> Self {
        Self {
            orders: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create an order, reserving stock from the catalog.
    ///
    /// Validation precedence is observable behavior: product existence,
    /// then stock sufficiency, then quantity positivity. The stock check
    /// runs before the quantity check, but `stock < quantity` is false for
    /// any non-positive quantity against non-negative stock, so invalid
    /// quantities still fall through to the Validation error below.
    pub fn create(
        &mut self,
        catalog: &mut Catalog,
        product_id: ProductId,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Order> {
        let product = catalog.get(product_id)?;
        if product.stock < quantity {
            return Err(DomainError::conflict(format!(
                "not enough stock. Available: {}, requested: {}",
                product.stock, quantity
            )));
        }
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be greater than 0"));
        }

        catalog.adjust_stock(product_id, -quantity)?;

        let order = Order {
            id: OrderId::new(self.next_id),
            product_id,
            quantity,
            status: OrderStatus::Pending,
            created_at: now,
        };
        self.orders.insert(order.id, order.clone());
        self.next_id += 1;
        Ok(order)
    }

    pub fn get(&self, id: OrderId) -> DomainResult<&Order> {
        self.orders.get(&id).ok_or(DomainError::NotFound)
    }

    /// All orders in creation order.
    pub fn list(&self) -> Vec<&Order> {
        self.orders.values().collect()
    }

    /// Overwrite the status unconditionally.
    pub fn set_status(&mut self, id: OrderId, status: OrderStatus) -> DomainResult<Order> {
        let order = self.orders.get_mut(&id).ok_or(DomainError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }

    /// Remove an order.
    ///
    /// Only PENDING orders may be deleted. Reserved stock is not restored;
    /// known business-logic gap, kept for compatibility.
    pub fn delete(&mut self, id: OrderId) -> DomainResult<()> {
        let order = self.orders.get(&id).ok_or(DomainError::NotFound)?;
        if order.status != OrderStatus::Pending {
            return Err(DomainError::validation("only PENDING orders can be deleted"));
        }
        self.orders.remove(&id);
        Ok(())
    }

    /// Move an order to PAID on a payment event.
    ///
    /// Unconditional: an order already SHIPPED or CANCELED is set to PAID
    /// all the same. Event-type filtering happens at the webhook boundary.
    pub fn mark_paid(&mut self, id: OrderId) -> DomainResult<Order> {
        let order = self.orders.get_mut(&id).ok_or(DomainError::NotFound)?;
        order.status = OrderStatus::Paid;
        Ok(order.clone())
    }
}
