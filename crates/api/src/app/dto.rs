use serde::Deserialize;

use orderdesk_catalog::{Product, ProductDraft};
use orderdesk_ledger::Order;

// -------------------------
// Request DTOs
// -------------------------

/// Body of POST /products and PUT /products/{id}: updates overwrite all
/// fields wholesale.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            sku: self.sku,
            name: self.name,
            price: self.price,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: u64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusQuery {
    pub new_status: String,
}

#[derive(Debug, Deserialize)]
pub struct SignatureQuery {
    #[serde(default)]
    pub signature: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEventRequest {
    pub event: String,
    pub order_id: Option<u64>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.value(),
        "sku": product.sku,
        "name": product.name,
        "price": product.price,
        "stock": product.stock,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.value(),
        "product_id": order.product_id.value(),
        "quantity": order.quantity,
        "status": order.status.as_str(),
        "created_at": order.created_at.to_rfc3339(),
    })
}
