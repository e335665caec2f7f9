//! Shared in-memory state: the combined product/order tables and the
//! webhook secret.

use std::sync::{Arc, Mutex};

use orderdesk_catalog::{Catalog, ProductDraft};
use orderdesk_ledger::OrderLedger;

/// The combined in-memory tables.
///
/// A single mutex guards both tables so compound read-modify-write
/// sequences (id assignment, stock check-then-decrement, status
/// check-then-delete) stay atomic under concurrent handlers.
#[derive(Debug, Default)]
pub struct Store {
    pub catalog: Catalog,
    pub ledger: OrderLedger,
}

impl Store {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            ledger: OrderLedger::new(),
        }
    }

    /// A store pre-populated with the three fixed sample products,
    /// consuming product ids 1..=3.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let samples = [
            ("BOOK-001", "Systems Programming Book", 29.99, 10),
            ("LAPTOP-001", "Gaming Laptop", 999.99, 5),
            ("MOUSE-001", "Wireless Mouse", 25.00, 50),
        ];
        for (sku, name, price, stock) in samples {
            store
                .catalog
                .create(ProductDraft {
                    sku: sku.to_string(),
                    name: name.to_string(),
                    price,
                    stock,
                })
                .expect("seed products are valid and unique");
        }
        store
    }
}

/// Store handle shared across handlers.
pub type SharedStore = Arc<Mutex<Store>>;

pub fn shared(store: Store) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Shared secret token guarding the payment webhook.
#[derive(Debug)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Constant-time comparison of the caller-supplied signature against
    /// the shared token. Length still leaks; acceptable for a shared-token
    /// scheme.
    pub fn verify(&self, candidate: &str) -> bool {
        let a = self.0.as_bytes();
        let b = candidate.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}
