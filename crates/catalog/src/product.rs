use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, ProductId};

/// A product held in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Fields accepted when creating or updating a product.
///
/// Updates overwrite all four fields wholesale; there is no partial-update
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl ProductDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.price <= 0.0 {
            return Err(DomainError::validation("price must be greater than 0"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        Ok(())
    }
}

/// The product table: an ordered map of products plus the next-id counter.
///
/// Ids are assigned sequentially starting at 1 and never reused, so map
/// iteration order equals creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
    next_id: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a product.
    ///
    /// The duplicate-SKU check runs before field validation; the resulting
    /// error precedence is observable and relied upon by callers.
    pub fn create(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        if self.products.values().any(|p| p.sku == draft.sku) {
            return Err(DomainError::conflict(format!(
                "product with SKU '{}' already exists",
                draft.sku
            )));
        }
        draft.validate()?;

        let product = Product {
            id: ProductId::new(self.next_id),
            sku: draft.sku,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
        };
        self.products.insert(product.id, product.clone());
        self.next_id += 1;
        Ok(product)
    }

    pub fn get(&self, id: ProductId) -> DomainResult<&Product> {
        self.products.get(&id).ok_or(DomainError::NotFound)
    }

    /// All products in creation order.
    pub fn list(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Overwrite all fields of an existing product.
    ///
    /// SKU uniqueness is deliberately not re-checked here: an update may
    /// collide with another product's SKU. Known gap, kept for
    /// compatibility.
    pub fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        if !self.products.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        draft.validate()?;

        let product = self.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.sku = draft.sku;
        product.name = draft.name;
        product.price = draft.price;
        product.stock = draft.stock;
        Ok(product.clone())
    }

    /// Remove a product unconditionally.
    ///
    /// Orders referencing it are left dangling; there is no referential
    /// check.
    pub fn delete(&mut self, id: ProductId) -> DomainResult<()> {
        self.products
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }

    /// Apply a stock delta.
    ///
    /// Internal operation used by the order ledger; the caller must have
    /// already validated sufficiency for negative deltas.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> DomainResult<()> {
        let product = self.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.stock += delta;
        Ok(())
    }
}
