//! Order Ledger domain module.
//!
//! This crate contains business rules for orders: creation with stock
//! reservation against the catalog, status transitions, and the
//! webhook-driven move to PAID. Pure domain logic (no IO, no HTTP, no
//! storage).

pub mod order;

pub use order::{Order, OrderLedger, OrderStatus};
