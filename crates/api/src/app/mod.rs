//! HTTP API application wiring (Axum router + shared state).
//!
//! This folder is structured like:
//! - `state.rs`: the in-memory store shared by all handlers (one mutex)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The store is constructed by the caller so tests can choose between an
/// empty store and the seeded one.
pub fn build_app(store: state::SharedStore, webhook_secret: String) -> Router {
    let secret = Arc::new(state::WebhookSecret::new(webhook_secret));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(store))
        .layer(Extension(secret))
}
