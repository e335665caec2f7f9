use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use orderdesk_core::{DomainError, OrderId};

use crate::app::state::{SharedStore, WebhookSecret};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/payment", post(payment_webhook))
}

/// Payment webhook: signature check, event filtering, then the
/// unconditional move to PAID.
///
/// Any event other than `payment.succeeded` is acknowledged without
/// mutation.
pub async fn payment_webhook(
    Extension(store): Extension<SharedStore>,
    Extension(secret): Extension<Arc<WebhookSecret>>,
    Query(query): Query<dto::SignatureQuery>,
    Json(body): Json<dto::PaymentEventRequest>,
) -> axum::response::Response {
    if !secret.verify(&query.signature) {
        return errors::domain_error_to_response(DomainError::Unauthorized);
    }

    if body.event != "payment.succeeded" {
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "event ignored" })),
        )
            .into_response();
    }

    let Some(order_id) = body.order_id else {
        return errors::domain_error_to_response(DomainError::NotFound);
    };

    let mut store = store.lock().expect("store mutex poisoned");
    match store.ledger.mark_paid(OrderId::new(order_id)) {
        Ok(order) => {
            tracing::info!(order_id = order.id.value(), "payment processed");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "payment processed",
                    "order_id": order.id.value(),
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
