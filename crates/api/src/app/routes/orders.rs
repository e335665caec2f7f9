use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use orderdesk_core::{OrderId, ProductId};
use orderdesk_ledger::OrderStatus;

use crate::app::state::{SharedStore, Store};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route(
            "/:id",
            get(get_order).put(set_order_status).delete(delete_order),
        )
}

pub async fn create_order(
    Extension(store): Extension<SharedStore>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");
    // Split borrow: the ledger mutates the catalog's stock under the same
    // lock, so the whole check-then-decrement sequence is atomic.
    let Store { catalog, ledger } = &mut *store;
    match ledger.create(
        catalog,
        ProductId::new(body.product_id),
        body.quantity,
        Utc::now(),
    ) {
        Ok(order) => (StatusCode::CREATED, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_orders(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let store = store.lock().expect("store mutex poisoned");
    let items = store
        .ledger
        .list()
        .into_iter()
        .map(dto::order_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_order(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let store = store.lock().expect("store mutex poisoned");
    match store.ledger.get(OrderId::new(id)) {
        Ok(order) => (StatusCode::OK, Json(dto::order_to_json(order))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_order_status(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
    Query(query): Query<dto::SetStatusQuery>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");

    // Existence is checked before the status string: a missing order is
    // NotFound even when the requested status is also invalid.
    if let Err(e) = store.ledger.get(OrderId::new(id)) {
        return errors::domain_error_to_response(e);
    }
    let status = match OrderStatus::parse(&query.new_status) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.ledger.set_status(OrderId::new(id), status) {
        Ok(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");
    match store.ledger.delete(OrderId::new(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
