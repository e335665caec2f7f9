use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use orderdesk_core::ProductId;

use crate::app::state::SharedStore;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(store): Extension<SharedStore>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");
    match store.catalog.create(body.into_draft()) {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(store): Extension<SharedStore>,
) -> axum::response::Response {
    let store = store.lock().expect("store mutex poisoned");
    let items = store
        .catalog
        .list()
        .into_iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let store = store.lock().expect("store mutex poisoned");
    match store.catalog.get(ProductId::new(id)) {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");
    match store.catalog.update(ProductId::new(id), body.into_draft()) {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let mut store = store.lock().expect("store mutex poisoned");
    match store.catalog.delete(ProductId::new(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
