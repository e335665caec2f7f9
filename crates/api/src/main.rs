use orderdesk_api::app;
use orderdesk_api::app::state::{self, Store};

#[tokio::main]
async fn main() {
    orderdesk_observability::init();

    let webhook_secret = std::env::var("WEBHOOK_SECRET").unwrap_or_else(|_| {
        tracing::warn!("WEBHOOK_SECRET not set; using insecure dev default");
        "valid-signature".to_string()
    });

    let store = state::shared(Store::seeded());
    let app = app::build_app(store, webhook_secret);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
