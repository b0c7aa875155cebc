use std::net::SocketAddr;
use std::sync::Arc;

use cabin_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cabin_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cabin_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Cabin API on port {}", config.server.port);

    let store = Arc::new(cabin_store::MemoryStore::new());
    let app_state = AppState::new(
        store.clone(),
        store,
        config.engine.max_assign_attempts,
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
