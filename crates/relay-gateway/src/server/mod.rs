//! Mediator server setup
//!
//! Provides the WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::relay_handler;
pub use state::RelayState;

use axum::{routing::get, Router};
use relay_backend::HttpRoomClient;
use relay_common::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the mediator router
pub fn create_router() -> Router<RelayState> {
    Router::new()
        .route("/", get(relay_handler))
        .route("/mediator", get(relay_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: RelayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create `RelayState` backed by the HTTP room service client
pub fn create_relay_state(config: AppConfig) -> AppResult<RelayState> {
    let client = HttpRoomClient::from_config(&config.room)
        .map_err(|e| AppError::external(format!("Failed to create room service client: {e}")))?;

    tracing::info!(
        room_id = ?config.room.id,
        room_service_url = %client.base_url(),
        timeout_ms = config.room.timeout_ms,
        "Room service client ready"
    );

    Ok(RelayState::new(config, Arc::new(client)))
}

/// Run the mediator server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> AppResult<()> {
    axum::serve(listener, app)
        .await
        .map_err(AppError::internal)
}

/// Bind `addr` and run the mediator server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    tracing::info!("Starting mediator on {}", addr);

    let listener = TcpListener::bind(addr).await.map_err(|source| AppError::Bind {
        addr: addr.to_string(),
        source,
    })?;

    tracing::info!("Mediator listening on ws://{}/mediator", addr);

    serve(listener, app).await
}

/// Run the complete mediator with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.mediator.address();

    let state = create_relay_state(config)?;
    let app = create_app(state);

    run_server(app, &addr).await
}
