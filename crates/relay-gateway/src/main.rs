//! Room mediator entry point
//!
//! Run with:
//! ```bash
//! cargo run -p relay-gateway --bin room-mediator
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use relay_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.mediator.address(),
        room_id = ?config.room.id,
        room_service_url = %config.room.service_url,
        "Configuration loaded"
    );

    if let Err(e) = relay_gateway::run(config).await {
        error!(error = %e, code = e.error_code(), "Mediator failed");
        std::process::exit(1);
    }
}
