//! HTTP server for the payroll engine.
//!
//! Environment:
//! - `NOMINA_CONFIG_DIR`: configuration directory (default `./config/mx`)
//! - `NOMINA_BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `NOMINA_LOG_JSON`: `1` or `true` for JSON log lines

use std::env;

use nomina_engine::api::{AppState, create_router};
use nomina_engine::config::ConfigLoader;
use nomina_engine::logging::init_logging;
use tracing::{error, info};

const DEFAULT_CONFIG_DIR: &str = "./config/mx";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(env_flag("NOMINA_LOG_JSON"));

    let config_dir = env::var("NOMINA_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("NOMINA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let loader = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;
    info!(
        config_dir = %config_dir,
        tables = %loader.metadata().name,
        version = %loader.metadata().version,
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Payroll engine listening");

    axum::serve(listener, create_router(AppState::new(loader))).await?;
    Ok(())
}
