//! HTTP server for the Redundancy Engine.
//!
//! Environment:
//! - `REDUNDANCY_CONFIG_DIR`: agreement configuration directory (default `./config/paso`)
//! - `REDUNDANCY_LISTEN_ADDR`: socket address to bind (default `127.0.0.1:3000`)
//! - `REDUNDANCY_LOG_FORMAT`: `text` or `json` (default `text`)
//! - `RUST_LOG`: tracing filter (default `info`)

use std::error::Error;

use redundancy_engine::api::{AppState, create_router};
use redundancy_engine::config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/paso";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

struct ServerConfig {
    config_dir: String,
    listen_addr: String,
    log_format: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            config_dir: env_or("REDUNDANCY_CONFIG_DIR", DEFAULT_CONFIG_DIR),
            listen_addr: env_or("REDUNDANCY_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            log_format: env_or("REDUNDANCY_LOG_FORMAT", "text"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_format);

    let config = ConfigLoader::load(&server_config.config_dir)?;
    let router = create_router(AppState::new(config));

    tracing::info!("Listening on {}", server_config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&server_config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
