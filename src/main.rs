//! Payroll engine HTTP server.
//!
//! Reads configuration from `PAYROLL_CONFIG_DIR` (default `./config/payroll`)
//! and serves the API on the address configured in `engine.yaml`.

use std::env;
use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/payroll";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    // An error here means no handler could be installed; serve until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind = config.server().bind.clone();

    info!(
        config_dir = %config_dir,
        engine = %config.engine().name,
        version = %config.engine().version,
        "Configuration loaded"
    );

    let state = AppState::new(config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(bind = %bind, "Payroll engine listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Payroll engine stopped");
    Ok(())
}
