use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_tracker::api::{AppState, create_router};
use shift_tracker::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "shift-tracker")]
#[command(about = "Geofenced shift clock-in service")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "./config/shift-tracker.yaml")]
    config: PathBuf,

    /// Address to listen on; overrides server.bind_address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let bind = args
        .bind
        .unwrap_or_else(|| config.bind_address().to_string());

    let state = AppState::from_config(&config);
    info!(
        organizations = config.config().organizations.len(),
        workers = config.config().workers.len(),
        enforce_on_clock_in = config.policy().enforce_on_clock_in,
        enforce_on_clock_out = config.policy().enforce_on_clock_out,
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!(address = %bind, "Shift tracker listening");

    axum::serve(listener, create_router(state))
        .await
        .context("server error")?;
    Ok(())
}
