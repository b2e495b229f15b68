//! services/client/src/bin/cinesphere.rs

use clap::Parser;
use client_lib::{
    app::AppState,
    cli::{self, Cli},
    config::Config,
    error::ClientError,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded.");

    // --- 2. Build the Shared AppState ---
    if (cli.email.is_some() || cli.google_token.is_some()) && config.identity_api_key.is_none() {
        return Err(ClientError::Config(
            client_lib::config::ConfigError::MissingVar("IDENTITY_API_KEY".to_string()),
        ));
    }
    let state = AppState::build(config, cli.yes)?;

    // --- 3. Run the Command ---
    cli::run(cli, &state).await
}
