//! Kick OAuth operator CLI
//!
//! Drives the Authorization Code + PKCE flow from a terminal:
//! 1. `authorize` prints the URL to open plus the state and verifier to keep
//! 2. `exchange` trades the callback code for tokens
//! 3. `refresh` / `revoke` manage the token lifecycle
//! 4. `introspect` / `users` check a token against the REST API
//!
//! Configuration comes from the environment (optionally a `.env` file); see
//! `common::config` for the variable names.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use common::ClientConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("failed to read .env file"),
    }

    let cli = cli::Cli::parse();

    let config = ClientConfig::from_env().context("failed to resolve Kick client configuration")?;
    info!(
        api_base_url = config.base_url(),
        auth_base_url = config.auth_base_url(),
        client_id_set = config.client_id().is_some(),
        "configuration loaded"
    );

    let http = reqwest::Client::builder()
        .timeout(cli.timeout())
        .build()
        .context("failed to build HTTP client")?;

    let output = commands::run(cli.command, config, http).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
