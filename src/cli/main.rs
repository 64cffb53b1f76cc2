//! academy-site: serve the Wego Elite Academy marketing site

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use academy_site::ContentClient;
use academy_site::cli::{Args, build_store, init_tracing};
use academy_site::server::{AppState, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config().context("Failed to load configuration")?;
    init_tracing(&config.server)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting academy-site");

    let store = build_store(&config.store)
        .await
        .context("Failed to open the table store")?;
    let listener = TcpListener::bind(config.server.bind)
        .await
        .with_context(|| format!("Cannot bind {}", config.server.bind))?;

    let client = ContentClient::new(store).with_grade_band_column(config.store.grade_band_column);
    serve(listener, AppState::from_client(client, config.site)).await?;
    Ok(())
}
