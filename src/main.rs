//! Catalog Admin
//!
//! Desktop UI for the region/province/city/street address catalog.
//!
//! This is the main entry point for the Dioxus Desktop application.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = catalog_core::CatalogConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        "Backend {} (timeout {:?}, search debounce {:?})",
        config.api_url,
        config.request_timeout,
        config.search_debounce
    );

    // Launch the Dioxus desktop application
    catalog_ui::launch(config).context("failed to start the UI")?;
    Ok(())
}
