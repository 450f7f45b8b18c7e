//! # Catalog UI
//!
//! Dioxus Desktop UI for Catalog Admin.
//!
//! This crate renders the street catalog screen on top of the headless
//! state machines in `catalog_state`.
//!
//! ## Features
//!
//! - Cascading region → province → city → street filter
//! - Debounced free-text search
//! - Sortable, paginated street table
//! - Street creation form with validation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod hooks;
pub mod pages;
pub mod services;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use catalog_client;
pub use catalog_core;
pub use catalog_state;

pub use app::App;
pub use hooks::{CatalogActions, use_catalog_actions};
pub use services::{Services, init_services, services};
pub use state::{APP_STATE, AppState, ToastQueue, UiState, init_app_state};

use catalog_core::{CatalogConfig, CatalogResult};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Catalog Admin";

/// Application display title
pub const TITLE: &str = "Catalog Admin - Street Catalog";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Catalog Admin desktop application
///
/// Builds the backend client from `config`, installs it for the components
/// and opens the window. Returns once the window is closed.
///
/// # Example
///
/// ```rust,ignore
/// fn main() -> anyhow::Result<()> {
///     let config = catalog_core::CatalogConfig::from_env()?;
///     catalog_ui::launch(config)?;
///     Ok(())
/// }
/// ```
pub fn launch(config: CatalogConfig) -> CatalogResult<()> {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    init_services(Services::from_config(config)?)?;

    // Build custom head with embedded CSS
    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 760.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(640.0, 480.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);

    Ok(())
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================
