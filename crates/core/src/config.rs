//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured via `dotenvy`; a
//! missing file is not an error. Every setting has a default, so an empty
//! environment yields a usable configuration pointing at a local backend.

use crate::error::{CatalogError, CatalogResult};
use crate::types::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use std::env;
use std::time::Duration;

/// Color scheme of the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Runtime configuration for the admin UI
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Idle time before a search is sent
    pub search_debounce: Duration,
    /// Initial table page size, one of `PAGE_SIZE_OPTIONS`
    pub page_size: usize,
    /// Initial color scheme
    pub theme: Theme,
    /// How long a toast stays on screen
    pub notification_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(Self::DEFAULT_SEARCH_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
            theme: Theme::Dark,
            notification_ttl: Duration::from_secs(Self::DEFAULT_NOTIFICATION_SECS),
        }
    }
}

impl CatalogConfig {
    const DEFAULT_API_URL: &'static str = "http://127.0.0.1:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
    const DEFAULT_NOTIFICATION_SECS: u64 = 4;

    /// Load configuration from the process environment (and `.env`)
    pub fn from_env() -> CatalogResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Error loading .env file: {}", e),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = read("CATALOG_API_URL")
            .or_else(|| read("API_URL"))
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(CatalogError::InvalidConfig(format!(
                "CATALOG_API_URL must start with http:// or https://, got '{}'",
                api_url
            )));
        }

        let request_timeout_secs = parse_number(
            "CATALOG_REQUEST_TIMEOUT_SECS",
            read("CATALOG_REQUEST_TIMEOUT_SECS"),
            Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if request_timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "CATALOG_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let search_debounce_ms = parse_number(
            "CATALOG_SEARCH_DEBOUNCE_MS",
            read("CATALOG_SEARCH_DEBOUNCE_MS"),
            Self::DEFAULT_SEARCH_DEBOUNCE_MS,
        )?;

        let page_size = parse_number(
            "CATALOG_PAGE_SIZE",
            read("CATALOG_PAGE_SIZE"),
            DEFAULT_PAGE_SIZE as u64,
        )? as usize;
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(CatalogError::InvalidConfig(format!(
                "CATALOG_PAGE_SIZE must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, page_size
            )));
        }

        let theme = match read("CATALOG_THEME").as_deref().map(str::to_lowercase) {
            None => Theme::Dark,
            Some(value) => match value.as_str() {
                "dark" => Theme::Dark,
                "light" => Theme::Light,
                other => {
                    return Err(CatalogError::InvalidConfig(format!(
                        "CATALOG_THEME must be 'dark' or 'light', got '{}'",
                        other
                    )));
                }
            },
        };

        let notification_secs = parse_number(
            "CATALOG_NOTIFICATION_SECS",
            read("CATALOG_NOTIFICATION_SECS"),
            Self::DEFAULT_NOTIFICATION_SECS,
        )?;

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            search_debounce: Duration::from_millis(search_debounce_ms),
            page_size,
            theme,
            notification_ttl: Duration::from_secs(notification_secs),
        })
    }
}

fn parse_number(key: &str, value: Option<String>, default: u64) -> CatalogResult<u64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| CatalogError::InvalidConfig(format!("{} must be a valid number", key))),
    }
}

// ============================================================================
// Tests
// ============================================================================
