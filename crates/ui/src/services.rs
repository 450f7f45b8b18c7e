//! Process-wide services shared by every component.
//!
//! The configuration and the backend client are created once by
//! [`crate::launch`] before the window opens and are read-only afterwards.

use catalog_client::{ApiClient, CatalogApi};
use catalog_core::{CatalogConfig, CatalogError, CatalogResult};
use std::sync::{Arc, OnceLock};

static SERVICES: OnceLock<Services> = OnceLock::new();

/// Configuration plus the backend client built from it
#[derive(Clone)]
pub struct Services {
    pub config: CatalogConfig,
    pub api: Arc<dyn CatalogApi>,
}

impl Services {
    /// Build the `reqwest` client for `config`
    pub fn from_config(config: CatalogConfig) -> CatalogResult<Self> {
        let api = ApiClient::new(&config)?;
        tracing::info!("Using catalog backend at {}", api.base_url());
        Ok(Self {
            config,
            api: Arc::new(api),
        })
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Install the services; only the first call has an effect
pub fn init_services(services: Services) -> CatalogResult<()> {
    SERVICES
        .set(services)
        .map_err(|_| CatalogError::internal("services were already initialized"))
}

/// The installed services
pub fn services() -> CatalogResult<&'static Services> {
    SERVICES
        .get()
        .ok_or_else(|| CatalogError::internal("services used before initialization"))
}

// ============================================================================
// Tests
// ============================================================================
