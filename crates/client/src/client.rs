//! `reqwest` implementation of [`CatalogApi`].

use async_trait::async_trait;
use catalog_core::{
    CatalogConfig, CatalogError, CatalogResult, City, CreatedStreet, NewStreet, Province,
    ProvinceId, Region, RegionId, Street, StreetId,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::CatalogApi;
use crate::query::StreetQuery;

// ============================================================================
// Error Body
// ============================================================================

/// Error payload some backends attach to 4xx/5xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.detail)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

fn request_error(e: reqwest::Error) -> CatalogError {
    CatalogError::Request {
        message: e.to_string(),
        timeout: e.is_timeout(),
        connect: e.is_connect(),
    }
}

// ============================================================================
// API Client
// ============================================================================

/// HTTP client for the catalog backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying reqwest HTTP client.
    client: Client,
    /// Base URL of the backend API, without trailing slash.
    base_url: String,
}

impl ApiClient {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client from the application configuration
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::build(&config.api_url, config.request_timeout)
    }

    /// Create a client for the given base URL with the default timeout
    pub fn with_base_url(base_url: impl AsRef<str>) -> CatalogResult<Self> {
        Self::build(base_url.as_ref(), Self::DEFAULT_TIMEOUT)
    }

    fn build(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Generic request helpers
    // ========================================================================

    /// Send a GET request with query parameters and deserialise the response.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> CatalogResult<T> {
        tracing::debug!("GET {} {:?}", path, params);

        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GET {} failed: {}", path, e);
                request_error(e)
            })?;

        Self::handle_response(path, response).await
    }

    /// Send a POST request with a JSON body and deserialise the response.
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> CatalogResult<T> {
        tracing::debug!("POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("POST {} failed: {}", path, e);
                request_error(e)
            })?;

        Self::handle_response(path, response).await
    }

    /// Check the status and deserialise on success.
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> CatalogResult<T> {
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                tracing::error!("Failed to parse response from {}: {}", path, e);
                CatalogError::Parse(e.to_string())
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read error body from {}: {}", path, e);
                String::new()
            }
        };
        let message = error_message(status, &body);

        tracing::warn!("{} returned {}: {}", path, status.as_u16(), message);
        Err(CatalogError::api(status.as_u16(), message))
    }
}

/// The backend's `message`/`error` field, else the status text
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server returned status {}", status.as_u16()))
        })
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn regions(&self) -> CatalogResult<Vec<Region>> {
        self.get("/regions", &[]).await
    }

    async fn provinces(&self, region_id: RegionId) -> CatalogResult<Vec<Province>> {
        self.get("/provinces", &[("region_id", region_id.to_string())])
            .await
    }

    async fn all_provinces(&self) -> CatalogResult<Vec<Province>> {
        self.get("/provinces", &[]).await
    }

    async fn cities(&self, province_id: ProvinceId) -> CatalogResult<Vec<City>> {
        self.get("/cities", &[("province_id", province_id.to_string())])
            .await
    }

    async fn all_cities(&self) -> CatalogResult<Vec<City>> {
        self.get("/cities", &[]).await
    }

    async fn streets(&self, query: &StreetQuery) -> CatalogResult<Vec<Street>> {
        self.get("/streets", &query.to_params()).await
    }

    async fn street(&self, id: StreetId) -> CatalogResult<Street> {
        self.get(&format!("/streets/{}", id), &[])
            .await
            .map_err(|e| match e {
                CatalogError::Api { status: 404, .. } => {
                    CatalogError::NotFound(format!("Street {}", id))
                }
                other => other,
            })
    }

    async fn create_street(&self, street: &NewStreet) -> CatalogResult<CreatedStreet> {
        let created: CreatedStreet = self.post("/streets", street).await?;
        tracing::info!("Created street '{}' with id {}", street.name, created.id);
        Ok(created)
    }
}

// ============================================================================
// Tests
// ============================================================================
