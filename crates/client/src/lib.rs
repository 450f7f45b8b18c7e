//! # Catalog Client
//!
//! HTTP access to the address catalog backend.
//!
//! - **`CatalogApi`**: the fetcher interface the state machines depend on
//! - **`ApiClient`**: its `reqwest` implementation
//! - **`StreetQuery`**: merges free-text search and location filters into
//!   one `/streets` request
//! - **`join`**: denormalizes bare street records into table rows
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = ApiClient::new(&config)?;
//! let regions = client.regions().await?;
//! let rows = load_street_rows(&client, &StreetQuery::new().with_search("alameda")).await?;
//! ```

pub mod api;
pub mod client;
pub mod join;
pub mod query;

pub use api::CatalogApi;
pub use client::ApiClient;
pub use join::{denormalize, load_street_rows};
pub use query::StreetQuery;
