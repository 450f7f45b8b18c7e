//! # Catalog Core
//!
//! Core types, traits, configuration and error handling for Catalog Admin.
//!
//! This crate provides the foundational building blocks shared by the
//! client, the headless state machines and the UI:
//!
//! - **Types**: `LocationId`, the catalog records (region, province, city,
//!   street), the denormalized `StreetRow`, and table sort/page types
//! - **Traits**: `Validatable` and the injected `Notifier` capability
//! - **Errors**: Unified error handling with `CatalogError` and `CatalogResult`
//! - **Config**: Environment-driven `CatalogConfig`
//!

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CatalogConfig, Theme};
pub use error::{CatalogError, CatalogResult, ResultExt};
pub use traits::{
    Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier, Validatable,
};
pub use types::{
    CatalogEntry, City, CityId, CreatedStreet, DEFAULT_PAGE_SIZE, LocationId, NewStreet,
    PAGE_SIZE_OPTIONS, Province, ProvinceId, Region, RegionId, SortColumn, SortDirection, Street,
    StreetId, StreetRow,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
