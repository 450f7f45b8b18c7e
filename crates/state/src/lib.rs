//! # Catalog State
//!
//! Framework-independent state for the catalog admin screen. Every
//! operation here is plain data manipulation plus, for the async
//! conveniences, calls through an injected [`CatalogApi`] and
//! [`Notifier`]; the Dioxus layer only mirrors this state into signals.
//!
//! - **`filter`**: the region → province → city → street cascade, with
//!   request-generation tickets so late responses cannot overwrite a newer
//!   selection
//! - **`table`**: stable sorting and pagination of street rows
//! - **`debounce`**: the search-box debounce timer
//! - **`creation`**: the "new street" form
//! - **`session`**: everything above wired together for one screen
//!
//! [`CatalogApi`]: catalog_client::CatalogApi
//! [`Notifier`]: catalog_core::Notifier

pub mod creation;
pub mod debounce;
pub mod filter;
pub mod session;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use creation::{CreationFlow, NAME_FIELD};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::{
    CascadingFilter, FetchTicket, Fetched, LocationLevel, LocationPath, OptionList, Resolution,
};
pub use session::{CatalogSession, QueryTicket};
pub use table::{StreetTable, TableState};
