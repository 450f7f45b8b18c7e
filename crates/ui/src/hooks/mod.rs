//! # UI Hooks
//!
//! Custom Dioxus hooks for the Catalog Admin UI.
//!
//! - Catalog actions: filter cascade, debounced search, table paging and
//!   the creation form, each running its backend request in the background

// ============================================================================
// Module Declarations
// ============================================================================

pub mod use_catalog;

// ============================================================================
// Re-exports
// ============================================================================

pub use use_catalog::{CatalogActions, use_catalog_actions};
