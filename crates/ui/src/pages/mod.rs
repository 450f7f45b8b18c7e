//! Page Components for Catalog Admin
//!
//! - **StreetsPage**: Search, filter and browse streets

pub mod streets;

pub use streets::StreetsPage;
