//! # Dialog Components
//!
//! Modal contents shown over the street list:
//!
//! - **FilterDialog**: Cascading region/province/city/street filter
//! - **CreateStreetDialog**: Form for adding a street

pub mod create_street;
pub mod filter_dialog;

pub use create_street::CreateStreetDialog;
pub use filter_dialog::FilterDialog;
