//! # UI Components
//!
//! Dioxus components for the street catalog screen:
//! - **Street Table**: Sortable, paginated list with its own toolbar
//! - **Search Bar**: Debounced free-text search
//! - **Inputs**: Text input and select shared by the forms
//! - **Dialogs**: Filter and creation modals
//! - **Toasts**: Transient notifications
//!
//! ## Component Hierarchy
//!
//! ```text
//! StreetsPage
//! ├── SearchBar
//! └── StreetTable
//!     ├── SortHeader (per column)
//!     └── TablePagination
//!
//! DialogOverlay
//! ├── FilterDialog
//! └── CreateStreetDialog
//!
//! ToastStack
//! └── Toast (multiple)
//! ```

pub mod dialogs;
pub mod inputs;
pub mod search_bar;
pub mod street_table;
pub mod toast;

pub use dialogs::{CreateStreetDialog, FilterDialog};
pub use inputs::{Select, SelectOption, TextInput};
pub use search_bar::SearchBar;
pub use street_table::StreetTable;
pub use toast::ToastStack;
