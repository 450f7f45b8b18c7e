//! Street list page: search bar above the catalog table.

use dioxus::prelude::*;

use crate::components::{SearchBar, StreetTable};

/// The catalog screen
#[component]
pub fn StreetsPage() -> Element {
    rsx! {
        main {
            class: "page streets-page",
            SearchBar {}
            StreetTable {}
        }
    }
}
