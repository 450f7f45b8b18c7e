//! # Search Bar
//!
//! Free-text street search. Every keystroke updates the field at once; the
//! request goes out after the configured idle time.

use dioxus::prelude::*;

use crate::components::inputs::TextInput;
use crate::hooks::use_catalog_actions;
use crate::state::APP_STATE;

#[component]
pub fn SearchBar() -> Element {
    let actions = use_catalog_actions();
    let text = APP_STATE.read().session.search_text().to_string();

    rsx! {
        div {
            class: "search-bar",
            TextInput {
                value: text,
                prefix: "🔍".to_string(),
                placeholder: "Search streets by name…".to_string(),
                class: "search-field".to_string(),
                on_change: move |v: String| actions.search_input(v),
            }
        }
    }
}
