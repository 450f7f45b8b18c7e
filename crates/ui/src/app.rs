//! Main Application Component for Catalog Admin
//!
//! This module contains the root Dioxus component: toolbar, the street
//! page, a status bar, the modal overlay and the toast stack.

use dioxus::prelude::*;

use crate::components::{CreateStreetDialog, FilterDialog, ToastStack};
use crate::hooks::{CatalogActions, use_catalog_actions};
use crate::pages::StreetsPage;
use crate::services::services;
use crate::state::{APP_STATE, init_app_state};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let services = match services() {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("Cannot start the UI: {}", e);
            return rsx! { StartupError { message: e.user_message() } };
        }
    };

    use_hook(|| init_app_state(&services.config));
    let actions = use_context_provider(|| CatalogActions::new(services));
    use_hook(move || actions.initialize());

    let theme_class = APP_STATE.read().ui.theme_class();

    rsx! {
        div {
            class: "app-container {theme_class}",

            // Top Toolbar
            Toolbar {}

            StreetsPage {}

            // Status Bar
            StatusBar { api_url: services.config.api_url.clone() }

            // Dialog overlay (if active)
            DialogOverlay {}

            ToastStack {}
        }
    }
}

/// Shown instead of the app when the services are missing
#[component]
fn StartupError(message: String) -> Element {
    rsx! {
        div {
            class: "app-container theme-dark startup-error",
            h1 { "Catalog Admin could not start" }
            p { "{message}" }
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top toolbar with the app title and theme switch
#[component]
fn Toolbar() -> Element {
    let actions = use_catalog_actions();

    let dark_mode = APP_STATE.read().ui.dark_mode;

    rsx! {
        header {
            class: "toolbar",

            div {
                class: "toolbar-brand",
                span { class: "toolbar-logo", "🗺️" }
                span { class: "toolbar-title", "Street Catalog" }
            }

            div { class: "toolbar-spacer" }

            div {
                class: "toolbar-group",

                ToolbarButton {
                    icon: if dark_mode { "☀️" } else { "🌙" },
                    label: "Theme",
                    onclick: move |_| actions.toggle_theme(),
                }
            }
        }
    }
}

/// Toolbar button component
#[component]
fn ToolbarButton(
    icon: &'static str,
    label: &'static str,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "toolbar-button",
            title: label,
            onclick: move |e| onclick.call(e),
            span { "{icon}" }
            span { class: "toolbar-button-label", "{label}" }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Bottom status bar with the list state and backend address
#[component]
fn StatusBar(api_url: String) -> Element {
    let state = APP_STATE.read();
    let loading = state.session.is_loading();
    let total = state.session.table.len();
    let search = state.session.search_text().trim().to_string();
    drop(state);

    let summary = status_summary(loading, total, &search);

    rsx! {
        footer {
            class: "status-bar",
            span { "{summary}" }
            div { class: "toolbar-spacer" }
            span { class: "status-backend", "{api_url}" }
        }
    }
}

/// Left-hand status bar text
fn status_summary(loading: bool, total: usize, search: &str) -> String {
    if loading {
        return "Loading…".to_string();
    }
    let noun = if total == 1 { "street" } else { "streets" };
    if search.is_empty() {
        format!("{} {}", total, noun)
    } else {
        format!("{} {} matching \"{}\"", total, noun, search)
    }
}

// ============================================================================
// Dialog Overlay
// ============================================================================

/// Which modal, if any, covers the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveDialog {
    Create,
    Filter,
}

/// Modal backdrop and content; clicking the backdrop closes the dialog
#[component]
fn DialogOverlay() -> Element {
    let actions = use_catalog_actions();

    let state = APP_STATE.read();
    let dialog = if state.session.creation.is_open() {
        Some(ActiveDialog::Create)
    } else if state.session.is_filter_panel_open() {
        Some(ActiveDialog::Filter)
    } else {
        None
    };
    drop(state);

    let Some(dialog) = dialog else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "overlay",

            // Backdrop
            div {
                class: "overlay-backdrop",
                onclick: move |_| match dialog {
                    ActiveDialog::Create => actions.close_creation(),
                    ActiveDialog::Filter => actions.toggle_filter_panel(),
                }
            }

            // Dialog content
            div {
                class: "overlay-content",
                onclick: move |e| e.stop_propagation(),

                match dialog {
                    ActiveDialog::Create => rsx! { CreateStreetDialog {} },
                    ActiveDialog::Filter => rsx! { FilterDialog {} },
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
