//! # Create Street Dialog
//!
//! Form for adding a street under a region, province and city. Every field
//! is required; the form stays open with its values when the backend
//! rejects the request.

use catalog_state::CreationFlow;
use dioxus::prelude::*;

use super::filter_dialog::LevelView;
use crate::components::inputs::{Select, TextInput, parse_selection};
use crate::hooks::use_catalog_actions;
use crate::state::APP_STATE;

/// Snapshot of the creation form for rendering
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CreationView {
    pub region: LevelView,
    pub province: LevelView,
    pub city: LevelView,
    pub name: String,
    pub submitting: bool,
}

impl CreationView {
    pub fn from_flow(flow: &CreationFlow) -> Self {
        let path = &flow.path;
        Self {
            region: LevelView::new(&path.regions, !flow.is_submitting()),
            province: LevelView::new(
                &path.provinces,
                path.region_id().is_some() && !flow.is_submitting(),
            ),
            city: LevelView::new(
                &path.cities,
                path.province_id().is_some() && !flow.is_submitting(),
            ),
            name: flow.name().to_string(),
            submitting: flow.is_submitting(),
        }
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> &'static str {
        if self.submitting { "Creating…" } else { "Create" }
    }
}

/// Modal content for adding a street
#[component]
pub fn CreateStreetDialog() -> Element {
    let actions = use_catalog_actions();
    let view = CreationView::from_flow(&APP_STATE.read().session.creation);
    let submit_label = view.submit_label();

    let region_actions = actions.clone();
    let province_actions = actions.clone();
    let city_actions = actions.clone();
    let name_actions = actions.clone();
    let enter_actions = actions.clone();
    let close_actions = actions.clone();
    let cancel_actions = actions.clone();
    let reset_actions = actions.clone();

    rsx! {
        div {
            class: "dialog",

            div {
                class: "dialog-header",
                h2 { class: "dialog-title", "New street" }
                button {
                    class: "icon-button",
                    title: "Close",
                    onclick: move |_| close_actions.close_creation(),
                    "✕"
                }
            }

            div {
                class: "dialog-body",

                Select {
                    label: "Region".to_string(),
                    placeholder: "Select a region".to_string(),
                    required: true,
                    value: view.region.value,
                    options: view.region.options,
                    loading: view.region.loading,
                    disabled: !view.region.enabled,
                    on_change: move |v: String| region_actions.select_form_region(parse_selection(&v)),
                }

                Select {
                    label: "Province".to_string(),
                    placeholder: "Select a province".to_string(),
                    required: true,
                    value: view.province.value,
                    options: view.province.options,
                    loading: view.province.loading,
                    disabled: !view.province.enabled,
                    on_change: move |v: String| province_actions.select_form_province(parse_selection(&v)),
                }

                Select {
                    label: "City".to_string(),
                    placeholder: "Select a city".to_string(),
                    required: true,
                    value: view.city.value,
                    options: view.city.options,
                    loading: view.city.loading,
                    disabled: !view.city.enabled,
                    on_change: move |v: String| city_actions.select_form_city(parse_selection(&v)),
                }

                TextInput {
                    label: "Street name".to_string(),
                    placeholder: "e.g. Avenida Libertador".to_string(),
                    required: true,
                    disabled: view.submitting,
                    value: view.name,
                    on_change: move |v: String| name_actions.set_form_name(v),
                    on_enter: move |_: String| enter_actions.submit_creation(),
                }
            }

            div {
                class: "dialog-footer",
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| cancel_actions.close_creation(),
                    "Cancel"
                }
                button {
                    class: "btn btn-secondary",
                    disabled: view.submitting,
                    onclick: move |_| reset_actions.reset_form(),
                    "Reset"
                }
                button {
                    class: "btn btn-primary",
                    disabled: view.submitting,
                    onclick: move |_| actions.submit_creation(),
                    "{submit_label}"
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
