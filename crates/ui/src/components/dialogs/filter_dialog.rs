//! # Filter Dialog Component
//!
//! Cascading region → province → city → street selection. Each select is
//! disabled until its parent has a value; picking a parent clears and
//! reloads everything below it.

use catalog_core::CatalogEntry;
use catalog_state::{CascadingFilter, OptionList};
use dioxus::prelude::*;

use crate::components::inputs::{Select, SelectOption, entry_options, parse_selection, selection_value};
use crate::hooks::use_catalog_actions;
use crate::state::APP_STATE;

// ============================================================================
// View Model
// ============================================================================

/// One select of the cascade, extracted so the borrow on the state is short
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LevelView {
    pub value: String,
    pub options: Vec<SelectOption>,
    pub loading: bool,
    pub enabled: bool,
}

/// Snapshot of the filter for rendering
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterView {
    pub region: LevelView,
    pub province: LevelView,
    pub city: LevelView,
    pub street: LevelView,
}

impl LevelView {
    pub fn new<T: CatalogEntry>(list: &OptionList<T>, enabled: bool) -> Self {
        Self {
            value: selection_value(list.selected()),
            options: entry_options(list.options()),
            loading: list.is_loading(),
            enabled,
        }
    }
}

impl FilterView {
    pub fn from_filter(filter: &CascadingFilter) -> Self {
        let path = &filter.path;
        Self {
            region: LevelView::new(&path.regions, true),
            province: LevelView::new(&path.provinces, path.region_id().is_some()),
            city: LevelView::new(&path.cities, path.province_id().is_some()),
            street: LevelView::new(&filter.streets, path.city_id().is_some()),
        }
    }
}

// ============================================================================
// Main Component
// ============================================================================

/// Modal content for narrowing the street list by location
#[component]
pub fn FilterDialog() -> Element {
    let actions = use_catalog_actions();
    let view = FilterView::from_filter(&APP_STATE.read().session.filter);

    let region_actions = actions.clone();
    let province_actions = actions.clone();
    let city_actions = actions.clone();
    let street_actions = actions.clone();
    let apply_actions = actions.clone();
    let close_actions = actions.clone();

    rsx! {
        div {
            class: "dialog",

            div {
                class: "dialog-header",
                h2 { class: "dialog-title", "Filter by location" }
                button {
                    class: "icon-button",
                    title: "Close",
                    onclick: move |_| close_actions.toggle_filter_panel(),
                    "✕"
                }
            }

            div {
                class: "dialog-body",

                Select {
                    label: "Region".to_string(),
                    placeholder: "All regions".to_string(),
                    value: view.region.value,
                    options: view.region.options,
                    loading: view.region.loading,
                    on_change: move |v: String| region_actions.select_region(parse_selection(&v)),
                }

                Select {
                    label: "Province".to_string(),
                    placeholder: "All provinces".to_string(),
                    value: view.province.value,
                    options: view.province.options,
                    loading: view.province.loading,
                    disabled: !view.province.enabled,
                    on_change: move |v: String| province_actions.select_province(parse_selection(&v)),
                }

                Select {
                    label: "City".to_string(),
                    placeholder: "All cities".to_string(),
                    value: view.city.value,
                    options: view.city.options,
                    loading: view.city.loading,
                    disabled: !view.city.enabled,
                    on_change: move |v: String| city_actions.select_city(parse_selection(&v)),
                }

                Select {
                    label: "Street".to_string(),
                    placeholder: "All streets".to_string(),
                    value: view.street.value,
                    options: view.street.options,
                    loading: view.street.loading,
                    disabled: !view.street.enabled,
                    on_change: move |v: String| street_actions.select_street(parse_selection(&v)),
                }
            }

            div {
                class: "dialog-footer",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| actions.reset_filters(),
                    "Reset"
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| apply_actions.apply_filters(),
                    "Apply"
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
