//! # Street Table
//!
//! Sortable, paginated list of streets. Sorting and paging are pure state
//! operations on the session's table; nothing here talks to the backend.

use catalog_core::{PAGE_SIZE_OPTIONS, SortColumn, SortDirection, StreetRow};
use dioxus::prelude::*;

use crate::hooks::use_catalog_actions;
use crate::state::APP_STATE;

/// Height of one body row in pixels, used to size the filler row
pub const ROW_HEIGHT: usize = 53;

// ============================================================================
// Table Card
// ============================================================================

/// Table title bar, header, body and pagination footer
#[component]
pub fn StreetTable() -> Element {
    let actions = use_catalog_actions();

    let state = APP_STATE.read();
    let table = &state.session.table;
    let rows: Vec<StreetRow> = table.visible().into_iter().cloned().collect();
    let filler = table.filler_rows();
    let column = table.state.column();
    let direction = table.state.direction();
    let loading = state.session.is_loading();
    let filter_active = state.session.filter.is_active();
    drop(state);

    let filter_actions = actions.clone();
    let create_actions = actions.clone();

    rsx! {
        section {
            class: "table-card",

            // Title bar
            div {
                class: "table-toolbar",
                h2 { class: "table-title", id: "table-title", "Addresses" }
                if loading {
                    span { class: "table-loading", "Loading…" }
                }
                button {
                    class: if filter_active { "icon-button icon-button-active" } else { "icon-button" },
                    title: "Filter list",
                    onclick: move |_| filter_actions.toggle_filter_panel(),
                    "⛃"
                }
                button {
                    class: "icon-button",
                    title: "Add new street",
                    onclick: move |_| create_actions.open_creation(),
                    "＋"
                }
            }

            table {
                class: "street-table",
                "aria-labelledby": "table-title",

                thead {
                    tr {
                        for col in SortColumn::ALL {
                            SortHeader {
                                key: "{col.key()}",
                                column: col,
                                active: col == column,
                                direction: direction,
                            }
                        }
                    }
                }

                tbody {
                    if rows.is_empty() && filler == 0 {
                        tr {
                            td {
                                class: "empty-row",
                                colspan: "4",
                                if loading { "Loading streets…" } else { "No streets match the current filters" }
                            }
                        }
                    }

                    for row in rows {
                        tr {
                            key: "{row.id}",
                            class: "street-row",
                            th { scope: "row", "{row.street}" }
                            td { "{row.region}" }
                            td { "{row.province}" }
                            td { "{row.city}" }
                        }
                    }

                    if filler > 0 {
                        tr {
                            class: "filler-row",
                            style: "height: {filler * ROW_HEIGHT}px;",
                            td { colspan: "4" }
                        }
                    }
                }
            }

            TablePagination {}
        }
    }
}

// ============================================================================
// Header Cell
// ============================================================================

/// Clickable column header
#[component]
fn SortHeader(column: SortColumn, active: bool, direction: SortDirection) -> Element {
    let actions = use_catalog_actions();
    let arrow = header_arrow(active, direction);

    rsx! {
        th {
            class: if active { "sort-header sort-header-active" } else { "sort-header" },
            "aria-sort": aria_sort(active, direction),
            onclick: move |_| actions.request_sort(column),
            span { "{column.label()}" }
            span { class: "sort-arrow", "{arrow}" }
            if active {
                span { class: "visually-hidden", "{direction.description()}" }
            }
        }
    }
}

/// Arrow for a header; inactive headers show the ascending arrow dimmed
fn header_arrow(active: bool, direction: SortDirection) -> &'static str {
    if active {
        direction.arrow()
    } else {
        SortDirection::Ascending.arrow()
    }
}

fn aria_sort(active: bool, direction: SortDirection) -> &'static str {
    match (active, direction) {
        (false, _) => "none",
        (true, SortDirection::Ascending) => "ascending",
        (true, SortDirection::Descending) => "descending",
    }
}

// ============================================================================
// Pagination Footer
// ============================================================================

/// Rows-per-page selector, range label and page buttons
#[component]
fn TablePagination() -> Element {
    let actions = use_catalog_actions();

    let state = APP_STATE.read();
    let table = &state.session.table;
    let page_size = table.state.page_size();
    let label = table.range_label();
    let has_previous = table.state.has_previous();
    let has_next = table.has_next();
    drop(state);

    let size_actions = actions.clone();
    let previous_actions = actions.clone();

    rsx! {
        div {
            class: "table-pagination",

            span { class: "pagination-label", "Rows per page:" }
            select {
                class: "field select pagination-size",
                onchange: move |e| {
                    match e.value().parse::<usize>() {
                        Ok(size) => size_actions.set_page_size(size),
                        Err(err) => tracing::warn!("Invalid page size '{}': {}", e.value(), err),
                    }
                },
                for size in PAGE_SIZE_OPTIONS {
                    option {
                        key: "{size}",
                        value: "{size}",
                        selected: size == page_size,
                        "{size}"
                    }
                }
            }

            span { class: "pagination-range", "{label}" }

            button {
                class: "icon-button",
                title: "Previous page",
                disabled: !has_previous,
                onclick: move |_| previous_actions.previous_page(),
                "‹"
            }
            button {
                class: "icon-button",
                title: "Next page",
                disabled: !has_next,
                onclick: move |_| actions.next_page(),
                "›"
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_arrow() {
        assert_eq!(header_arrow(true, SortDirection::Descending), "▼");
        assert_eq!(header_arrow(false, SortDirection::Descending), "▲");
    }

    #[test]
    fn test_aria_sort() {
        assert_eq!(aria_sort(false, SortDirection::Descending), "none");
        assert_eq!(aria_sort(true, SortDirection::Ascending), "ascending");
        assert_eq!(aria_sort(true, SortDirection::Descending), "descending");
    }
}
