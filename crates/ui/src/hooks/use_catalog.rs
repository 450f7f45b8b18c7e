//! # Catalog Actions Hook
//!
//! Every user interaction that touches the backend goes through
//! [`CatalogActions`]. Each action changes [`APP_STATE`] synchronously,
//! releases the borrow, and runs the request in a spawned task; the task
//! applies the result with the ticket it was given, so a response that
//! arrives after a newer interaction is discarded by the state layer.
//!
//! Tasks are spawned on the root scope with `spawn_forever`. Most actions
//! fire from inside a dialog that closes in the same event, and a task
//! owned by the dialog would be dropped with it.

use catalog_client::CatalogApi;
use catalog_core::{CityId, Notifier, ProvinceId, RegionId, SortColumn, StreetId};
use catalog_state::{Debouncer, FetchTicket};
use dioxus::prelude::*;
use std::sync::Arc;

use crate::services::Services;
use crate::state::{APP_STATE, ToastQueue};

// ============================================================================
// Actions
// ============================================================================

/// Handle for running catalog interactions from event handlers
#[derive(Clone)]
pub struct CatalogActions {
    api: Arc<dyn CatalogApi>,
    debouncer: Debouncer,
}

impl CatalogActions {
    pub fn new(services: &Services) -> Self {
        Self {
            api: services.api.clone(),
            debouncer: Debouncer::new(services.config.search_debounce),
        }
    }

    // ------------------------------------------------------------------------
    // Background requests
    // ------------------------------------------------------------------------

    fn load_filter_options(&self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else { return };
        let api = self.api.clone();
        spawn_forever(async move {
            let result = ticket.fetch(api.as_ref()).await;
            let toasts = ToastQueue::new();
            APP_STATE
                .write()
                .session
                .filter
                .resolve(ticket, result, &toasts);
            toasts.flush();
        });
    }

    fn load_form_options(&self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else { return };
        let api = self.api.clone();
        spawn_forever(async move {
            let result = ticket.fetch(api.as_ref()).await;
            let toasts = ToastQueue::new();
            APP_STATE
                .write()
                .session
                .creation
                .resolve(ticket, result, &toasts);
            toasts.flush();
        });
    }

    fn run_query(&self) {
        let ticket = APP_STATE.write().session.begin_query();
        let api = self.api.clone();
        spawn_forever(async move {
            let result = ticket.fetch(api.as_ref()).await;
            let toasts = ToastQueue::new();
            APP_STATE
                .write()
                .session
                .resolve_query(ticket, result, &toasts);
            toasts.flush();
        });
    }

    // ------------------------------------------------------------------------
    // Filter & search
    // ------------------------------------------------------------------------

    /// Load region options and the unfiltered street list
    pub fn initialize(&self) {
        tracing::info!("Loading street catalog");
        let ticket = APP_STATE.write().session.filter.load_regions();
        self.load_filter_options(Some(ticket));
        self.run_query();
    }

    pub fn select_region(&self, id: Option<RegionId>) {
        let ticket = APP_STATE.write().session.filter.select_region(id);
        self.load_filter_options(ticket);
    }

    pub fn select_province(&self, id: Option<ProvinceId>) {
        let ticket = APP_STATE.write().session.filter.select_province(id);
        self.load_filter_options(ticket);
    }

    pub fn select_city(&self, id: Option<CityId>) {
        let ticket = APP_STATE.write().session.filter.select_city(id);
        self.load_filter_options(ticket);
    }

    pub fn select_street(&self, id: Option<StreetId>) {
        APP_STATE.write().session.select_street(id);
    }

    pub fn toggle_filter_panel(&self) {
        APP_STATE.write().session.toggle_filter_panel();
    }

    pub fn apply_filters(&self) {
        APP_STATE.write().session.close_filter_panel();
        self.run_query();
    }

    /// Clear the filter and query again; the search text is kept
    pub fn reset_filters(&self) {
        APP_STATE.write().session.filter.reset();
        self.run_query();
    }

    /// Record a keystroke; the query is sent once typing pauses
    pub fn search_input(&self, text: String) {
        APP_STATE.write().session.set_search_text(text.clone());
        let this = self.clone();
        spawn_forever(async move {
            if this.debouncer.debounce(text).await.is_some() {
                this.run_query();
            }
        });
    }

    // ------------------------------------------------------------------------
    // Table
    // ------------------------------------------------------------------------

    pub fn request_sort(&self, column: SortColumn) {
        APP_STATE.write().session.table.state.request_sort(column);
    }

    pub fn set_page_size(&self, size: usize) {
        let toasts = ToastQueue::new();
        if let Err(e) = APP_STATE.write().session.table.state.set_page_size(size) {
            toasts.error(&e.user_message());
        }
        toasts.flush();
    }

    pub fn next_page(&self) {
        APP_STATE.write().session.table.next_page();
    }

    pub fn previous_page(&self) {
        APP_STATE.write().session.table.previous_page();
    }

    // ------------------------------------------------------------------------
    // Creation form
    // ------------------------------------------------------------------------

    pub fn open_creation(&self) {
        let ticket = APP_STATE.write().session.creation.open();
        self.load_form_options(ticket);
    }

    pub fn close_creation(&self) {
        APP_STATE.write().session.creation.close();
    }

    pub fn select_form_region(&self, id: Option<RegionId>) {
        let ticket = APP_STATE.write().session.creation.select_region(id);
        self.load_form_options(ticket);
    }

    pub fn select_form_province(&self, id: Option<ProvinceId>) {
        let ticket = APP_STATE.write().session.creation.select_province(id);
        self.load_form_options(ticket);
    }

    pub fn select_form_city(&self, id: Option<CityId>) {
        APP_STATE.write().session.creation.select_city(id);
    }

    pub fn set_form_name(&self, name: String) {
        APP_STATE.write().session.creation.set_name(name);
    }

    pub fn reset_form(&self) {
        APP_STATE.write().session.creation.reset_fields();
    }

    /// Validate and send the creation form
    pub fn submit_creation(&self) {
        let toasts = ToastQueue::new();
        let new_street = APP_STATE.write().session.creation.begin_submit(&toasts);
        toasts.flush();
        let Some(new_street) = new_street else { return };

        let api = self.api.clone();
        spawn_forever(async move {
            let result = api.create_street(&new_street).await;
            let toasts = ToastQueue::new();
            {
                let mut state = APP_STATE.write();
                match result {
                    Ok(created) => {
                        let row = state.session.creation.complete(new_street, created, &toasts);
                        state.session.add_created(row);
                    }
                    Err(err) => state.session.creation.fail(err, &toasts),
                }
            }
            toasts.flush();
        });
    }

    // ------------------------------------------------------------------------
    // Shell
    // ------------------------------------------------------------------------

    pub fn toggle_theme(&self) {
        APP_STATE.write().ui.toggle_dark_mode();
    }

    pub fn dismiss_toast(&self, id: uuid::Uuid) {
        APP_STATE.write().ui.dismiss_toast(id);
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Actions provided by the root component
pub fn use_catalog_actions() -> CatalogActions {
    use_context::<CatalogActions>()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_client::StreetQuery;
    use catalog_core::{
        CatalogConfig, CatalogResult, City, CreatedStreet, LocationId, NewStreet, Province, Region,
        Street,
    };
    use dioxus_core::{NoOpMutations, ScopeId, VirtualDom};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::state::{AppState, init_app_state};

    /// Backend that answers from a fixed street list and records each call
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    fn street(id: i64, name: &str, city_id: i64) -> Street {
        Street {
            id: LocationId::new(id),
            name: name.to_string(),
            city_id: LocationId::new(city_id),
            city: Some(format!("City {}", city_id)),
            province_id: Some(LocationId::new(131)),
            province: Some("Santiago".to_string()),
            region_id: Some(LocationId::new(13)),
            region: Some("Metropolitana".to_string()),
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn regions(&self) -> CatalogResult<Vec<Region>> {
            self.record("regions");
            Ok(vec![Region::new(13, "Metropolitana")])
        }

        async fn provinces(&self, region_id: RegionId) -> CatalogResult<Vec<Province>> {
            self.record(format!("provinces {}", region_id));
            Ok(vec![Province::new(131, "Santiago", 13)])
        }

        async fn all_provinces(&self) -> CatalogResult<Vec<Province>> {
            self.record("all provinces");
            Ok(vec![Province::new(131, "Santiago", 13)])
        }

        async fn cities(&self, province_id: ProvinceId) -> CatalogResult<Vec<City>> {
            self.record(format!("cities {}", province_id));
            Ok(vec![City::new(1301, "Santiago Centro", 131)])
        }

        async fn all_cities(&self) -> CatalogResult<Vec<City>> {
            self.record("all cities");
            Ok(vec![City::new(1301, "Santiago Centro", 131)])
        }

        async fn streets(&self, query: &StreetQuery) -> CatalogResult<Vec<Street>> {
            self.record("streets");
            let all = vec![street(1, "Alameda", 1301), street(2, "Bandera", 1302)];
            Ok(all
                .into_iter()
                .filter(|s| query.city_id.is_none_or(|id| s.city_id == id))
                .collect())
        }

        async fn street(&self, id: StreetId) -> CatalogResult<Street> {
            self.record(format!("street {}", id));
            Ok(street(id.get(), "Alameda", 1301))
        }

        async fn create_street(&self, new_street: &NewStreet) -> CatalogResult<CreatedStreet> {
            self.record(format!("create {}", new_street.name));
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(CreatedStreet {
                id: LocationId::new(42),
            })
        }
    }

    // ------------------------------------------------------------------------
    // Headless harness
    // ------------------------------------------------------------------------

    /// What the dialog does as soon as it mounts
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Interaction {
        /// Filter to one city and press Apply
        ApplyCityFilter,
        /// Fill the form, press Create and close the dialog right away
        SubmitThenClose,
    }

    #[derive(Clone)]
    struct Harness {
        services: Services,
        interaction: Interaction,
    }

    fn harness(props: Harness) -> Element {
        use_hook(|| {
            init_app_state(&props.services.config);
            let mut state = APP_STATE.write();
            match props.interaction {
                Interaction::ApplyCityFilter => {
                    let session = &mut state.session;
                    session.toggle_filter_panel();
                    session.filter.select_region(Some(LocationId::new(13)));
                    session.filter.select_province(Some(LocationId::new(131)));
                    session.filter.select_city(Some(LocationId::new(1301)));
                }
                Interaction::SubmitThenClose => {
                    let creation = &mut state.session.creation;
                    creation.open();
                    creation.select_region(Some(LocationId::new(13)));
                    creation.select_province(Some(LocationId::new(131)));
                    creation.select_city(Some(LocationId::new(1301)));
                    creation.set_name("Nueva Alameda");
                }
            }
        });
        use_context_provider(|| CatalogActions::new(&props.services));

        let state = APP_STATE.read();
        let dialog_open = state.session.is_filter_panel_open() || state.session.creation.is_open();
        drop(state);

        rsx! {
            if dialog_open {
                Dialog { interaction: props.interaction }
            }
        }
    }

    /// Stands in for a modal whose button handler closes the modal
    #[component]
    fn Dialog(interaction: Interaction) -> Element {
        let actions = use_catalog_actions();
        use_hook(move || {
            spawn(async move {
                match interaction {
                    Interaction::ApplyCityFilter => actions.apply_filters(),
                    Interaction::SubmitThenClose => {
                        actions.submit_creation();
                        actions.close_creation();
                    }
                }
            })
        });
        rsx! { div { class: "dialog" } }
    }

    fn mount(interaction: Interaction) -> VirtualDom {
        let services = Services {
            config: CatalogConfig {
                notification_ttl: Duration::from_secs(60),
                ..CatalogConfig::default()
            },
            api: Arc::new(FakeApi::default()),
        };
        let mut dom = VirtualDom::new_with_props(harness, Harness { services, interaction });
        dom.rebuild_in_place();
        dom
    }

    /// Poll tasks and re-render until nothing is left to do soon
    async fn settle(dom: &mut VirtualDom) {
        for _ in 0..50 {
            let work = tokio::time::timeout(Duration::from_millis(200), dom.wait_for_work());
            if work.await.is_err() {
                break;
            }
            dom.render_immediate(&mut NoOpMutations);
        }
    }

    fn snapshot(dom: &VirtualDom) -> AppState {
        dom.in_scope(ScopeId::ROOT, || APP_STATE.read().clone())
    }

    #[tokio::test]
    async fn test_apply_updates_rows_after_panel_closes() {
        let mut dom = mount(Interaction::ApplyCityFilter);
        assert!(snapshot(&dom).session.is_filter_panel_open());

        settle(&mut dom).await;

        let state = snapshot(&dom);
        assert!(!state.session.is_filter_panel_open());
        assert!(!state.session.is_loading());
        let streets: Vec<_> = state.session.table.rows().iter().map(|r| r.street.as_str()).collect();
        assert_eq!(streets, vec!["Alameda"]);
    }

    #[tokio::test]
    async fn test_closing_form_mid_submit_still_completes() {
        let mut dom = mount(Interaction::SubmitThenClose);
        assert!(snapshot(&dom).session.creation.is_open());

        settle(&mut dom).await;

        let state = snapshot(&dom);
        assert!(!state.session.creation.is_submitting());
        assert!(!state.session.creation.is_open());
        assert_eq!(state.session.creation.name(), "");

        let created: Vec<_> = state
            .session
            .table
            .rows()
            .iter()
            .map(|r| (r.id, r.street.as_str()))
            .collect();
        assert_eq!(created, vec![(LocationId::new(42), "Nueva Alameda")]);

        let toasts: Vec<_> = state.ui.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(toasts, vec!["Street created successfully"]);
    }
}
