//! Everything the street catalog screen holds, in one place.
//!
//! `CatalogSession` combines the cascading filter, the search text, the
//! table and the creation form. Street list requests go through
//! [`QueryTicket`]s the same way option fetches go through
//! [`FetchTicket`]s: only the newest ticket may replace the rows.
//!
//! The async methods run a whole interaction (state change, request,
//! result) against an injected [`CatalogApi`]. The UI uses the ticketed
//! halves directly so no borrow is held while a request is in flight.

use catalog_client::{CatalogApi, StreetQuery, load_street_rows};
use catalog_core::{
    CatalogConfig, CatalogResult, CityId, Notifier, ProvinceId, RegionId, StreetId, StreetRow,
};

use crate::creation::CreationFlow;
use crate::filter::{CascadingFilter, FetchTicket};
use crate::table::{StreetTable, TableState};

// ============================================================================
// Query Ticket
// ============================================================================

/// A street list request and the generation it was issued at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: StreetQuery,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &StreetQuery {
        &self.query
    }

    /// Run the request
    pub async fn fetch(&self, api: &dyn CatalogApi) -> CatalogResult<Vec<StreetRow>> {
        load_street_rows(api, &self.query).await
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogSession {
    pub filter: CascadingFilter,
    pub table: StreetTable,
    pub creation: CreationFlow,
    search: String,
    filter_panel_open: bool,
    query_generation: u64,
    loading: bool,
}

impl CatalogSession {
    /// A session using the configured initial page size
    pub fn new(config: &CatalogConfig) -> Self {
        let state = TableState::with_page_size(config.page_size).unwrap_or_else(|e| {
            tracing::warn!("{}; using the default page size", e);
            TableState::default()
        });
        Self {
            table: StreetTable::new(state),
            ..Self::default()
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Store the raw search box contents; no request is made
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Whether a street list request is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_filter_panel_open(&self) -> bool {
        self.filter_panel_open
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filter_panel_open = !self.filter_panel_open;
    }

    pub fn close_filter_panel(&mut self) {
        self.filter_panel_open = false;
    }

    /// Filter selections and search text merged into one request
    pub fn current_query(&self) -> StreetQuery {
        self.filter.query().with_search(&self.search)
    }

    /// Start a street list request, superseding any outstanding one
    pub fn begin_query(&mut self) -> QueryTicket {
        self.query_generation += 1;
        self.loading = true;
        let query = self.current_query();
        tracing::debug!("Street query {}: {:?}", self.query_generation, query);
        QueryTicket {
            generation: self.query_generation,
            query,
        }
    }

    /// Apply a street list result; returns whether it was applied
    ///
    /// Results of superseded tickets are dropped. A failed request leaves
    /// the current rows in place and raises an error notification.
    pub fn resolve_query(
        &mut self,
        ticket: QueryTicket,
        result: CatalogResult<Vec<StreetRow>>,
        notifier: &dyn Notifier,
    ) -> bool {
        if ticket.generation != self.query_generation {
            tracing::warn!(
                "Discarding stale street list (query {}, current {})",
                ticket.generation,
                self.query_generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                self.table.replace(rows);
                true
            }
            Err(err) => {
                tracing::error!("Loading streets failed: {}", err);
                notifier.error(&format!("Error loading streets: {}", err.user_message()));
                false
            }
        }
    }

    /// Add a freshly created street after the displayed rows
    pub fn add_created(&mut self, row: StreetRow) {
        self.table.append(row);
    }

    // ========================================================================
    // Whole interactions
    // ========================================================================

    async fn run_query(&mut self, api: &dyn CatalogApi, notifier: &dyn Notifier) -> bool {
        let ticket = self.begin_query();
        let result = ticket.fetch(api).await;
        self.resolve_query(ticket, result, notifier)
    }

    async fn load_filter_options(
        &mut self,
        ticket: Option<FetchTicket>,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) {
        if let Some(ticket) = ticket {
            let result = ticket.fetch(api).await;
            self.filter.resolve(ticket, result, notifier);
        }
    }

    async fn load_form_options(
        &mut self,
        ticket: Option<FetchTicket>,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) {
        if let Some(ticket) = ticket {
            let result = ticket.fetch(api).await;
            self.creation.resolve(ticket, result, notifier);
        }
    }

    /// Load region options and the unfiltered street list
    pub async fn initialize(&mut self, api: &dyn CatalogApi, notifier: &dyn Notifier) {
        tracing::info!("Loading street catalog");
        let ticket = self.filter.load_regions();
        self.load_filter_options(Some(ticket), api, notifier).await;
        self.run_query(api, notifier).await;
    }

    pub async fn select_region(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        id: Option<RegionId>,
    ) {
        let ticket = self.filter.select_region(id);
        self.load_filter_options(ticket, api, notifier).await;
    }

    pub async fn select_province(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        id: Option<ProvinceId>,
    ) {
        let ticket = self.filter.select_province(id);
        self.load_filter_options(ticket, api, notifier).await;
    }

    pub async fn select_city(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        id: Option<CityId>,
    ) {
        let ticket = self.filter.select_city(id);
        self.load_filter_options(ticket, api, notifier).await;
    }

    pub fn select_street(&mut self, id: Option<StreetId>) {
        self.filter.select_street(id);
    }

    /// Close the filter panel and query with the current selections
    pub async fn apply_filters(&mut self, api: &dyn CatalogApi, notifier: &dyn Notifier) -> bool {
        self.close_filter_panel();
        self.run_query(api, notifier).await
    }

    /// Clear every filter selection and query again; the search text stays
    pub async fn reset_filters(&mut self, api: &dyn CatalogApi, notifier: &dyn Notifier) -> bool {
        self.filter.reset();
        self.run_query(api, notifier).await
    }

    /// Query with new search text (already debounced by the caller)
    pub async fn search(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        text: &str,
    ) -> bool {
        self.set_search_text(text);
        self.run_query(api, notifier).await
    }

    /// Show the creation form, loading its region options if needed
    pub async fn open_creation(&mut self, api: &dyn CatalogApi, notifier: &dyn Notifier) {
        let ticket = self.creation.open();
        self.load_form_options(ticket, api, notifier).await;
    }

    pub async fn select_form_region(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        id: Option<RegionId>,
    ) {
        let ticket = self.creation.select_region(id);
        self.load_form_options(ticket, api, notifier).await;
    }

    pub async fn select_form_province(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
        id: Option<ProvinceId>,
    ) {
        let ticket = self.creation.select_province(id);
        self.load_form_options(ticket, api, notifier).await;
    }

    /// Submit the creation form; a created street is appended to the rows
    pub async fn submit_creation(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> bool {
        match self.creation.submit(api, notifier).await {
            Some(row) => {
                self.add_created(row);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::Debouncer;
    use crate::testing::FakeApi;
    use catalog_core::{CatalogError, LocationId, NotificationLevel, RecordingNotifier, SortColumn};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn id(raw: i64) -> LocationId {
        LocationId::new(raw)
    }

    fn street_names(session: &CatalogSession) -> Vec<String> {
        session
            .table
            .sorted()
            .into_iter()
            .map(|row| row.street.clone())
            .collect()
    }

    async fn initialized(api: &FakeApi, notifier: &RecordingNotifier) -> CatalogSession {
        let mut session = CatalogSession::new(&CatalogConfig::default());
        session.initialize(api, notifier).await;
        api.clear_calls();
        session
    }

    #[tokio::test]
    async fn test_initialize_loads_regions_and_rows() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = CatalogSession::new(&CatalogConfig::default());

        session.initialize(&api, &notifier).await;

        assert_eq!(session.filter.path.regions.options().len(), 2);
        assert_eq!(street_names(&session), vec!["Alameda", "Avenida Libertad", "Bandera"]);
        assert_eq!(api.calls(), vec!["regions", "streets"]);
        assert!(!session.is_loading());
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_failed_region_load_notifies_once() {
        let api = FakeApi::new();
        api.fail("regions");
        let notifier = RecordingNotifier::new();
        let mut session = CatalogSession::default();

        session.initialize(&api, &notifier).await;

        assert!(session.filter.path.regions.options().is_empty());
        assert!(!session.filter.path.regions.is_loading());
        assert_eq!(
            notifier.messages(NotificationLevel::Error),
            vec!["Error loading regions: regions unavailable"]
        );
        assert_eq!(session.table.len(), 3);
    }

    #[tokio::test]
    async fn test_filters_and_search_share_one_query() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.select_region(&api, &notifier, Some(id(13))).await;
        session.select_province(&api, &notifier, Some(id(131))).await;
        session.select_city(&api, &notifier, Some(id(1301))).await;
        session.toggle_filter_panel();
        assert!(session.apply_filters(&api, &notifier).await);
        assert!(!session.is_filter_panel_open());
        assert_eq!(street_names(&session), vec!["Alameda", "Bandera"]);

        assert!(session.search(&api, &notifier, " band ").await);
        assert_eq!(street_names(&session), vec!["Bandera"]);

        assert_eq!(
            api.calls(),
            vec![
                "provinces?region_id=13",
                "cities?province_id=131",
                "streets?city_id=1301",
                "streets?city_id=1301&province_id=131&region_id=13",
                "streets?city_id=1301&province_id=131&region_id=13&search=band",
            ]
        );
    }

    #[tokio::test]
    async fn test_selected_street_is_fetched_by_id() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.select_region(&api, &notifier, Some(id(13))).await;
        session.select_province(&api, &notifier, Some(id(131))).await;
        session.select_city(&api, &notifier, Some(id(1301))).await;
        session.select_street(Some(id(2)));
        api.clear_calls();

        session.apply_filters(&api, &notifier).await;

        assert_eq!(street_names(&session), vec!["Bandera"]);
        assert_eq!(api.calls(), vec!["streets/2"]);
    }

    #[tokio::test]
    async fn test_reset_filters_keeps_search() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.select_region(&api, &notifier, Some(id(5))).await;
        session.set_search_text("a");
        session.apply_filters(&api, &notifier).await;
        assert_eq!(street_names(&session), vec!["Avenida Libertad"]);
        api.clear_calls();

        session.reset_filters(&api, &notifier).await;

        assert!(!session.filter.is_active());
        assert_eq!(session.search_text(), "a");
        assert_eq!(street_names(&session), vec!["Alameda", "Avenida Libertad", "Bandera"]);
        assert_eq!(api.calls(), vec!["streets?search=a"]);
    }

    #[tokio::test]
    async fn test_stale_street_list_is_discarded() {
        let notifier = RecordingNotifier::new();
        let mut session = CatalogSession::default();

        let first = session.begin_query();
        session.set_search_text("alameda");
        let second = session.begin_query();

        let row = |name: &str| StreetRow {
            id: id(1),
            street: name.to_string(),
            city_id: id(1301),
            city: "Santiago Centro".to_string(),
            province_id: None,
            province: "Santiago".to_string(),
            region_id: None,
            region: "Metropolitana".to_string(),
        };

        assert!(session.resolve_query(second, Ok(vec![row("Alameda")]), &notifier));
        assert!(!session.resolve_query(first, Ok(vec![row("Old"), row("Older")]), &notifier));
        assert_eq!(street_names(&session), vec!["Alameda"]);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_failed_street_list_keeps_rows() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        let ticket = session.begin_query();
        let applied =
            session.resolve_query(ticket, Err(CatalogError::request("connection reset")), &notifier);

        assert!(!applied);
        assert_eq!(session.table.len(), 3);
        assert!(!session.is_loading());
        assert_eq!(notifier.messages(NotificationLevel::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_new_results_reset_page() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.table.state.set_page(3);
        session.table.state.request_sort(SortColumn::City);
        session.search(&api, &notifier, "avenida").await;

        assert_eq!(session.table.state.page(), 0);
        assert_eq!(session.table.state.column(), SortColumn::City);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_sends_one_search() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;
        let debouncer = Debouncer::new(Duration::from_millis(500));

        let typed = tokio::join!(
            debouncer.debounce("a"),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                debouncer.debounce("ab").await
            },
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                debouncer.debounce("abc").await
            },
        );

        for text in [typed.0, typed.1, typed.2].into_iter().flatten() {
            session.search(&api, &notifier, text).await;
        }

        assert_eq!(api.calls(), vec!["streets?search=abc"]);
        assert_eq!(session.search_text(), "abc");
        assert!(session.table.is_empty());
    }

    #[tokio::test]
    async fn test_created_street_is_appended() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.open_creation(&api, &notifier).await;
        assert!(session.creation.is_open());
        session.select_form_region(&api, &notifier, Some(id(5))).await;
        session.select_form_province(&api, &notifier, Some(id(51))).await;
        session.creation.select_city(Some(id(5101)));
        session.creation.set_name("Quinta");

        assert!(session.submit_creation(&api, &notifier).await);

        let last = session.table.rows().last().unwrap();
        assert_eq!(last.street, "Quinta");
        assert_eq!(last.region, "Valparaíso");
        assert_eq!(session.table.len(), 4);
        assert!(!session.creation.is_open());
        // The table filter was not touched by the form's cascade
        assert!(!session.filter.is_active());
        assert_eq!(
            api.calls(),
            vec![
                "regions",
                "provinces?region_id=5",
                "cities?province_id=51",
                "create Quinta",
            ]
        );
    }

    #[tokio::test]
    async fn test_incomplete_creation_makes_no_call() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut session = initialized(&api, &notifier).await;

        session.open_creation(&api, &notifier).await;
        session.creation.set_name("Quinta");
        api.clear_calls();

        assert!(!session.submit_creation(&api, &notifier).await);
        assert!(api.calls().is_empty());
        assert_eq!(session.table.len(), 3);
        assert_eq!(
            notifier.messages(NotificationLevel::Error),
            vec!["Please complete all fields (Region, Province, City)."]
        );
    }
}
