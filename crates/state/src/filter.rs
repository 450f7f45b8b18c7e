//! Cascading location filter.
//!
//! Each level of the region → province → city → street hierarchy is an
//! [`OptionList`]. Choosing a value at one level clears every level below
//! it and hands back a [`FetchTicket`] for the next level's options. The
//! ticket carries the generation of the list it was issued for; a result
//! whose ticket is older than the list's current generation belongs to a
//! superseded selection and is dropped.

use catalog_client::{CatalogApi, StreetQuery};
use catalog_core::{
    CatalogEntry, CatalogError, CatalogResult, City, CityId, LocationId, Notifier, Province,
    ProvinceId, Region, RegionId, Street, StreetId,
};

// ============================================================================
// Levels & Tickets
// ============================================================================

/// One level of the location hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationLevel {
    Region,
    Province,
    City,
    Street,
}

impl LocationLevel {
    /// Field label shown next to the selector
    pub fn label(&self) -> &'static str {
        match self {
            LocationLevel::Region => "Region",
            LocationLevel::Province => "Province",
            LocationLevel::City => "City",
            LocationLevel::Street => "Street",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            LocationLevel::Region => "regions",
            LocationLevel::Province => "provinces",
            LocationLevel::City => "cities",
            LocationLevel::Street => "streets",
        }
    }
}

/// Proof that an option fetch was started, and for which generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    level: LocationLevel,
    generation: u64,
    parent: Option<LocationId>,
}

impl FetchTicket {
    pub fn level(&self) -> LocationLevel {
        self.level
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the selected parent the options are scoped to
    pub fn parent(&self) -> Option<LocationId> {
        self.parent
    }

    /// Perform the request this ticket stands for
    pub async fn fetch(&self, api: &dyn CatalogApi) -> CatalogResult<Fetched> {
        match (self.level, self.parent) {
            (LocationLevel::Region, _) => api.regions().await.map(Fetched::Regions),
            (LocationLevel::Province, Some(region)) => {
                api.provinces(region).await.map(Fetched::Provinces)
            }
            (LocationLevel::Province, None) => api.all_provinces().await.map(Fetched::Provinces),
            (LocationLevel::City, Some(province)) => api.cities(province).await.map(Fetched::Cities),
            (LocationLevel::City, None) => api.all_cities().await.map(Fetched::Cities),
            (LocationLevel::Street, city) => api
                .streets(&StreetQuery::new().with_city(city))
                .await
                .map(Fetched::Streets),
        }
    }
}

/// Options returned by [`FetchTicket::fetch`]
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Regions(Vec<Region>),
    Provinces(Vec<Province>),
    Cities(Vec<City>),
    Streets(Vec<Street>),
}

impl Fetched {
    fn level(&self) -> LocationLevel {
        match self {
            Fetched::Regions(_) => LocationLevel::Region,
            Fetched::Provinces(_) => LocationLevel::Province,
            Fetched::Cities(_) => LocationLevel::City,
            Fetched::Streets(_) => LocationLevel::Street,
        }
    }

    fn mismatch(self, expected: LocationLevel) -> CatalogError {
        CatalogError::internal(format!(
            "expected {}, received {}",
            expected.plural(),
            self.level().plural()
        ))
    }
}

/// Outcome of applying a fetch result
#[derive(Debug)]
pub enum Resolution {
    /// Options replaced; carries how many arrived
    Applied(usize),
    /// The ticket was superseded; nothing changed
    Stale,
    /// The fetch failed; the level was left empty
    Failed(CatalogError),
}

impl Resolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, Resolution::Applied(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Resolution::Stale)
    }

    /// Raise the error notification for a failed fetch
    fn report(self, level: LocationLevel, notifier: &dyn Notifier) -> Self {
        if let Resolution::Failed(err) = &self {
            tracing::error!("Loading {} failed: {}", level.plural(), err);
            notifier.error(&format!(
                "Error loading {}: {}",
                level.plural(),
                err.user_message()
            ));
        }
        self
    }
}

// ============================================================================
// Option List
// ============================================================================

/// Options, selection and fetch bookkeeping for a single level
#[derive(Debug, Clone, PartialEq)]
pub struct OptionList<T> {
    level: LocationLevel,
    options: Vec<T>,
    selected: Option<LocationId>,
    loading: bool,
    generation: u64,
}

impl<T: CatalogEntry> OptionList<T> {
    pub fn new(level: LocationLevel) -> Self {
        Self {
            level,
            options: Vec::new(),
            selected: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn level(&self) -> LocationLevel {
        self.level
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn selected(&self) -> Option<LocationId> {
        self.selected
    }

    /// The option record matching the selection, if it is loaded
    pub fn selected_entry(&self) -> Option<&T> {
        let id = self.selected?;
        self.options.iter().find(|option| option.id() == id)
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_entry().map(CatalogEntry::name)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select(&mut self, id: Option<LocationId>) {
        self.selected = id;
    }

    /// Start a new fetch, invalidating any outstanding ticket
    pub fn begin_fetch(&mut self, parent: Option<LocationId>) -> FetchTicket {
        self.generation += 1;
        self.options.clear();
        self.loading = true;
        tracing::debug!(
            "Fetching {} (generation {}, parent {:?})",
            self.level.plural(),
            self.generation,
            parent
        );
        FetchTicket {
            level: self.level,
            generation: self.generation,
            parent,
        }
    }

    /// Drop options and selection, invalidating any outstanding ticket
    pub fn clear(&mut self) {
        self.generation += 1;
        self.options.clear();
        self.selected = None;
        self.loading = false;
    }

    /// Apply a fetch result if the ticket is still current
    pub fn resolve(&mut self, ticket: FetchTicket, result: CatalogResult<Vec<T>>) -> Resolution {
        if ticket.level != self.level || ticket.generation != self.generation {
            tracing::warn!(
                "Discarding stale {} response (generation {}, current {})",
                self.level.plural(),
                ticket.generation,
                self.generation
            );
            return Resolution::Stale;
        }

        self.loading = false;
        match result {
            Ok(options) => {
                let count = options.len();
                self.options = options;
                Resolution::Applied(count)
            }
            Err(err) => {
                self.options.clear();
                Resolution::Failed(err)
            }
        }
    }
}

// ============================================================================
// Location Path (region → province → city)
// ============================================================================

/// The three administrative levels, shared by the filter and the creation form
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPath {
    pub regions: OptionList<Region>,
    pub provinces: OptionList<Province>,
    pub cities: OptionList<City>,
}

impl Default for LocationPath {
    fn default() -> Self {
        Self {
            regions: OptionList::new(LocationLevel::Region),
            provinces: OptionList::new(LocationLevel::Province),
            cities: OptionList::new(LocationLevel::City),
        }
    }
}

impl LocationPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_regions(&mut self) -> FetchTicket {
        self.regions.begin_fetch(None)
    }

    /// Choose a region; provinces and cities are cleared
    pub fn select_region(&mut self, id: Option<RegionId>) -> Option<FetchTicket> {
        self.regions.select(id);
        self.provinces.clear();
        self.cities.clear();
        id.map(|id| self.provinces.begin_fetch(Some(id)))
    }

    /// Choose a province; cities are cleared
    pub fn select_province(&mut self, id: Option<ProvinceId>) -> Option<FetchTicket> {
        self.provinces.select(id);
        self.cities.clear();
        id.map(|id| self.cities.begin_fetch(Some(id)))
    }

    pub fn select_city(&mut self, id: Option<CityId>) {
        self.cities.select(id);
    }

    pub fn resolve_regions(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Vec<Region>>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        self.regions
            .resolve(ticket, result)
            .report(LocationLevel::Region, notifier)
    }

    pub fn resolve_provinces(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Vec<Province>>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        self.provinces
            .resolve(ticket, result)
            .report(LocationLevel::Province, notifier)
    }

    pub fn resolve_cities(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Vec<City>>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        self.cities
            .resolve(ticket, result)
            .report(LocationLevel::City, notifier)
    }

    /// Apply any level's fetch result
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Fetched>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        match ticket.level {
            LocationLevel::Region => {
                let result = result.and_then(|fetched| match fetched {
                    Fetched::Regions(regions) => Ok(regions),
                    other => Err(other.mismatch(LocationLevel::Region)),
                });
                self.resolve_regions(ticket, result, notifier)
            }
            LocationLevel::Province => {
                let result = result.and_then(|fetched| match fetched {
                    Fetched::Provinces(provinces) => Ok(provinces),
                    other => Err(other.mismatch(LocationLevel::Province)),
                });
                self.resolve_provinces(ticket, result, notifier)
            }
            LocationLevel::City => {
                let result = result.and_then(|fetched| match fetched {
                    Fetched::Cities(cities) => Ok(cities),
                    other => Err(other.mismatch(LocationLevel::City)),
                });
                self.resolve_cities(ticket, result, notifier)
            }
            LocationLevel::Street => {
                tracing::warn!("Street ticket resolved against a location path");
                Resolution::Stale
            }
        }
    }

    pub fn region_id(&self) -> Option<RegionId> {
        self.regions.selected()
    }

    pub fn province_id(&self) -> Option<ProvinceId> {
        self.provinces.selected()
    }

    pub fn city_id(&self) -> Option<CityId> {
        self.cities.selected()
    }

    /// Clear every selection; loaded region options survive
    pub fn clear_selections(&mut self) {
        self.regions.select(None);
        self.provinces.clear();
        self.cities.clear();
    }

    /// Levels without a selection, top-down
    pub fn missing_levels(&self) -> Vec<LocationLevel> {
        [
            (LocationLevel::Region, self.region_id()),
            (LocationLevel::Province, self.province_id()),
            (LocationLevel::City, self.city_id()),
        ]
        .into_iter()
        .filter_map(|(level, selected)| selected.is_none().then_some(level))
        .collect()
    }
}

// ============================================================================
// Cascading Filter
// ============================================================================

/// The table's structured filter: a location path plus a street level
#[derive(Debug, Clone, PartialEq)]
pub struct CascadingFilter {
    pub path: LocationPath,
    pub streets: OptionList<Street>,
}

impl Default for CascadingFilter {
    fn default() -> Self {
        Self {
            path: LocationPath::default(),
            streets: OptionList::new(LocationLevel::Street),
        }
    }
}

impl CascadingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_regions(&mut self) -> FetchTicket {
        self.path.load_regions()
    }

    /// Choose a region; province, city and street are cleared
    pub fn select_region(&mut self, id: Option<RegionId>) -> Option<FetchTicket> {
        self.streets.clear();
        self.path.select_region(id)
    }

    /// Choose a province; city and street are cleared
    pub fn select_province(&mut self, id: Option<ProvinceId>) -> Option<FetchTicket> {
        self.streets.clear();
        self.path.select_province(id)
    }

    /// Choose a city; street is cleared
    pub fn select_city(&mut self, id: Option<CityId>) -> Option<FetchTicket> {
        self.path.select_city(id);
        self.streets.clear();
        id.map(|id| self.streets.begin_fetch(Some(id)))
    }

    pub fn select_street(&mut self, id: Option<StreetId>) {
        self.streets.select(id);
    }

    pub fn resolve_streets(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Vec<Street>>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        self.streets
            .resolve(ticket, result)
            .report(LocationLevel::Street, notifier)
    }

    /// Apply any level's fetch result
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Fetched>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        if ticket.level != LocationLevel::Street {
            return self.path.resolve(ticket, result, notifier);
        }

        let result = result.and_then(|fetched| match fetched {
            Fetched::Streets(streets) => Ok(streets),
            other => Err(other.mismatch(LocationLevel::Street)),
        });
        self.resolve_streets(ticket, result, notifier)
    }

    pub fn street_id(&self) -> Option<StreetId> {
        self.streets.selected()
    }

    /// Whether any level has a selection
    pub fn is_active(&self) -> bool {
        self.path.region_id().is_some()
            || self.path.province_id().is_some()
            || self.path.city_id().is_some()
            || self.street_id().is_some()
    }

    /// A street query carrying every selected id
    pub fn query(&self) -> StreetQuery {
        StreetQuery::new()
            .with_region(self.path.region_id())
            .with_province(self.path.province_id())
            .with_city(self.path.city_id())
            .with_street(self.street_id())
    }

    /// Clear every selection; region options are kept
    pub fn reset(&mut self) {
        self.path.clear_selections();
        self.streets.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
