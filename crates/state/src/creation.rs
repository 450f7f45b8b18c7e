//! The "new street" form.
//!
//! The form has its own region → province → city cascade, independent of
//! the table filter, and a street name. Submission is split into
//! [`CreationFlow::begin_submit`], the backend call, and
//! [`CreationFlow::complete`] / [`CreationFlow::fail`] so the UI can run
//! the request without holding the state borrowed; [`CreationFlow::submit`]
//! chains the three.

use catalog_client::CatalogApi;
use catalog_core::{
    CatalogError, CatalogResult, CityId, CreatedStreet, NewStreet, Notifier, ProvinceId, RegionId,
    StreetRow, Validatable,
};

use crate::filter::{FetchTicket, Fetched, LocationPath, Resolution};

/// Label used for the name field in validation messages
pub const NAME_FIELD: &str = "Street name";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreationFlow {
    pub path: LocationPath,
    name: String,
    open: bool,
    submitting: bool,
}

impl CreationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the form; returns a ticket when region options still need loading
    pub fn open(&mut self) -> Option<FetchTicket> {
        self.open = true;
        let regions = &self.path.regions;
        (regions.options().is_empty() && !regions.is_loading()).then(|| self.path.load_regions())
    }

    /// Hide the form; entered values are kept
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn select_region(&mut self, id: Option<RegionId>) -> Option<FetchTicket> {
        self.path.select_region(id)
    }

    pub fn select_province(&mut self, id: Option<ProvinceId>) -> Option<FetchTicket> {
        self.path.select_province(id)
    }

    pub fn select_city(&mut self, id: Option<CityId>) {
        self.path.select_city(id);
    }

    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: CatalogResult<Fetched>,
        notifier: &dyn Notifier,
    ) -> Resolution {
        self.path.resolve(ticket, result, notifier)
    }

    /// Clear every field without closing the form
    pub fn reset_fields(&mut self) {
        self.path.clear_selections();
        self.name.clear();
    }

    /// Labels of the empty required fields, in form order
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .path
            .missing_levels()
            .into_iter()
            .map(|level| level.label().to_string())
            .collect();
        if self.name.trim().is_empty() {
            missing.push(NAME_FIELD.to_string());
        }
        missing
    }

    /// Validate and build the request payload
    ///
    /// Validation failures are reported through `notifier` and never reach
    /// the backend. Returns `None` while a submission is already running.
    pub fn begin_submit(&mut self, notifier: &dyn Notifier) -> Option<NewStreet> {
        if self.submitting {
            return None;
        }

        if let Err(err) = self.validate() {
            tracing::debug!("Street form rejected: {}", err);
            notifier.error(&err.user_message());
            return None;
        }

        let city_id = self.path.city_id()?;
        self.submitting = true;
        Some(NewStreet {
            name: self.name.trim().to_string(),
            city_id,
        })
    }

    /// Record a successful creation; the form closes and is cleared
    pub fn complete(
        &mut self,
        new_street: NewStreet,
        created: CreatedStreet,
        notifier: &dyn Notifier,
    ) -> StreetRow {
        let row = StreetRow {
            id: created.id,
            street: new_street.name,
            city_id: new_street.city_id,
            city: self.path.cities.selected_name().unwrap_or_default().to_string(),
            province_id: self.path.province_id(),
            province: self.path.provinces.selected_name().unwrap_or_default().to_string(),
            region_id: self.path.region_id(),
            region: self.path.regions.selected_name().unwrap_or_default().to_string(),
        };

        self.submitting = false;
        self.open = false;
        self.reset_fields();
        notifier.success("Street created successfully");
        row
    }

    /// Record a failed creation; the form stays open with its values
    pub fn fail(&mut self, err: CatalogError, notifier: &dyn Notifier) {
        tracing::error!("Creating street '{}' failed: {}", self.name, err);
        self.submitting = false;
        notifier.error(&format!("The street could not be created: {}", err.user_message()));
    }

    /// Validate, send and record the outcome in one go
    pub async fn submit(
        &mut self,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Option<StreetRow> {
        let new_street = self.begin_submit(notifier)?;
        match api.create_street(&new_street).await {
            Ok(created) => Some(self.complete(new_street, created, notifier)),
            Err(err) => {
                self.fail(err, notifier);
                None
            }
        }
    }
}

impl Validatable for CreationFlow {
    fn validate(&self) -> CatalogResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::MissingFields(missing))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
