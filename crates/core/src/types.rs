//! Core types used throughout Catalog Admin
//!
//! This module contains the catalog records as the backend serves them,
//! the denormalized row the street table displays, and the small value
//! types that drive table sorting and pagination.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier for every record in the catalog.
///
/// Backends have been seen to send ids both as JSON numbers and as numeric
/// strings; both deserialize to the same value. Serialization always emits
/// a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    /// Wrap a raw numeric id
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw numeric value
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for LocationId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CatalogError::validation(format!("Invalid identifier: '{}'", s)))
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self(n)),
            RawId::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("invalid identifier: {:?}", text))),
        }
    }
}

/// Type alias for region identifiers
pub type RegionId = LocationId;

/// Type alias for province identifiers
pub type ProvinceId = LocationId;

/// Type alias for city identifiers
pub type CityId = LocationId;

/// Type alias for street identifiers
pub type StreetId = LocationId;

// ============================================================================
// Catalog Records
// ============================================================================

/// Anything that can be listed as an option in a location selector
pub trait CatalogEntry {
    /// Record identifier
    fn id(&self) -> LocationId;

    /// Display name
    fn name(&self) -> &str;
}

/// Top level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

impl Region {
    pub fn new(id: impl Into<RegionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A province always belongs to one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub name: String,
    pub region_id: RegionId,
}

impl Province {
    pub fn new(
        id: impl Into<ProvinceId>,
        name: impl Into<String>,
        region_id: impl Into<RegionId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region_id: region_id.into(),
        }
    }
}

/// A city always belongs to one province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub province_id: ProvinceId,
}

impl City {
    pub fn new(
        id: impl Into<CityId>,
        name: impl Into<String>,
        province_id: impl Into<ProvinceId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            province_id: province_id.into(),
        }
    }
}

/// Street record as returned by `/streets`
///
/// The list endpoint joins the parent names in; older backends return only
/// `id`, `name` and `city_id`, in which case the names stay `None` and the
/// client joins them itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub id: StreetId,
    pub name: String,
    pub city_id: CityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_id: Option<ProvinceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<RegionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Street {
    /// Whether the parent names are already joined in
    pub fn is_denormalized(&self) -> bool {
        self.city.is_some() && self.province.is_some() && self.region.is_some()
    }
}

/// Payload for `POST /streets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStreet {
    pub name: String,
    pub city_id: CityId,
}

/// Response of `POST /streets`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStreet {
    pub id: StreetId,
}

impl CatalogEntry for Region {
    fn id(&self) -> LocationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for Province {
    fn id(&self) -> LocationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for City {
    fn id(&self) -> LocationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for Street {
    fn id(&self) -> LocationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Street Row
// ============================================================================

/// A street with every ancestor name joined in, as displayed by the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetRow {
    pub id: StreetId,
    pub street: String,
    pub city_id: CityId,
    pub city: String,
    pub province_id: Option<ProvinceId>,
    pub province: String,
    pub region_id: Option<RegionId>,
    pub region: String,
}

impl StreetRow {
    /// The text shown in (and sorted by) the given column
    pub fn value(&self, column: SortColumn) -> &str {
        match column {
            SortColumn::Street => &self.street,
            SortColumn::Region => &self.region,
            SortColumn::Province => &self.province,
            SortColumn::City => &self.city,
        }
    }
}

impl TryFrom<Street> for StreetRow {
    type Error = CatalogError;

    fn try_from(street: Street) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            CatalogError::Parse(format!("street {} has no '{}' name", street.id, field))
        };

        let city = street.city.clone().ok_or_else(|| missing("city"))?;
        let province = street.province.clone().ok_or_else(|| missing("province"))?;
        let region = street.region.clone().ok_or_else(|| missing("region"))?;

        Ok(Self {
            id: street.id,
            street: street.name,
            city_id: street.city_id,
            city,
            province_id: street.province_id,
            province,
            region_id: street.region_id,
            region,
        })
    }
}

impl CatalogEntry for StreetRow {
    fn id(&self) -> LocationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.street
    }
}

// ============================================================================
// Table Sorting & Paging
// ============================================================================

/// Page sizes offered by the table footer
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Page size used until the user picks another one
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    Street,
    Region,
    Province,
    City,
}

impl SortColumn {
    /// Columns in display order
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Street,
        SortColumn::Region,
        SortColumn::Province,
        SortColumn::City,
    ];

    /// Header label
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Street => "Street",
            SortColumn::Region => "Region",
            SortColumn::Province => "Province",
            SortColumn::City => "City",
        }
    }

    /// Stable key, matches the serde representation
    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::Street => "street",
            SortColumn::Region => "region",
            SortColumn::Province => "province",
            SortColumn::City => "city",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Arrow shown next to the active header
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    /// Screen reader text for the active header
    pub fn description(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "sorted ascending",
            SortDirection::Descending => "sorted descending",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
