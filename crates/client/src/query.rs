//! Query builder for `GET /streets`.
//!
//! One query carries every selected location id and the search text; only
//! the parts that are set become request parameters.

use catalog_core::{CityId, ProvinceId, RegionId, StreetId};

/// Combined structured filter and free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetQuery {
    pub region_id: Option<RegionId>,
    pub province_id: Option<ProvinceId>,
    pub city_id: Option<CityId>,
    /// A selected street is fetched through `/streets/{id}` instead; the
    /// search text then filters that single record client-side
    pub street_id: Option<StreetId>,
    /// Trimmed, never empty
    pub search: Option<String>,
}

impl StreetQuery {
    /// An unfiltered query
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, id: Option<RegionId>) -> Self {
        self.region_id = id;
        self
    }

    pub fn with_province(mut self, id: Option<ProvinceId>) -> Self {
        self.province_id = id;
        self
    }

    pub fn with_city(mut self, id: Option<CityId>) -> Self {
        self.city_id = id;
        self
    }

    pub fn with_street(mut self, id: Option<StreetId>) -> Self {
        self.street_id = id;
        self
    }

    /// Set the search text; blank text clears it
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    /// Same search, no location filters
    pub fn without_filters(&self) -> Self {
        Self {
            search: self.search.clone(),
            ..Self::default()
        }
    }

    /// Whether any location id is set
    pub fn has_location_filter(&self) -> bool {
        self.region_id.is_some()
            || self.province_id.is_some()
            || self.city_id.is_some()
            || self.street_id.is_some()
    }

    /// Whether the query would list every street
    pub fn is_unfiltered(&self) -> bool {
        !self.has_location_filter() && self.search.is_none()
    }

    /// Whether a street name passes the search text, ignoring case
    pub fn matches_search(&self, name: &str) -> bool {
        match &self.search {
            Some(search) => name.to_lowercase().contains(&search.to_lowercase()),
            None => true,
        }
    }

    /// Request parameters for `GET /streets`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(id) = self.city_id {
            params.push(("city_id", id.to_string()));
        }
        if let Some(id) = self.province_id {
            params.push(("province_id", id.to_string()));
        }
        if let Some(id) = self.region_id {
            params.push(("region_id", id.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::LocationId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_query_has_no_params() {
        let query = StreetQuery::new();
        assert!(query.is_unfiltered());
        assert!(query.to_params().is_empty());
    }

    #[test]
    fn test_search_is_trimmed() {
        let query = StreetQuery::new().with_search("  alameda ");
        assert_eq!(query.search.as_deref(), Some("alameda"));

        let query = query.with_search("   ");
        assert_eq!(query.search, None);
        assert!(query.is_unfiltered());
    }

    #[test]
    fn test_filters_and_search_merge_into_one_query() {
        let query = StreetQuery::new()
            .with_region(Some(LocationId::new(13)))
            .with_province(Some(LocationId::new(131)))
            .with_city(Some(LocationId::new(1301)))
            .with_search("los");

        assert_eq!(
            query.to_params(),
            vec![
                ("city_id", "1301".to_string()),
                ("province_id", "131".to_string()),
                ("region_id", "13".to_string()),
                ("search", "los".to_string()),
            ]
        );
    }

    #[test]
    fn test_without_filters_keeps_search() {
        let query = StreetQuery::new()
            .with_region(Some(LocationId::new(1)))
            .with_street(Some(LocationId::new(8)))
            .with_search("norte");
        assert!(query.has_location_filter());

        let cleared = query.without_filters();
        assert!(!cleared.has_location_filter());
        assert_eq!(cleared.search.as_deref(), Some("norte"));
    }

    #[test]
    fn test_matches_search_ignores_case() {
        let query = StreetQuery::new().with_search("ALAM");
        assert!(query.matches_search("Alameda"));
        assert!(!query.matches_search("Bandera"));
        assert!(StreetQuery::new().matches_search("Bandera"));
    }
}
