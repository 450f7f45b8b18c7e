//! Turning street records into display rows.
//!
//! The list endpoint normally joins region/province/city names into each
//! street. When it does not, rows are joined client-side against the full
//! province and city lists. Records whose parent chain is broken are
//! dropped with a warning rather than failing the whole list.

use catalog_core::{
    CatalogResult, City, CityId, Province, ProvinceId, Region, RegionId, Street, StreetRow,
};
use std::collections::HashMap;

use crate::api::CatalogApi;
use crate::query::StreetQuery;

/// Join bare street records with their ancestors
///
/// Records that already carry every name are converted directly.
pub fn denormalize(
    streets: Vec<Street>,
    regions: &[Region],
    provinces: &[Province],
    cities: &[City],
) -> Vec<StreetRow> {
    let regions: HashMap<RegionId, &Region> = regions.iter().map(|r| (r.id, r)).collect();
    let provinces: HashMap<ProvinceId, &Province> = provinces.iter().map(|p| (p.id, p)).collect();
    let cities: HashMap<CityId, &City> = cities.iter().map(|c| (c.id, c)).collect();

    streets
        .into_iter()
        .filter_map(|street| {
            if street.is_denormalized() {
                return StreetRow::try_from(street).ok();
            }

            let Some(city) = cities.get(&street.city_id) else {
                tracing::warn!("Street {} references unknown city {}", street.id, street.city_id);
                return None;
            };
            let Some(province) = provinces.get(&city.province_id) else {
                tracing::warn!("City {} references unknown province {}", city.id, city.province_id);
                return None;
            };
            let Some(region) = regions.get(&province.region_id) else {
                tracing::warn!(
                    "Province {} references unknown region {}",
                    province.id,
                    province.region_id
                );
                return None;
            };

            Some(StreetRow {
                id: street.id,
                street: street.name,
                city_id: city.id,
                city: city.name.clone(),
                province_id: Some(province.id),
                province: province.name.clone(),
                region_id: Some(region.id),
                region: region.name.clone(),
            })
        })
        .collect()
}

/// Run a street query and return display rows
///
/// A selected street is fetched through `/streets/{id}` and kept only when
/// it matches the search text; otherwise the list endpoint is used. Lookup
/// lists are only fetched when at least one record lacks its joined names.
pub async fn load_street_rows(
    api: &dyn CatalogApi,
    query: &StreetQuery,
) -> CatalogResult<Vec<StreetRow>> {
    let streets = match query.street_id {
        Some(id) => {
            let street = api.street(id).await?;
            if query.matches_search(&street.name) {
                vec![street]
            } else {
                tracing::debug!("Street {} does not match the search text", id);
                Vec::new()
            }
        }
        None => api.streets(query).await?,
    };

    if streets.iter().all(Street::is_denormalized) {
        return Ok(denormalize(streets, &[], &[], &[]));
    }

    tracing::debug!("Joining {} street records client-side", streets.len());
    let regions = api.regions().await?;
    let provinces = api.all_provinces().await?;
    let cities = api.all_cities().await?;

    Ok(denormalize(streets, &regions, &provinces, &cities))
}

// ============================================================================
// Tests
// ============================================================================
