//! The fetcher interface consumed by the state machines.

use async_trait::async_trait;
use catalog_core::{
    CatalogResult, City, CreatedStreet, NewStreet, Province, ProvinceId, Region, RegionId,
    Street, StreetId,
};

use crate::query::StreetQuery;

/// Read access to the catalog plus street creation
///
/// Every method maps to exactly one HTTP request. Implementations do not
/// retry.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /regions`
    async fn regions(&self) -> CatalogResult<Vec<Region>>;

    /// `GET /provinces?region_id=`
    async fn provinces(&self, region_id: RegionId) -> CatalogResult<Vec<Province>>;

    /// `GET /provinces` without a parent, used to join bare street records
    async fn all_provinces(&self) -> CatalogResult<Vec<Province>>;

    /// `GET /cities?province_id=`
    async fn cities(&self, province_id: ProvinceId) -> CatalogResult<Vec<City>>;

    /// `GET /cities` without a parent, used to join bare street records
    async fn all_cities(&self) -> CatalogResult<Vec<City>>;

    /// `GET /streets` with the query's parameters
    async fn streets(&self, query: &StreetQuery) -> CatalogResult<Vec<Street>>;

    /// `GET /streets/{id}`
    async fn street(&self, id: StreetId) -> CatalogResult<Street>;

    /// `POST /streets`
    async fn create_street(&self, street: &NewStreet) -> CatalogResult<CreatedStreet>;
}
