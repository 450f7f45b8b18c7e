//! In-memory `CatalogApi` for state tests.

use async_trait::async_trait;
use catalog_client::{CatalogApi, StreetQuery};
use catalog_core::{
    CatalogError, CatalogResult, City, CreatedStreet, LocationId, NewStreet, Province, ProvinceId,
    Region, RegionId, Street, StreetId,
};
use std::collections::HashSet;
use std::sync::Mutex;

pub(crate) mod fixtures {
    use super::*;

    pub fn regions() -> Vec<Region> {
        vec![Region::new(13, "Metropolitana"), Region::new(5, "Valparaíso")]
    }

    pub fn provinces() -> Vec<Province> {
        vec![
            Province::new(131, "Santiago", 13),
            Province::new(132, "Cordillera", 13),
            Province::new(51, "Valparaíso", 5),
        ]
    }

    pub fn cities() -> Vec<City> {
        vec![
            City::new(1301, "Santiago Centro", 131),
            City::new(1302, "Providencia", 131),
            City::new(1321, "Puente Alto", 132),
            City::new(5101, "Viña del Mar", 51),
        ]
    }

    /// Street with every ancestor joined in, as the list endpoint returns it
    pub fn street(id: i64, name: &str, city_id: i64) -> Street {
        let city = cities()
            .into_iter()
            .find(|c| c.id == LocationId::new(city_id));
        let province = city
            .as_ref()
            .and_then(|c| provinces().into_iter().find(|p| p.id == c.province_id));
        let region = province
            .as_ref()
            .and_then(|p| regions().into_iter().find(|r| r.id == p.region_id));

        Street {
            id: LocationId::new(id),
            name: name.to_string(),
            city_id: LocationId::new(city_id),
            city: city.map(|c| c.name),
            province_id: province.as_ref().map(|p| p.id),
            province: province.map(|p| p.name),
            region_id: region.as_ref().map(|r| r.id),
            region: region.map(|r| r.name),
        }
    }

    pub fn streets() -> Vec<Street> {
        vec![
            street(1, "Alameda", 1301),
            street(2, "Bandera", 1301),
            street(3, "Avenida Libertad", 5101),
        ]
    }
}

/// Fake backend over the fixtures; records each call and can be told to
/// fail individual endpoints
pub(crate) struct FakeApi {
    streets: Mutex<Vec<Street>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            streets: Mutex::new(fixtures::streets()),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every call to `endpoint` fail with a 500
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, endpoint: &'static str, call: String) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(CatalogError::api(500, format!("{} unavailable", endpoint)));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn regions(&self) -> CatalogResult<Vec<Region>> {
        self.record("regions", "regions".to_string())?;
        Ok(fixtures::regions())
    }

    async fn provinces(&self, region_id: RegionId) -> CatalogResult<Vec<Province>> {
        self.record("provinces", format!("provinces?region_id={}", region_id))?;
        Ok(fixtures::provinces()
            .into_iter()
            .filter(|p| p.region_id == region_id)
            .collect())
    }

    async fn all_provinces(&self) -> CatalogResult<Vec<Province>> {
        self.record("provinces", "provinces".to_string())?;
        Ok(fixtures::provinces())
    }

    async fn cities(&self, province_id: ProvinceId) -> CatalogResult<Vec<City>> {
        self.record("cities", format!("cities?province_id={}", province_id))?;
        Ok(fixtures::cities()
            .into_iter()
            .filter(|c| c.province_id == province_id)
            .collect())
    }

    async fn all_cities(&self) -> CatalogResult<Vec<City>> {
        self.record("cities", "cities".to_string())?;
        Ok(fixtures::cities())
    }

    async fn streets(&self, query: &StreetQuery) -> CatalogResult<Vec<Street>> {
        let params: Vec<String> = query
            .to_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        let call = if params.is_empty() {
            "streets".to_string()
        } else {
            format!("streets?{}", params.join("&"))
        };
        self.record("streets", call)?;

        let search = query.search.as_ref().map(|s| s.to_lowercase());
        Ok(self
            .streets
            .lock()
            .unwrap()
            .iter()
            .filter(|s| query.city_id.is_none_or(|id| s.city_id == id))
            .filter(|s| query.province_id.is_none_or(|id| s.province_id == Some(id)))
            .filter(|s| query.region_id.is_none_or(|id| s.region_id == Some(id)))
            .filter(|s| {
                search
                    .as_ref()
                    .is_none_or(|text| s.name.to_lowercase().contains(text.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn street(&self, id: StreetId) -> CatalogResult<Street> {
        self.record("street", format!("streets/{}", id))?;
        self.streets
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Street {}", id)))
    }

    async fn create_street(&self, street: &NewStreet) -> CatalogResult<CreatedStreet> {
        self.record("create_street", format!("create {}", street.name))?;
        let mut streets = self.streets.lock().unwrap();
        let id = LocationId::new(100 + streets.len() as i64);
        streets.push(fixtures::street(id.get(), &street.name, street.city_id.get()));
        Ok(CreatedStreet { id })
    }
}
