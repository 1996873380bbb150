//! In-memory `CatalogService` backed by a car list.
//!
//! Evaluates queries the way the catalog service does: text facets match
//! case-insensitively, numeric bounds are inclusive.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use carfinder_core::catalog::{Car, CatalogService, FilterOptions};
use carfinder_core::error::{CarfinderError, Result};
use carfinder_core::filter::{Facet, Query};

/// A catalog holding its cars in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    cars: Vec<Car>,
}

impl InMemoryCatalog {
    pub fn new(cars: Vec<Car>) -> Self {
        Self { cars }
    }

    /// Loads a JSON array of cars (the catalog's `carList.json` format).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let cars: Vec<Car> = serde_json::from_str(&content)?;
        tracing::info!(count = cars.len(), "Loaded car list from {:?}", path);
        Ok(Self::new(cars))
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Distinct values of every enumerable attribute, sorted.
    pub fn filter_options(&self) -> FilterOptions {
        fn distinct<T: Ord + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
            values.collect::<BTreeSet<_>>().into_iter().collect()
        }

        FilterOptions {
            makes: distinct(self.cars.iter().map(|c| c.make.clone())),
            models: distinct(self.cars.iter().map(|c| c.model.clone())),
            colors: distinct(self.cars.iter().map(|c| c.color.clone())),
            bodytypes: distinct(self.cars.iter().map(|c| c.bodytype.clone())),
            years: distinct(self.cars.iter().map(|c| c.year)),
        }
    }

    /// Cars matching every parameter of `query`, in catalog order.
    pub fn matching(&self, query: &Query) -> Result<Vec<Car>> {
        let criteria = Criteria::from_query(query)?;
        Ok(self
            .cars
            .iter()
            .filter(|car| criteria.matches(car))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn fetch_filter_options(&self) -> Result<FilterOptions> {
        Ok(self.filter_options())
    }

    async fn search_cars(&self, query: &Query) -> Result<Vec<Car>> {
        self.matching(query)
    }
}

/// A query parsed into typed predicates.
#[derive(Debug, Default)]
struct Criteria {
    text: Vec<(Facet, String)>,
    bounds: Vec<(Facet, i64)>,
}

impl Criteria {
    fn from_query(query: &Query) -> Result<Self> {
        let mut criteria = Self::default();
        for (key, value) in query.pairs() {
            // Parameters outside the vocabulary are ignored, as the service does.
            let Some(facet) = Facet::from_wire_name(key) else {
                continue;
            };
            if facet.is_numeric() {
                let bound = value.trim().parse::<i64>().map_err(|_| {
                    CarfinderError::invalid_query(format!("{key} must be an integer, got '{value}'"))
                })?;
                criteria.bounds.push((facet, bound));
            } else if !value.is_empty() {
                criteria.text.push((facet, value.to_lowercase()));
            }
        }
        Ok(criteria)
    }

    fn matches(&self, car: &Car) -> bool {
        let text_ok = self.text.iter().all(|(facet, expected)| {
            let actual = match facet {
                Facet::Make => &car.make,
                Facet::Model => &car.model,
                Facet::Color => &car.color,
                Facet::Bodytype => &car.bodytype,
                _ => return true,
            };
            actual.to_lowercase() == *expected
        });

        text_ok
            && self.bounds.iter().all(|(facet, bound)| match facet {
                Facet::MinYear => i64::from(car.year) >= *bound,
                Facet::MaxYear => i64::from(car.year) <= *bound,
                Facet::MinPrice => car.price >= *bound,
                Facet::MaxPrice => car.price <= *bound,
                Facet::MinMileage => car.mileage >= *bound,
                Facet::MaxMileage => car.mileage <= *bound,
                _ => true,
            })
    }
}
