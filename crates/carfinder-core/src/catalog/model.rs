//! Catalog domain models.

use serde::{Deserialize, Serialize};

/// A car listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Price in whole currency units
    pub price: i64,
    pub mileage: i64,
    pub color: String,
    pub bodytype: String,
}

/// Selectable values per enumerable facet, as reported by the catalog.
///
/// Missing lists decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub makes: Vec<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub bodytypes: Vec<String>,
    #[serde(default)]
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
            && self.models.is_empty()
            && self.colors.is_empty()
            && self.bodytypes.is_empty()
            && self.years.is_empty()
    }
}
