//! Facet vocabulary shared by the filter state, the query translator and the
//! assistant reply decoder.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// One independently settable search constraint.
///
/// The string form (`Display`, `FromStr`, `AsRef<str>`) is the UI name,
/// e.g. `Facet::MinYear` <-> `"minYear"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Facet {
    Make,
    Model,
    MinYear,
    MaxYear,
    MinPrice,
    MaxPrice,
    MinMileage,
    MaxMileage,
    Color,
    Bodytype,
}

/// Bidirectional UI <-> wire vocabulary: `(facet, ui name, wire name)`.
///
/// Every name lookup in either direction goes through this table, so the
/// inverse mapping applied to assistant filters always agrees with the
/// forward mapping used to build catalog queries.
pub const FACET_VOCABULARY: [(Facet, &str, &str); 10] = [
    (Facet::Make, "make", "make"),
    (Facet::Model, "model", "model"),
    (Facet::MinYear, "minYear", "min_year"),
    (Facet::MaxYear, "maxYear", "max_year"),
    (Facet::MinPrice, "minPrice", "min_price"),
    (Facet::MaxPrice, "maxPrice", "max_price"),
    (Facet::MinMileage, "minMileage", "min_mileage"),
    (Facet::MaxMileage, "maxMileage", "max_mileage"),
    (Facet::Color, "color", "color"),
    (Facet::Bodytype, "bodytype", "bodytype"),
];

impl Facet {
    /// All facets in declaration order.
    pub fn all() -> impl Iterator<Item = Facet> {
        Facet::iter()
    }

    fn entry(self) -> &'static (Facet, &'static str, &'static str) {
        // The table is indexed by declaration order.
        &FACET_VOCABULARY[self as usize]
    }

    /// Name used by the filter state and the presentation layer.
    pub fn ui_name(self) -> &'static str {
        self.entry().1
    }

    /// Name used by the catalog query string and assistant filter objects.
    pub fn wire_name(self) -> &'static str {
        self.entry().2
    }

    pub fn from_ui_name(name: &str) -> Option<Facet> {
        FACET_VOCABULARY
            .iter()
            .find(|(_, ui, _)| *ui == name)
            .map(|(facet, _, _)| *facet)
    }

    pub fn from_wire_name(name: &str) -> Option<Facet> {
        FACET_VOCABULARY
            .iter()
            .find(|(_, _, wire)| *wire == name)
            .map(|(facet, _, _)| *facet)
    }

    /// Year, price and mileage bounds are sent to the catalog as integers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Facet::MinYear
                | Facet::MaxYear
                | Facet::MinPrice
                | Facet::MaxPrice
                | Facet::MinMileage
                | Facet::MaxMileage
        )
    }
}
