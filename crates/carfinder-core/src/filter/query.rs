//! Translation of the filter state into the catalog's wire query.

use serde::Serialize;
use std::collections::BTreeMap;

use super::facet::Facet;
use super::state::FilterState;

/// Placeholder value some selection controls use for "no constraint".
pub const ANY_SENTINEL: &str = "Any";

/// Query parameters understood by the catalog search endpoint, keyed by wire name.
///
/// Derived from a [`FilterState`] on every search and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a filter state.
    ///
    /// - empty and `"Any"` values are skipped
    /// - UI facet names are renamed to wire names
    /// - numeric facets are coerced to integers; values that do not parse are dropped
    pub fn from_filters(filters: &FilterState) -> Self {
        let params = filters
            .iter()
            .filter(|(_, value)| !value.is_empty() && *value != ANY_SENTINEL)
            .filter_map(|(facet, value)| {
                let value = if facet.is_numeric() {
                    parse_leading_int(value)?.to_string()
                } else {
                    value.to_string()
                };
                Some((facet.wire_name().to_string(), value))
            })
            .collect();
        Self { params }
    }

    pub fn get(&self, wire_name: &str) -> Option<&str> {
        self.params.get(wire_name).map(String::as_str)
    }

    /// Value for a facet, looked up by its wire name.
    pub fn facet(&self, facet: Facet) -> Option<&str> {
        self.get(facet.wire_name())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `(wire name, value)` pairs in key order, ready for URL encoding.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl From<&FilterState> for Query {
    fn from(filters: &FilterState) -> Self {
        Self::from_filters(filters)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parses the leading base-10 integer of `value`.
///
/// Leading whitespace and one sign character are accepted, then the longest
/// run of ASCII digits is taken; anything after it is ignored. Returns `None`
/// when no digit follows, or when the digits overflow `i64`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
