//! Canonical filter state.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::facet::Facet;
use crate::error::{CarfinderError, Result};

/// Current search constraints, one value per facet.
///
/// Every facet is always present; an empty string means "no constraint".
/// Serializes as an object keyed by UI facet names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<Facet, String>,
}

impl FilterState {
    /// Creates a state with every facet empty.
    pub fn new() -> Self {
        Self {
            values: Facet::all().map(|facet| (facet, String::new())).collect(),
        }
    }

    /// Builds a state from a partial mapping; facets not mentioned are empty.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (Facet, S)>,
        S: Into<String>,
    {
        let mut state = Self::new();
        for (facet, value) in values {
            state.values.insert(facet, value.into());
        }
        state
    }

    pub fn get(&self, facet: Facet) -> &str {
        self.values.get(&facet).map(String::as_str).unwrap_or("")
    }

    /// Replaces the value of one facet.
    pub fn set(&mut self, facet: Facet, value: impl Into<String>) {
        self.values.insert(facet, value.into());
    }

    /// Replaces the value of the facet with the given UI name.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let facet =
            Facet::from_ui_name(name).ok_or_else(|| CarfinderError::UnknownFacet(name.to_string()))?;
        self.set(facet, value);
        Ok(())
    }

    /// Resets every facet to empty.
    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Total replacement: every facet takes its value from `other`.
    pub fn replace_all(&mut self, other: FilterState) {
        *self = other;
    }

    /// True when no facet carries a constraint.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    /// Iterates `(facet, value)` pairs in facet declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.values.iter().map(|(facet, value)| (*facet, value.as_str()))
    }

    /// Facets that currently carry a non-empty value.
    pub fn active(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.iter().filter(|(_, value)| !value.is_empty())
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for FilterState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let partial = BTreeMap::<Facet, String>::deserialize(deserializer)?;
        Ok(Self::from_values(partial))
    }
}
