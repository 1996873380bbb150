//! Catalog service trait definition.

use async_trait::async_trait;

use crate::catalog::{Car, FilterOptions};
use crate::error::Result;
use crate::filter::Query;

/// Read access to the car catalog.
///
/// Both operations are single request/response round trips with no retries;
/// a failure is terminal for that attempt.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the selectable values for each enumerable facet.
    async fn fetch_filter_options(&self) -> Result<FilterOptions>;

    /// Returns the cars matching a translated query, in catalog order.
    ///
    /// # Arguments
    /// * `query` - Wire-level query built from the current filter state
    async fn search_cars(&self, query: &Query) -> Result<Vec<Car>>;
}
