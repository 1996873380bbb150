//! HttpCatalogClient - REST implementation of `CatalogService`.
//!
//! - `GET {api_base}/filters` returns the selectable facet values
//! - `GET {api_base}/cars?<query>` returns the matching cars

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use carfinder_core::catalog::{Car, CatalogService, FilterOptions};
use carfinder_core::config::ClientConfig;
use carfinder_core::error::{CarfinderError, Result};
use carfinder_core::filter::Query;

const FILTERS_PATH: &str = "/filters";
const CARS_PATH: &str = "/cars";

/// Catalog client that talks to the catalog HTTP service.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    config: ClientConfig,
}

impl HttpCatalogClient {
    /// Creates a client for the configured catalog address.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CarfinderError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<&Query>) -> Result<T> {
        let url = self.config.endpoint(path);
        let mut request = self.client.get(&url);
        if let Some(query) = query {
            request = request.query(&query.pairs());
        }

        let response = request.send().await.map_err(|err| {
            CarfinderError::http(None, format!("Catalog request to {url} failed: {err}"))
        })?;

        decode_json(response).await
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn fetch_filter_options(&self) -> Result<FilterOptions> {
        let options: FilterOptions = self.get_json(FILTERS_PATH, None).await?;
        tracing::debug!(
            makes = options.makes.len(),
            models = options.models.len(),
            years = options.years.len(),
            "Filter options received"
        );
        Ok(options)
    }

    async fn search_cars(&self, query: &Query) -> Result<Vec<Car>> {
        tracing::debug!(params = ?query.pairs(), "Sending catalog search");
        let cars: Vec<Car> = self.get_json(CARS_PATH, Some(query)).await?;
        Ok(cars)
    }
}

/// Fails on non-success status, otherwise decodes the JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(CarfinderError::http(Some(status.as_u16()), body_text));
    }

    response
        .json::<T>()
        .await
        .map_err(|err| CarfinderError::decode(format!("Failed to parse catalog response: {err}")))
}
