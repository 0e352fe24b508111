//! HTTP client for the listing and pricing services.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::coerce::coerce_numbers;
use crate::domain::{Municipality, PriceList, Product};

use super::convert::{municipalities_from_json, price_list_from_json, products_from_json};
use super::error::FetchError;
use super::query::StationQuery;

/// Base URL of the listing service.
pub const DEFAULT_LISTING_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/Listados";

/// Base URL of the station pricing service.
pub const DEFAULT_PRICES_URL: &str = "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/EstacionesTerrestres/Filtro";

/// Default request timeout. The full product listing is large and slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listing service base URL
    pub listing_url: String,
    /// Pricing service base URL
    pub prices_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config pointing at the public service.
    pub fn new() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            prices_url: DEFAULT_PRICES_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom listing URL (for testing).
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    /// Set a custom pricing URL (for testing).
    pub fn with_prices_url(mut self, url: impl Into<String>) -> Self {
        self.prices_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the fuel price REST service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    listing_url: String,
    prices_url: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            listing_url: config.listing_url.trim_end_matches('/').to_string(),
            prices_url: config.prices_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every municipality, with its province and community.
    pub async fn fetch_municipalities(&self) -> Result<Vec<Municipality>, FetchError> {
        let url = format!("{}/Municipios/", self.listing_url);
        municipalities_from_json(self.get_json(&url).await?)
    }

    /// Fetch the product catalog.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/ProductosPetroliferos/", self.listing_url);
        products_from_json(self.get_json(&url).await?)
    }

    /// Fetch stations for one pricing query, in API order.
    pub async fn fetch_stations(&self, query: &StationQuery) -> Result<PriceList, FetchError> {
        let url = format!("{}/{}", self.prices_url, query.path());
        price_list_from_json(self.get_json(&url).await?, query)
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::json(e.to_string()))?;

        debug!(url, bytes = body.len(), "response received");
        Ok(coerce_numbers(value))
    }
}
