//! Fare API HTTP client.
//!
//! Provides async methods for fetching the route network, the airport
//! directory and flight availability. Handles concurrency limiting and
//! conversion to domain types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::directory::AirportInfo;
use crate::domain::{Flight, RouteGraph};
use crate::planner::{OfferRequest, OfferSource, RouteSource, ScanError};

use super::convert::{convert_availability, convert_directory, convert_route_graph};
use super::error::BackendError;
use super::types::{AirportsAggregate, AvailabilityResponse};

/// Default URL of the airports aggregate.
const DEFAULT_AIRPORTS_URL: &str =
    "https://api.ryanair.com/aggregate/3/common?embedded=airports&market=en-ie";

/// Default URL of the availability endpoint.
const DEFAULT_AVAILABILITY_URL: &str = "https://desktopapps.ryanair.com/en-ie/availability";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Days after `DateOut` included in one availability response.
const FLEX_DAYS: u32 = 6;

/// Configuration for the fare API client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// URL of the airports aggregate
    pub airports_url: String,
    /// URL of the availability endpoint
    pub availability_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            airports_url: DEFAULT_AIRPORTS_URL.to_string(),
            availability_url: DEFAULT_AVAILABILITY_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom airports aggregate URL (for testing).
    pub fn with_airports_url(mut self, url: impl Into<String>) -> Self {
        self.airports_url = url.into();
        self
    }

    /// Set a custom availability URL (for testing).
    pub fn with_availability_url(mut self, url: impl Into<String>) -> Self {
        self.availability_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fare API client.
///
/// Cheap to clone; clones share the connection pool and the concurrency
/// limit.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    airports_url: String,
    availability_url: String,
    semaphore: Arc<Semaphore>,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            airports_url: config.airports_url,
            availability_url: config.availability_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL the airports aggregate is fetched from.
    pub fn airports_url(&self) -> &str {
        &self.airports_url
    }

    /// Fetch the raw airports aggregate.
    pub async fn fetch_airports(&self) -> Result<AirportsAggregate, BackendError> {
        self.get_json(&self.airports_url, &[]).await
    }

    /// Fetch the route network.
    pub async fn fetch_route_graph(&self) -> Result<RouteGraph, BackendError> {
        let aggregate = self.fetch_airports().await?;
        let graph = convert_route_graph(&aggregate);
        debug!(
            airports = graph.airport_count(),
            routes = graph.route_count(),
            "Fetched route graph"
        );
        Ok(graph)
    }

    /// Fetch display details for every airport.
    pub async fn fetch_airport_directory(&self) -> Result<Vec<AirportInfo>, BackendError> {
        let aggregate = self.fetch_airports().await?;
        Ok(convert_directory(&aggregate))
    }

    /// Fetch flights for one edge, covering the request date and the
    /// following flex days.
    pub async fn fetch_offers(&self, request: &OfferRequest) -> Result<Vec<Flight>, BackendError> {
        let query = availability_query(request);
        let response: AvailabilityResponse =
            self.get_json(&self.availability_url, &query).await?;
        let flights = convert_availability(&response)?;
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
            flights = flights.len(),
            "Fetched offers"
        );
        Ok(flights)
    }

    /// GET `url` and decode the JSON body, holding a concurrency permit.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| BackendError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Query parameters for a one-way, one-adult availability search.
fn availability_query(request: &OfferRequest) -> Vec<(&'static str, String)> {
    vec![
        ("ADT", "1".to_string()),
        ("CHD", "0".to_string()),
        ("DateOut", request.date.format("%Y-%m-%d").to_string()),
        ("Destination", request.destination.to_string()),
        ("FlexDaysOut", FLEX_DAYS.to_string()),
        ("INF", "0".to_string()),
        ("Origin", request.origin.to_string()),
        ("RoundTrip", "false".to_string()),
        ("TEEN", "0".to_string()),
    ]
}

impl RouteSource for BackendClient {
    async fn route_graph(&self) -> Result<RouteGraph, ScanError> {
        Ok(self.fetch_route_graph().await?)
    }
}

impl OfferSource for BackendClient {
    async fn offers(&self, request: &OfferRequest) -> Result<Vec<Flight>, ScanError> {
        Ok(self.fetch_offers(request).await?)
    }
}
