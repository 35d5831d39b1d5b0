//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::AirportInfo;
use crate::domain::Solution;

/// Query for airport search.
#[derive(Debug, Deserialize)]
pub struct AirportSearchRequest {
    /// Search terms separated by spaces or commas; empty lists everything
    #[serde(default)]
    pub q: String,
}

impl AirportSearchRequest {
    /// Split the query into individual terms.
    pub fn terms(&self) -> Vec<String> {
        self.q
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Response for airport search.
#[derive(Debug, Serialize)]
pub struct AirportSearchResponse {
    pub airports: Vec<AirportInfo>,
}

/// Request body for an itinerary scan.
#[derive(Debug, Deserialize)]
pub struct ScanRequestBody {
    /// Origin airport codes
    pub origins: Vec<String>,

    /// Destination airport codes
    pub destinations: Vec<String>,

    /// First day of travel (YYYY-MM-DD)
    pub earliest: NaiveDate,

    /// Last day of travel (YYYY-MM-DD)
    pub latest: NaiveDate,

    /// Maximum flights per itinerary
    pub max_flights: Option<usize>,

    /// Minimum layover in minutes
    pub min_layover: Option<i64>,

    /// Maximum layover in minutes
    pub max_layover: Option<i64>,
}

/// Response for an itinerary scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// Itineraries, earliest departure first
    pub solutions: Vec<Solution>,

    /// Number of candidate paths in the route network
    pub paths_found: usize,

    /// Number of offer requests issued
    pub requests_made: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
