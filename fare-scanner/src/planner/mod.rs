//! Itinerary planning.
//!
//! This module implements the scan pipeline: enumerate candidate paths
//! through the route network, plan the offer queries those paths need,
//! and assemble timing-valid itineraries from the fetched offers.

mod assemble;
mod config;
mod listener;
mod paths;
mod rank;
mod requests;
mod scan;

pub use assemble::{
    FlightCombinations, OfferTable, are_flights_compatible, combinations, get_path_solutions,
};
pub use config::ScanConfig;
pub use listener::{LogListener, NoopListener, ScanListener};
pub use paths::{PathFinder, find_paths};
pub use rank::rank_solutions;
pub use requests::{OfferRequest, calculate_needed_requests};
pub use scan::{
    MAX_WINDOW_DAYS, OfferSource, RouteSource, ScanError, ScanRequest, ScanResult, Scanner,
};
