//! End-to-end itinerary scan.
//!
//! A scan fetches the route network, enumerates candidate paths, fetches
//! offers for every edge of those paths, and assembles the timing-valid
//! combinations into ranked solutions.

use std::collections::BTreeSet;
use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, trace};

use crate::domain::{Airport, DateWindow, Flight, Path, RouteGraph, Solution};

use super::assemble::{OfferTable, get_path_solutions};
use super::config::ScanConfig;
use super::listener::{NoopListener, ScanListener};
use super::paths::find_paths;
use super::rank::rank_solutions;
use super::requests::{OfferRequest, calculate_needed_requests};

/// Error from an itinerary scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Invalid scan parameters
    #[error("invalid scan request: {0}")]
    InvalidArgument(String),

    /// The route or offer source failed
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Source of the route network.
pub trait RouteSource {
    /// Fetch the full set of airport connections.
    fn route_graph(&self) -> impl Future<Output = Result<RouteGraph, ScanError>> + Send;
}

/// Source of flight offers.
pub trait OfferSource {
    /// Fetch offers for one edge around one date.
    ///
    /// Returns every flight the provider lists for the query; the scanner
    /// applies its own timing constraints afterwards.
    fn offers(
        &self,
        request: &OfferRequest,
    ) -> impl Future<Output = Result<Vec<Flight>, ScanError>> + Send;
}

/// Longest window a single scan may cover.
pub const MAX_WINDOW_DAYS: i64 = 366;

/// What to scan for.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Airports the trip may start from.
    pub origins: Vec<Airport>,

    /// Airports the trip may end at.
    pub destinations: Vec<Airport>,

    /// Days on which the trip may take place.
    pub window: DateWindow,
}

impl ScanRequest {
    /// Create a new scan request.
    pub fn new(origins: Vec<Airport>, destinations: Vec<Airport>, window: DateWindow) -> Self {
        Self {
            origins,
            destinations,
            window,
        }
    }

    /// Validate the scan request.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.origins.is_empty() {
            return Err(ScanError::InvalidArgument(
                "at least one origin is required".to_string(),
            ));
        }

        if self.destinations.is_empty() {
            return Err(ScanError::InvalidArgument(
                "at least one destination is required".to_string(),
            ));
        }

        if self.window.span_days() > MAX_WINDOW_DAYS {
            return Err(ScanError::InvalidArgument(format!(
                "date window spans {} days; at most {MAX_WINDOW_DAYS} allowed",
                self.window.span_days()
            )));
        }

        Ok(())
    }
}

/// Result of a scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Valid itineraries, earliest departure first.
    pub solutions: Vec<Solution>,

    /// Number of candidate paths found in the route network.
    pub paths_found: usize,

    /// Number of distinct offer requests issued.
    pub requests_made: usize,
}

impl ScanResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            solutions: Vec::new(),
            paths_found: 0,
            requests_made: 0,
        }
    }
}

/// Itinerary scanner over a route source and an offer source.
pub struct Scanner<'a, R, O> {
    routes: &'a R,
    offers: &'a O,
    config: &'a ScanConfig,
    listener: &'a dyn ScanListener,
}

impl<'a, R, O> Scanner<'a, R, O>
where
    R: RouteSource + Sync,
    O: OfferSource + Sync,
{
    /// Create a new scanner that reports progress to nobody.
    pub fn new(routes: &'a R, offers: &'a O, config: &'a ScanConfig) -> Self {
        Self {
            routes,
            offers,
            config,
            listener: &NoopListener,
        }
    }

    /// Report progress to `listener`.
    pub fn with_listener(mut self, listener: &'a dyn ScanListener) -> Self {
        self.listener = listener;
        self
    }

    /// Run a scan.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the request or configuration is unsatisfiable,
    /// before any fetching happens. `BackendUnavailable` if the route graph
    /// or any offer request fails; the remaining offer requests are then
    /// dropped and no partial result is returned.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
        request.validate()?;
        self.config.validate()?;

        self.listener.getting_network();
        let graph = self.routes.route_graph().await?;
        debug!(
            airports = graph.airport_count(),
            routes = graph.route_count(),
            "Route graph fetched"
        );

        self.listener.finding_paths();
        let paths: Vec<Path> = find_paths(
            &request.origins,
            &request.destinations,
            &graph,
            self.config.max_hops,
        )?
        .collect();
        self.listener.paths_found(&paths);

        if paths.is_empty() {
            debug!("No paths between origins and destinations");
            self.listener.solutions_found(0);
            return Ok(ScanResult::empty());
        }

        let requests = calculate_needed_requests(&paths, &request.window);
        self.listener.fetching_offers(requests.len());
        let table = self.fetch_offers(&requests).await?;
        debug!(
            edges = table.edge_count(),
            flights = table.flight_count(),
            "Offers fetched"
        );

        self.listener.finding_solutions();
        let constraint = request
            .window
            .departure_constraint(self.config.min_layover(), self.config.max_layover());

        let mut solutions = Vec::new();
        for path in &paths {
            if let Some(edge) = path.edges().iter().find(|e| !table.contains_edge(e)) {
                debug!(%path, %edge, "No offers for edge, skipping path");
                continue;
            }

            let found = get_path_solutions(path, &table, &constraint);
            trace!(%path, solutions = found.len(), "Path assembled");
            solutions.extend(found);
        }

        let solutions = rank_solutions(solutions);
        self.listener.solutions_found(solutions.len());

        Ok(ScanResult {
            solutions,
            paths_found: paths.len(),
            requests_made: requests.len(),
        })
    }

    /// Fetch every request with bounded concurrency and group the offers by edge.
    ///
    /// Results are consumed in request order so the table is the same for
    /// the same responses. The first failure drops the in-flight fetches.
    async fn fetch_offers(
        &self,
        requests: &BTreeSet<OfferRequest>,
    ) -> Result<OfferTable, ScanError> {
        // Owned requests keep the future Send for any caller lifetime
        let batches: Vec<Vec<Flight>> = stream::iter(requests.iter().cloned())
            .map(|request| async move {
                let request = &request;
                trace!(
                    origin = %request.origin,
                    destination = %request.destination,
                    date = %request.date,
                    "Fetching offers"
                );
                self.offers.offers(request).await
            })
            .buffered(self.config.fetch_concurrency)
            .try_collect()
            .await?;

        Ok(batches.into_iter().flatten().collect())
    }
}
