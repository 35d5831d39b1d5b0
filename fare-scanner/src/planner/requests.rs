//! Planning which offer queries a scan needs.
//!
//! The provider answers one query with a week of departures (the query
//! date plus six flex days), so each distinct edge is queried once per
//! week of the travel window rather than once per day.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{Airport, DateWindow, Path};

/// One availability query: flights on an edge around a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferRequest {
    pub origin: Airport,
    pub destination: Airport,
    pub date: NaiveDate,
}

impl OfferRequest {
    /// Create a new request.
    pub fn new(origin: Airport, destination: Airport, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }
}

/// Compute the deduplicated set of queries covering every edge of `paths`
/// across `window`.
///
/// An edge shared by several paths is queried once per date. The result is
/// ordered, so fetches are issued in a stable order.
pub fn calculate_needed_requests<'a, I>(paths: I, window: &DateWindow) -> BTreeSet<OfferRequest>
where
    I: IntoIterator<Item = &'a Path>,
{
    let dates = window.query_dates();

    paths
        .into_iter()
        .flat_map(|path| path.edges())
        .flat_map(|edge| {
            dates.iter().map(move |date| {
                OfferRequest::new(edge.origin.clone(), edge.destination.clone(), *date)
            })
        })
        .collect()
}
