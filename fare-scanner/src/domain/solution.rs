//! Itinerary solutions.
//!
//! A `Solution` is a priced itinerary whose flights have already passed
//! the compatibility check. It is built once and never modified.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::{Airport, Flight, Price};

/// A timing-valid, priced itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    origin: Airport,
    destination: Airport,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    flights: Vec<Flight>,
    price: Price,
}

impl Solution {
    /// Build a solution from flights in travel order.
    ///
    /// Returns `None` if `flights` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fare_scanner::domain::{Airport, Flight, Price, Solution};
    ///
    /// let day = NaiveDate::from_ymd_opt(2016, 10, 10).unwrap();
    /// let a = Airport::parse("BRE").unwrap();
    /// let b = Airport::parse("STN").unwrap();
    /// let c = Airport::parse("MAD").unwrap();
    ///
    /// let flights = vec![
    ///     Flight::new(a, b.clone(), day.and_hms_opt(6, 0, 0).unwrap(),
    ///                 day.and_hms_opt(7, 0, 0).unwrap(), Price::from_minor(1000), "FR 1"),
    ///     Flight::new(b, c, day.and_hms_opt(9, 0, 0).unwrap(),
    ///                 day.and_hms_opt(12, 0, 0).unwrap(), Price::from_minor(2550), "FR 2"),
    /// ];
    ///
    /// let solution = Solution::from_flights(&flights).unwrap();
    /// assert_eq!(solution.origin().as_str(), "BRE");
    /// assert_eq!(solution.destination().as_str(), "MAD");
    /// assert_eq!(solution.price().to_string(), "35.50");
    /// ```
    pub fn from_flights(flights: &[Flight]) -> Option<Self> {
        let first = flights.first()?;
        let last = flights.last()?;

        Some(Self {
            origin: first.origin().clone(),
            destination: last.destination().clone(),
            departure: first.departure(),
            arrival: last.arrival(),
            flights: flights.to_vec(),
            price: flights.iter().map(Flight::price).sum(),
        })
    }

    /// First departure airport.
    pub fn origin(&self) -> &Airport {
        &self.origin
    }

    /// Final arrival airport.
    pub fn destination(&self) -> &Airport {
        &self.destination
    }

    /// Departure of the first flight.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Arrival of the last flight.
    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// The flights in travel order.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Sum of all flight prices.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Number of flights.
    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    /// Returns true for a single non-stop flight.
    pub fn is_direct(&self) -> bool {
        self.flights.len() == 1
    }

    /// Door-to-door time from first departure to last arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }
}
