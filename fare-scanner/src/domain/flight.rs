//! Flight offers.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::{Airport, Edge, Price};

/// A single bookable flight.
///
/// Timestamps are local wall-clock times as reported by the provider; no
/// timezone normalization is applied. A `Flight` is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Flight {
    origin: Airport,
    destination: Airport,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    price: Price,
    flight_number: String,
}

impl Flight {
    /// Creates a new flight.
    pub fn new(
        origin: Airport,
        destination: Airport,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
        price: Price,
        flight_number: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            destination,
            departure,
            arrival,
            price,
            flight_number: flight_number.into(),
        }
    }

    /// Departure airport.
    pub fn origin(&self) -> &Airport {
        &self.origin
    }

    /// Arrival airport.
    pub fn destination(&self) -> &Airport {
        &self.destination
    }

    /// Scheduled departure.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Scheduled arrival.
    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Cheapest available fare.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Carrier-assigned flight number.
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// The route edge this flight serves.
    pub fn edge(&self) -> Edge {
        Edge::new(self.origin.clone(), self.destination.clone())
    }

    /// Time in the air, as a wall-clock difference.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }
}
