//! Fare API client.
//!
//! This module provides an HTTP client for the airline's public fare
//! search endpoints, which supply both the route network and per-day
//! flight availability.
//!
//! Key characteristics of the API:
//! - The airports aggregate lists every airport with its outgoing routes;
//!   routes are tagged (`airport:STN`, `city:LONDON`) and only `airport:`
//!   routes are real connections
//! - An availability query returns the query date plus six flex days of
//!   flights for one origin/destination pair
//! - Timestamps are local wall-clock times without an offset

mod client;
mod convert;
mod error;
mod types;

pub use client::{BackendClient, BackendConfig};
pub use convert::{
    ConversionError, convert_availability, convert_directory, convert_route_graph,
};
pub use error::BackendError;
pub use types::{
    AirportDto, AirportsAggregate, AvailabilityResponse, FareAmountDto, FareDto, FlightDto,
    TripDateDto, TripDto,
};
