//! Conversion from fare API DTOs to domain types.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::directory::AirportInfo;
use crate::domain::{Airport, Flight, Price, RouteGraph};

use super::types::{AirportsAggregate, AvailabilityResponse, FareDto, FlightDto};

/// Timestamp format used throughout the API, e.g. `2016-10-10T06:30:00.000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Route tag marking a direct airport-to-airport connection.
const AIRPORT_ROUTE_PREFIX: &str = "airport:";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse an airport code
    #[error("invalid airport code: {0}")]
    InvalidAirport(String),

    /// Failed to parse a timestamp
    #[error("invalid timestamp: {0}")]
    InvalidTime(String),

    /// Failed to parse a fare amount
    #[error("invalid fare amount: {0}")]
    InvalidPrice(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Flight has seats but no fare in any class
    #[error("no fare listed for flight {0}")]
    MissingFare(String),
}

/// Build the route graph from the airports aggregate.
///
/// Only `airport:` routes become edges. Every listed airport is a vertex,
/// even one without routes. Entries with unparseable codes are skipped.
pub fn convert_route_graph(aggregate: &AirportsAggregate) -> RouteGraph {
    let mut graph = RouteGraph::new();

    for dto in &aggregate.airports {
        let Ok(origin) = Airport::parse(&dto.iata_code) else {
            debug!(code = %dto.iata_code, "Skipping airport with invalid code");
            continue;
        };
        graph.add_airport(origin.clone());

        for route in &dto.routes {
            let Some(code) = route.strip_prefix(AIRPORT_ROUTE_PREFIX) else {
                continue;
            };
            match Airport::parse(code) {
                Ok(destination) => graph.add_route(origin.clone(), destination),
                Err(_) => debug!(%origin, %route, "Skipping route with invalid code"),
            }
        }
    }

    graph
}

/// Extract airport display details from the airports aggregate.
pub fn convert_directory(aggregate: &AirportsAggregate) -> Vec<AirportInfo> {
    aggregate
        .airports
        .iter()
        .filter_map(|dto| {
            let code = Airport::parse(&dto.iata_code).ok()?;
            Some(AirportInfo {
                code,
                name: dto.name.clone(),
                country: dto.country_code.as_ref().map(|c| c.to_uppercase()),
            })
        })
        .collect()
}

/// Convert an availability response to flights.
///
/// Sold-out flights (`faresLeft == 0`) are dropped. The price of a flight
/// is the first amount of its regular fare, falling back to the leisure
/// and then the business fare.
pub fn convert_availability(
    response: &AvailabilityResponse,
) -> Result<Vec<Flight>, ConversionError> {
    let mut flights = Vec::new();

    for trip in &response.trips {
        let origin = Airport::parse(&trip.origin)
            .map_err(|_| ConversionError::InvalidAirport(trip.origin.clone()))?;
        let destination = Airport::parse(&trip.destination)
            .map_err(|_| ConversionError::InvalidAirport(trip.destination.clone()))?;

        for date in &trip.dates {
            for dto in &date.flights {
                if dto.fares_left == 0 {
                    continue;
                }
                flights.push(convert_flight(dto, &origin, &destination)?);
            }
        }
    }

    Ok(flights)
}

fn convert_flight(
    dto: &FlightDto,
    origin: &Airport,
    destination: &Airport,
) -> Result<Flight, ConversionError> {
    let [departure, arrival] = dto.time.as_slice() else {
        return Err(ConversionError::MissingField("time"));
    };

    Ok(Flight::new(
        origin.clone(),
        destination.clone(),
        parse_timestamp(departure)?,
        parse_timestamp(arrival)?,
        listed_fare(dto)?,
        dto.flight_number.clone(),
    ))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ConversionError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| ConversionError::InvalidTime(s.to_string()))
}

fn listed_fare(dto: &FlightDto) -> Result<Price, ConversionError> {
    let amount = [&dto.regular_fare, &dto.leisure_fare, &dto.business_fare]
        .into_iter()
        .flatten()
        .find_map(|fare: &FareDto| fare.fares.first())
        .map(|fare| &fare.amount)
        .ok_or_else(|| ConversionError::MissingFare(dto.flight_number.clone()))?;

    let text = amount.to_string();
    Price::parse(&text).map_err(|_| ConversionError::InvalidPrice(text))
}
