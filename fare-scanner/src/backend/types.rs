//! Fare API response DTOs.
//!
//! These types map directly to the JSON the API returns. Fields the
//! scanner does not use are left out; serde ignores them. Collections
//! default to empty because the API omits them rather than sending `[]`
//! for some routes.

use serde::Deserialize;

/// Response from the airports aggregate endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportsAggregate {
    /// Every airport served.
    #[serde(default)]
    pub airports: Vec<AirportDto>,
}

/// One airport in the aggregate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDto {
    /// IATA code, e.g. "STN".
    pub iata_code: String,

    /// Human-readable name.
    pub name: String,

    /// ISO country code, lowercase ("gb").
    pub country_code: Option<String>,

    /// Tagged outgoing routes: `"airport:BRE"`, `"city:LONDON"`, ...
    #[serde(default)]
    pub routes: Vec<String>,
}

/// Response from the availability endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Currency of every amount in the response.
    pub currency: Option<String>,

    /// One trip per direction; one-way queries return a single trip.
    #[serde(default)]
    pub trips: Vec<TripDto>,
}

/// Flights for one direction of travel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub origin: String,
    pub destination: String,

    #[serde(default)]
    pub dates: Vec<TripDateDto>,
}

/// Flights on one day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDateDto {
    /// The day, as a timestamp at midnight.
    pub date_out: Option<String>,

    #[serde(default)]
    pub flights: Vec<FlightDto>,
}

/// A single flight offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    /// Seats left at the listed fares. Zero means sold out; the API uses
    /// -1 when it does not disclose the number. Required: a flight without
    /// it cannot be told apart from a sold-out one.
    pub fares_left: i64,

    /// Carrier flight number, e.g. "FR 1234".
    pub flight_number: String,

    /// `[departure, arrival]` local timestamps.
    #[serde(default)]
    pub time: Vec<String>,

    pub regular_fare: Option<FareDto>,
    pub leisure_fare: Option<FareDto>,
    pub business_fare: Option<FareDto>,
}

/// A fare class with its per-passenger-type prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDto {
    #[serde(default)]
    pub fares: Vec<FareAmountDto>,
}

/// One price within a fare class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareAmountDto {
    /// Price as a JSON number, kept unparsed so it can be read as a decimal.
    pub amount: serde_json::Number,
}
