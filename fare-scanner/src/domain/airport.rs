//! Airport code types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirport {
    reason: &'static str,
}

/// An airport identifier, the vertex type of the route graph.
///
/// Codes are opaque: the scanner never looks inside them. The only
/// guarantee is that a code is non-empty and made of uppercase ASCII
/// letters and digits, which covers IATA codes (`STN`) as well as the
/// short labels used in tests (`A`).
///
/// # Examples
///
/// ```
/// use fare_scanner::domain::Airport;
///
/// let stn = Airport::parse("STN").unwrap();
/// assert_eq!(stn.as_str(), "STN");
///
/// // Lowercase is rejected by `parse`...
/// assert!(Airport::parse("stn").is_err());
///
/// // ...but accepted by `parse_normalized`
/// assert_eq!(Airport::parse_normalized(" stn ").unwrap(), stn);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Airport(String);

impl Airport {
    /// Parse an airport code from a string.
    ///
    /// The input must be non-empty and contain only uppercase ASCII
    /// letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidAirport> {
        if s.is_empty() {
            return Err(InvalidAirport {
                reason: "must not be empty",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidAirport {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(Airport(s.to_string()))
    }

    /// Parse a code from user input, trimming whitespace and upper-casing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirport> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Parse a comma-separated list of codes (`"BRE,HAM"`).
    ///
    /// Empty items are skipped, so a trailing comma is harmless.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, InvalidAirport> {
        s.split(',')
            .filter(|item| !item.trim().is_empty())
            .map(Self::parse_normalized)
            .collect()
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Airport {
    type Error = InvalidAirport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Airport> for String {
    fn from(airport: Airport) -> Self {
        airport.0
    }
}

impl fmt::Debug for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Airport({})", self.0)
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
