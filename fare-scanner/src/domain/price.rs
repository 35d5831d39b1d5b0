//! Fixed-point money.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price {value:?}: {reason}")]
pub struct InvalidPrice {
    value: String,
    reason: &'static str,
}

impl InvalidPrice {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// A non-negative price in minor currency units (cents).
///
/// Prices are summed across the flights of an itinerary, so they are kept
/// as integers; floating point never enters the arithmetic. On the wire a
/// price is a decimal string (`"19.99"`).
///
/// # Examples
///
/// ```
/// use fare_scanner::domain::Price;
///
/// let a = Price::parse("19.99").unwrap();
/// let b = Price::parse("5.5").unwrap();
/// assert_eq!((a + b).to_string(), "25.49");
/// assert_eq!(a.minor_units(), 1999);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    /// Zero.
    pub const ZERO: Price = Price(0);

    /// Create a price from minor units.
    pub fn from_minor(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Parse a decimal amount such as `"19"`, `"19.9"` or `"19.99"`.
    ///
    /// Digits past the second decimal place are rounded half-down, so
    /// `"0.125"` is 12 cents and `"0.1251"` is 13. Signs, exponents and
    /// anything that is not a plain decimal are rejected.
    pub fn parse(s: &str) -> Result<Self, InvalidPrice> {
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrice::new(s, "expected digits before the decimal point"));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrice::new(s, "expected digits after the decimal point"));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| InvalidPrice::new(s, "amount too large"))?;

        let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let rest: Vec<u64> = digits.collect();

        // Half-down: only strictly more than half a cent rounds up.
        let round_up = match rest.split_first() {
            Some((&first, tail)) => first > 5 || (first == 5 && tail.iter().any(|&d| d > 0)),
            None => false,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + u64::from(round_up)))
            .map(Price)
            .ok_or_else(|| InvalidPrice::new(s, "amount too large"))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<String> for Price {
    type Error = InvalidPrice;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
