//! Travel windows and timing constraints.
//!
//! A `DateWindow` is what the user asks for: "leave between these two
//! dates". A `DateConstraint` is the point-in-time rule a single flight has
//! to satisfy; checking a flight against it yields the narrower constraint
//! for the next flight of the itinerary.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{DomainError, Flight};

/// Days between consecutive availability queries.
const QUERY_STEP_DAYS: i64 = 7;

/// Inclusive range of departure dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// First permissible departure date.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last permissible departure date.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days from start to end (0 for a one-day window).
    pub fn span_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }

    /// Dates to query the provider on: `start`, then every 7 days while
    /// still within the window.
    ///
    /// For a span that is a whole number of weeks this is one more date than
    /// `ceil(days / 7)`: the extra query on `end` covers flights on `end`
    /// itself, which the previous query's six flex days stop short of.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fare_scanner::domain::DateWindow;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2016, 10, d).unwrap();
    /// let window = DateWindow::new(day(10), day(20)).unwrap();
    /// assert_eq!(window.query_dates(), vec![day(10), day(17)]);
    /// ```
    pub fn query_dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut date = self.start;
        while date <= self.end {
            dates.push(date);
            date = match date.checked_add_signed(Duration::days(QUERY_STEP_DAYS)) {
                Some(next) => next,
                None => break,
            };
        }
        dates
    }

    /// The constraint the first flight of any itinerary must satisfy.
    ///
    /// Departure may happen from midnight on `start` up to the last second
    /// of `end`; every flight must also land by the last second of `end`.
    pub fn departure_constraint(
        &self,
        min_between_flights: Duration,
        max_between_flights: Duration,
    ) -> DateConstraint {
        let earliest_out = self.start.and_time(NaiveTime::MIN);
        let latest_in = self.end.and_time(NaiveTime::MIN) + Duration::seconds(86_399);

        DateConstraint {
            earliest_out,
            latest_out: latest_in,
            latest_in,
            min_between_flights,
            max_between_flights,
        }
    }
}

/// Timing rule for the next flight of an itinerary.
///
/// Never mutated: [`DateConstraint::after`] returns a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateConstraint {
    /// Earliest allowed departure.
    pub earliest_out: NaiveDateTime,
    /// Latest allowed departure.
    pub latest_out: NaiveDateTime,
    /// Latest allowed arrival. Carried unchanged through the whole itinerary.
    pub latest_in: NaiveDateTime,
    /// Shortest allowed layover.
    pub min_between_flights: Duration,
    /// Longest allowed layover.
    pub max_between_flights: Duration,
}

impl DateConstraint {
    /// Returns true if `flight` departs inside `[earliest_out, latest_out]`
    /// and lands no later than `latest_in`.
    pub fn admits(&self, flight: &Flight) -> bool {
        flight.arrival() <= self.latest_in
            && flight.departure() >= self.earliest_out
            && flight.departure() <= self.latest_out
    }

    /// The constraint for the flight following `flight`: its departure must
    /// fall within the layover bounds after `flight` lands.
    pub fn after(&self, flight: &Flight) -> Self {
        let landed = flight.arrival();
        Self {
            earliest_out: landed
                .checked_add_signed(self.min_between_flights)
                .unwrap_or(NaiveDateTime::MAX),
            latest_out: landed
                .checked_add_signed(self.max_between_flights)
                .unwrap_or(NaiveDateTime::MAX),
            ..*self
        }
    }
}
