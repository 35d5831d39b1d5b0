//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from backend/IO errors.

use chrono::NaiveDate;

use super::{Airport, InvalidAirport, InvalidPrice};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Path has no edges
    #[error("path must have at least one edge")]
    EmptyPath,

    /// Consecutive edges don't share an airport
    #[error("edges ending at {0} and starting at {1} do not connect")]
    DisconnectedPath(Airport, Airport),

    /// Window ends before it starts
    #[error("date window ends ({end}) before it starts ({start})")]
    InvalidDateWindow { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    InvalidAirport(#[from] InvalidAirport),

    #[error(transparent)]
    InvalidPrice(#[from] InvalidPrice),
}
