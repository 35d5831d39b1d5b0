//! Domain types for the fare scanner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airport;
mod error;
mod flight;
mod price;
mod route;
mod solution;
mod window;

pub use airport::{Airport, InvalidAirport};
pub use error::DomainError;
pub use flight::Flight;
pub use price::{InvalidPrice, Price};
pub use route::{Edge, Path, RouteGraph};
pub use solution::Solution;
pub use window::{DateConstraint, DateWindow};
