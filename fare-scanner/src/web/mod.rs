//! Web layer for the fare scanner.
//!
//! Provides HTTP JSON endpoints for airport search and itinerary scans.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
