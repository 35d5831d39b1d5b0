//! Low-fare flight itinerary scanner.
//!
//! Answers: "what is the cheapest way to get from any of these airports to
//! any of those, on these dates, with at most N flights?" Direct flights and
//! connections are both considered; connections must respect a layover
//! window.

pub mod backend;
pub mod cache;
pub mod directory;
pub mod domain;
pub mod planner;
pub mod render;
pub mod web;
