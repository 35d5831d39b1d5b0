//! Airport directory.
//!
//! Provides airport code → display details mapping, fetched from the fare
//! API and optionally persisted to disk so repeated runs skip the request.

mod cache;
mod error;
mod names;

pub use cache::{DirectoryCache, DirectoryCacheConfig};
pub use error::DirectoryError;
pub use names::{AirportDirectory, AirportInfo};
