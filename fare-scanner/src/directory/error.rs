//! Airport directory error types.

use crate::backend::BackendError;

/// Errors that can occur when loading the airport directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Fetching from the fare API failed
    #[error("failed to fetch airports: {0}")]
    Backend(#[from] BackendError),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
