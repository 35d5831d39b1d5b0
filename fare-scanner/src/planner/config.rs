//! Scan configuration.

use chrono::Duration;

use super::scan::ScanError;

/// Configuration parameters for an itinerary scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of flights in one itinerary.
    pub max_hops: usize,

    /// Minimum layover between consecutive flights (minutes).
    /// Connections tighter than this are rejected.
    pub min_layover_mins: i64,

    /// Maximum layover between consecutive flights (minutes).
    pub max_layover_mins: i64,

    /// Maximum number of offer requests in flight at once.
    pub fetch_concurrency: usize,
}

impl ScanConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_hops: usize,
        min_layover_mins: i64,
        max_layover_mins: i64,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            max_hops,
            min_layover_mins,
            max_layover_mins,
            fetch_concurrency,
        }
    }

    /// Returns the minimum layover as a Duration.
    pub fn min_layover(&self) -> Duration {
        Duration::minutes(self.min_layover_mins)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }

    /// Check that the parameters describe a satisfiable scan.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.max_hops < 1 {
            return Err(ScanError::InvalidArgument(
                "max_hops must be at least 1".to_string(),
            ));
        }
        if self.min_layover_mins < 0 {
            return Err(ScanError::InvalidArgument(
                "min layover must not be negative".to_string(),
            ));
        }
        if self.min_layover_mins > self.max_layover_mins {
            return Err(ScanError::InvalidArgument(format!(
                "min layover ({} min) exceeds max layover ({} min)",
                self.min_layover_mins, self.max_layover_mins
            )));
        }
        if self.fetch_concurrency < 1 {
            return Err(ScanError::InvalidArgument(
                "fetch_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_hops: 2,
            min_layover_mins: 60,  // 1 hour
            max_layover_mins: 300, // 5 hours
            fetch_concurrency: 4,
        }
    }
}
