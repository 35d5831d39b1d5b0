//! Progress notifications for a running scan.
//!
//! Listeners observe a scan without affecting its result. Every method has
//! a no-op default, so an implementation only overrides what it cares about.

use tracing::info;

use crate::domain::Path;

/// Observer of scan progress.
pub trait ScanListener: Send + Sync {
    /// The route graph is being fetched.
    fn getting_network(&self) {}

    /// Path enumeration has started.
    fn finding_paths(&self) {}

    /// Path enumeration has finished.
    fn paths_found(&self, _paths: &[Path]) {}

    /// `count` offer requests are about to be issued.
    fn fetching_offers(&self, _count: usize) {}

    /// Offers are in and solutions are being assembled.
    fn finding_solutions(&self) {}

    /// Assembly has finished with `count` solutions.
    fn solutions_found(&self, _count: usize) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ScanListener for NoopListener {}

/// Listener that reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl ScanListener for LogListener {
    fn getting_network(&self) {
        info!("Getting route network");
    }

    fn finding_paths(&self) {
        info!("Finding paths");
    }

    fn paths_found(&self, paths: &[Path]) {
        info!(count = paths.len(), "Paths found");
        for path in paths {
            info!(%path, "Path");
        }
    }

    fn fetching_offers(&self, count: usize) {
        info!(requests = count, "Fetching flight offers");
    }

    fn finding_solutions(&self) {
        info!("Finding solutions");
    }

    fn solutions_found(&self, count: usize) {
        info!(count, "Solutions found");
    }
}
