//! On-disk copy of the airport directory.
//!
//! The airports aggregate is large and changes rarely, so the CLI keeps the
//! extracted directory in a JSON file. An entry is only reused when it was
//! written for the same airports URL and is younger than the TTL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DirectoryError;
use super::names::AirportInfo;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    fetched_at: DateTime<Utc>,
    source: String,
    airports: Vec<AirportInfo>,
}

impl CacheFile {
    fn is_usable(&self, source: &str, ttl: Duration, now: DateTime<Utc>) -> bool {
        if self.source != source {
            return false;
        }

        let expires = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.fetched_at.checked_add_signed(ttl));

        // Past chrono's range means never
        expires.is_none_or(|expires| now < expires)
    }
}

/// Where the directory is stored and for how long it stays valid.
#[derive(Debug, Clone)]
pub struct DirectoryCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl DirectoryCacheConfig {
    /// Cache at `path`, valid for one day.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for DirectoryCacheConfig {
    fn default() -> Self {
        Self::new("airports_cache.json")
    }
}

/// JSON file holding the last fetched directory.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    config: DirectoryCacheConfig,
}

impl DirectoryCache {
    pub fn new(config: DirectoryCacheConfig) -> Self {
        Self { config }
    }

    /// Airports stored for `source`, if the file is readable and fresh.
    ///
    /// A missing, corrupt, expired or foreign file is a miss, never an error.
    pub fn load(&self, source: &str) -> Option<Vec<AirportInfo>> {
        let path = &self.config.path;
        let contents = std::fs::read_to_string(path).ok()?;

        let file: CacheFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable airport cache");
                return None;
            }
        };

        if !file.is_usable(source, self.config.ttl, Utc::now()) {
            debug!(
                path = %path.display(),
                fetched_at = %file.fetched_at,
                cached_source = %file.source,
                "Airport cache is stale"
            );
            return None;
        }

        Some(file.airports)
    }

    /// Replace the file with `airports` fetched from `source`.
    pub fn save(&self, source: &str, airports: &[AirportInfo]) -> Result<(), DirectoryError> {
        let file = CacheFile {
            fetched_at: Utc::now(),
            source: source.to_string(),
            airports: airports.to_vec(),
        };

        let path = &self.config.path;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| DirectoryError::Cache {
                message: format!("cannot create {}: {e}", dir.display()),
            })?;
        }

        let json = serde_json::to_vec_pretty(&file).map_err(|e| DirectoryError::Cache {
            message: format!("cannot encode airports: {e}"),
        })?;
        std::fs::write(path, json).map_err(|e| DirectoryError::Cache {
            message: format!("cannot write {}: {e}", path.display()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Airport;
    use tempfile::tempdir;

    const SOURCE: &str = "https://example.test/airports";

    fn bremen() -> AirportInfo {
        AirportInfo {
            code: Airport::parse("BRE").unwrap(),
            name: "Bremen".to_string(),
            country: Some("DE".to_string()),
        }
    }

    fn cache_in(dir: &Path) -> DirectoryCache {
        DirectoryCache::new(DirectoryCacheConfig::new(dir.join("airports.json")))
    }

    #[test]
    fn written_directory_is_read_back() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        let stansted = AirportInfo {
            code: Airport::parse("STN").unwrap(),
            name: "London Stansted".to_string(),
            country: None,
        };

        cache.save(SOURCE, &[bremen(), stansted.clone()]).unwrap();

        assert_eq!(cache.load(SOURCE), Some(vec![bremen(), stansted]));
    }

    #[test]
    fn other_source_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.save(SOURCE, &[bremen()]).unwrap();

        assert!(cache.load("http://127.0.0.1:8080/airports").is_none());
    }

    #[test]
    fn zero_ttl_is_always_stale() {
        let dir = tempdir().unwrap();
        let cache = DirectoryCache::new(
            DirectoryCacheConfig::new(dir.path().join("airports.json")).with_ttl(Duration::ZERO),
        );
        cache.save(SOURCE, &[bremen()]).unwrap();

        assert!(cache.load(SOURCE).is_none());
    }

    #[test]
    fn freshness_window() {
        let fetched_at = Utc::now();
        let file = CacheFile {
            fetched_at,
            source: SOURCE.to_string(),
            airports: Vec::new(),
        };
        let hour = Duration::from_secs(3600);

        assert!(file.is_usable(SOURCE, hour, fetched_at + chrono::Duration::minutes(59)));
        assert!(!file.is_usable(SOURCE, hour, fetched_at + chrono::Duration::minutes(60)));
        assert!(file.is_usable(SOURCE, Duration::MAX, fetched_at + chrono::Duration::days(3650)));
    }

    #[test]
    fn missing_or_corrupt_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        assert!(cache.load(SOURCE).is_none());

        std::fs::write(cache.path(), "{\"fetched_at\": 3").unwrap();
        assert!(cache.load(SOURCE).is_none());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("fare-scanner").join("airports.json");
        let cache = DirectoryCache::new(DirectoryCacheConfig::new(&path));

        cache.save(SOURCE, &[bremen()]).unwrap();

        assert!(path.exists());
        assert_eq!(cache.ttl(), Duration::from_secs(86_400));
    }
}
