//! Airport name lookup and search.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::backend::BackendClient;
use crate::domain::Airport;

use super::cache::DirectoryCache;
use super::error::DirectoryError;

/// Display details for one airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportInfo {
    pub code: Airport,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl AirportInfo {
    /// Name with the country appended when known: `"Bremen (DE)"`.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{} ({country})", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns true if any lowercase `term` occurs in the code, name or country.
    fn matches_any(&self, terms: &[String]) -> bool {
        let fields = [
            self.code.as_str().to_lowercase(),
            self.name.to_lowercase(),
            self.country.as_deref().unwrap_or_default().to_lowercase(),
        ];
        terms
            .iter()
            .any(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Thread-safe airport directory.
///
/// Provides code → details lookup with support for refresh.
#[derive(Clone)]
pub struct AirportDirectory {
    inner: Arc<RwLock<HashMap<Airport, AirportInfo>>>,
    client: BackendClient,
    cache: Option<DirectoryCache>,
}

impl AirportDirectory {
    /// Create a directory by fetching from the API.
    ///
    /// This will fail if the API is unreachable.
    pub async fn fetch(client: BackendClient) -> Result<Self, DirectoryError> {
        let airports = client.fetch_airport_directory().await?;
        Ok(Self::from_entries(client, airports))
    }

    /// Create a directory from the disk cache, fetching and saving on a miss.
    ///
    /// A failed save is logged and otherwise ignored.
    pub async fn fetch_cached(
        client: BackendClient,
        cache: DirectoryCache,
    ) -> Result<Self, DirectoryError> {
        let airports = match cache.load(client.airports_url()) {
            Some(airports) => {
                debug!(path = %cache.path().display(), count = airports.len(), "Loaded airports from cache");
                airports
            }
            None => {
                let airports = client.fetch_airport_directory().await?;
                save_or_warn(&cache, client.airports_url(), &airports);
                airports
            }
        };

        let mut directory = Self::from_entries(client, airports);
        directory.cache = Some(cache);
        Ok(directory)
    }

    /// Create a directory from known entries.
    pub fn from_entries(client: BackendClient, airports: Vec<AirportInfo>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(build_map(airports))),
            client,
            cache: None,
        }
    }

    /// Look up an airport by code.
    pub async fn get(&self, code: &Airport) -> Option<AirportInfo> {
        let guard = self.inner.read().await;
        guard.get(code).cloned()
    }

    /// Look up an airport's name by code.
    pub async fn name(&self, code: &Airport) -> Option<String> {
        let guard = self.inner.read().await;
        guard.get(code).map(|info| info.name.clone())
    }

    /// Get the number of airports in the directory.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Airports matching any of `terms`, sorted by label.
    ///
    /// A term matches case-insensitively as a substring of the code, the
    /// name or the country. No terms matches every airport.
    pub async fn search(&self, terms: &[String]) -> Vec<AirportInfo> {
        let terms: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut found: Vec<AirportInfo> = {
            let guard = self.inner.read().await;
            guard
                .values()
                .filter(|info| terms.is_empty() || info.matches_any(&terms))
                .cloned()
                .collect()
        };

        found.sort_by(|a, b| a.label().cmp(&b.label()).then_with(|| a.code.cmp(&b.code)));
        found
    }

    /// Refresh the directory from the API.
    ///
    /// On success, replaces the current mapping (and the disk cache, if
    /// one is attached). On failure, the existing mapping is preserved and
    /// the error is returned.
    pub async fn refresh(&self) -> Result<usize, DirectoryError> {
        let airports = self.client.fetch_airport_directory().await?;
        if let Some(cache) = &self.cache {
            save_or_warn(cache, self.client.airports_url(), &airports);
        }

        let map = build_map(airports);
        let count = map.len();

        let mut guard = self.inner.write().await;
        *guard = map;

        Ok(count)
    }
}

fn save_or_warn(cache: &DirectoryCache, source: &str, airports: &[AirportInfo]) {
    if let Err(e) = cache.save(source, airports) {
        warn!(path = %cache.path().display(), error = %e, "Failed to save airport cache");
    }
}

/// Build the code → details map.
fn build_map(airports: Vec<AirportInfo>) -> HashMap<Airport, AirportInfo> {
    airports
        .into_iter()
        .map(|info| (info.code.clone(), info))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendConfig;
    use crate::directory::DirectoryCacheConfig;
    use tempfile::tempdir;

    fn info(code: &str, name: &str, country: Option<&str>) -> AirportInfo {
        AirportInfo {
            code: Airport::parse(code).unwrap(),
            name: name.to_string(),
            country: country.map(str::to_string),
        }
    }

    /// Client pointing nowhere; any fetch fails fast.
    fn offline_client() -> BackendClient {
        BackendClient::new(
            BackendConfig::new()
                .with_airports_url("http://127.0.0.1:9/airports")
                .with_timeout(1),
        )
        .unwrap()
    }

    fn directory() -> AirportDirectory {
        AirportDirectory::from_entries(
            offline_client(),
            vec![
                info("STN", "London Stansted", Some("GB")),
                info("LTN", "London Luton", Some("GB")),
                info("BRE", "Bremen", Some("DE")),
                info("DUB", "Dublin", Some("IE")),
            ],
        )
    }

    fn codes(found: &[AirportInfo]) -> Vec<&str> {
        found.iter().map(|i| i.code.as_str()).collect()
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn label_includes_country() {
        assert_eq!(info("BRE", "Bremen", Some("DE")).label(), "Bremen (DE)");
        assert_eq!(info("BRE", "Bremen", None).label(), "Bremen");
    }

    #[tokio::test]
    async fn lookup_by_code() {
        let dir = directory();
        let bre = Airport::parse("BRE").unwrap();

        assert_eq!(dir.len().await, 4);
        assert!(!dir.is_empty().await);
        assert_eq!(dir.name(&bre).await.as_deref(), Some("Bremen"));
        assert_eq!(dir.get(&bre).await.unwrap().country.as_deref(), Some("DE"));
        assert!(dir.get(&Airport::parse("XXX").unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn search_without_terms_lists_everything_sorted() {
        let found = directory().search(&[]).await;
        assert_eq!(codes(&found), vec!["BRE", "DUB", "LTN", "STN"]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let found = directory().search(&terms(&["LONDON"])).await;
        assert_eq!(codes(&found), vec!["LTN", "STN"]);

        let found = directory().search(&terms(&["stn"])).await;
        assert_eq!(codes(&found), vec!["STN"]);
    }

    #[tokio::test]
    async fn search_matches_any_term() {
        let found = directory().search(&terms(&["bre", "dub"])).await;
        assert_eq!(codes(&found), vec!["BRE", "DUB"]);

        let found = directory().search(&terms(&["ie"])).await;
        assert_eq!(codes(&found), vec!["DUB"]);
    }

    #[tokio::test]
    async fn search_with_no_match_is_empty() {
        assert!(directory().search(&terms(&["paris"])).await.is_empty());
    }

    #[tokio::test]
    async fn cached_directory_skips_fetch() {
        let dir = tempdir().unwrap();
        let cache = DirectoryCache::new(DirectoryCacheConfig::new(dir.path().join("a.json")));
        let client = offline_client();
        cache
            .save(client.airports_url(), &[info("BRE", "Bremen", Some("DE"))])
            .unwrap();

        // The client is offline, so this only succeeds from the cache
        let directory = AirportDirectory::fetch_cached(client, cache)
            .await
            .unwrap();
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_existing_entries() {
        let dir = directory();
        assert!(dir.refresh().await.is_err());
        assert_eq!(dir.len().await, 4);
    }
}
