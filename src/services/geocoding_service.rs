use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::store::{KvStore, KvStoreExt, GEOCODE_CACHE_KEY};
use crate::utils::time;

const CACHE_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000; // 1 week

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    coords: Coordinates,
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Best-effort forward geocoding for the driver map. A failed lookup leaves
/// the candidate record intact and simply yields no map position; results are
/// cached for a week keyed by normalized location text.
#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    store: Arc<dyn KvStore>,
    base_url: String,
}

impl GeocodingService {
    pub fn new(client: Client, store: Arc<dyn KvStore>, base_url: String) -> Self {
        Self {
            client,
            store,
            base_url,
        }
    }

    pub async fn coordinates_for(&self, candidate: &Candidate) -> Option<Coordinates> {
        if let (Some(lat), Some(lng)) = (candidate.lat, candidate.lng) {
            return Some(Coordinates { lat, lng });
        }

        let query = candidate.location.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        if let Some(coords) = self.cached(&query) {
            return Some(coords);
        }

        match self.lookup(&query).await {
            Ok(Some(coords)) => {
                self.remember(&query, coords);
                Some(coords)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, %query, "geocoding lookup failed");
                None
            }
        }
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);
        let results: Vec<NominatimResult> = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", "gb"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(first) = results.first() else {
            return Ok(None);
        };
        let lat = first
            .lat
            .parse()
            .map_err(|_| Error::Internal("non-numeric latitude in geocoding response".to_string()))?;
        let lng = first
            .lon
            .parse()
            .map_err(|_| Error::Internal("non-numeric longitude in geocoding response".to_string()))?;
        Ok(Some(Coordinates { lat, lng }))
    }

    fn read_cache(&self) -> HashMap<String, CacheEntry> {
        self.store
            .get_json(GEOCODE_CACHE_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn cached(&self, query: &str) -> Option<Coordinates> {
        let mut cache = self.read_cache();
        let now = time::now_millis();
        let fresh = cache
            .get(query)
            .filter(|entry| now - entry.timestamp < CACHE_TTL_MS)
            .map(|entry| entry.coords);
        // stale entries are evicted on lookup, not proactively swept
        if fresh.is_none() && cache.remove(query).is_some() {
            self.write_cache(&cache);
        }
        fresh
    }

    fn remember(&self, query: &str, coords: Coordinates) {
        let mut cache = self.read_cache();
        cache.insert(
            query.to_string(),
            CacheEntry {
                coords,
                timestamp: time::now_millis(),
            },
        );
        self.write_cache(&cache);
    }

    fn write_cache(&self, cache: &HashMap<String, CacheEntry>) {
        if let Err(err) = self.store.put_json(GEOCODE_CACHE_KEY, cache) {
            tracing::warn!(error = %err, "failed to write geocode cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service(store: Arc<dyn KvStore>) -> GeocodingService {
        GeocodingService::new(Client::new(), store, "http://127.0.0.1:9".to_string())
    }

    #[tokio::test]
    async fn existing_coordinates_short_circuit_the_lookup() {
        let svc = service(Arc::new(MemoryStore::new()));
        let candidate = Candidate {
            location: "Manchester".to_string(),
            lat: Some(53.4808),
            lng: Some(-2.2426),
            ..Candidate::default()
        };
        let coords = svc.coordinates_for(&candidate).await.unwrap();
        assert_eq!(coords.lat, 53.4808);
    }

    #[tokio::test]
    async fn blank_location_yields_no_position() {
        let svc = service(Arc::new(MemoryStore::new()));
        let candidate = Candidate {
            location: "   ".to_string(),
            ..Candidate::default()
        };
        assert!(svc.coordinates_for(&candidate).await.is_none());
    }

    #[tokio::test]
    async fn fresh_cache_entries_are_served_without_a_call() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let svc = service(Arc::clone(&store));
        // base_url points at a closed port, so a hit proves the cache was used
        svc.remember("leeds", Coordinates { lat: 53.8008, lng: -1.5491 });

        let candidate = Candidate {
            location: " Leeds ".to_string(),
            ..Candidate::default()
        };
        let coords = svc.coordinates_for(&candidate).await.unwrap();
        assert_eq!(coords.lng, -1.5491);
    }

    #[tokio::test]
    async fn stale_entries_are_evicted_and_failures_are_non_fatal() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let svc = service(Arc::clone(&store));
        let mut cache = HashMap::new();
        cache.insert(
            "leeds".to_string(),
            CacheEntry {
                coords: Coordinates { lat: 53.8008, lng: -1.5491 },
                timestamp: time::now_millis() - CACHE_TTL_MS - 1,
            },
        );
        store.put_json(GEOCODE_CACHE_KEY, &cache).unwrap();

        let candidate = Candidate {
            location: "Leeds".to_string(),
            ..Candidate::default()
        };
        // stale entry ignored, network unreachable, so no position
        assert!(svc.coordinates_for(&candidate).await.is_none());

        let after: HashMap<String, CacheEntry> =
            store.get_json(GEOCODE_CACHE_KEY).unwrap().unwrap();
        assert!(after.is_empty());
    }
}
