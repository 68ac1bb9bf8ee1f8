use crate::models::Property;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Default lifetime of a fetched catalog
pub const DEFAULT_TTL_SECS: i64 = 300;

struct CacheEntry {
    properties: Arc<Vec<Property>>,
    fetched_at: DateTime<Utc>,
}

/// Last full, unfiltered catalog with its fetch time.
/// Entries expire after the TTL; nothing invalidates them earlier.
pub struct CatalogCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Cached catalog if it was fetched less than one TTL before `now`
    pub fn get(&self, now: DateTime<Utc>) -> Option<Arc<Vec<Property>>> {
        let entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry
            .as_ref()
            .filter(|e| now - e.fetched_at < self.ttl)
            .map(|e| Arc::clone(&e.properties))
    }

    pub fn store(&self, properties: Vec<Property>, fetched_at: DateTime<Utc>) -> Arc<Vec<Property>> {
        let properties = Arc::new(properties);
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        *entry = Some(CacheEntry {
            properties: Arc::clone(&properties),
            fetched_at,
        });
        properties
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}
