//! Persistent TTL cache for provider responses
//!
//! Geocoding results, weather snapshots and generated candidate lists are
//! cached on disk so repeated plan requests for the same route do not hammer
//! the external APIs. Entries carry an absolute expiry timestamp; expired
//! entries are removed on read.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use rand::RngExt;
use serde::Deserialize;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_CACHE: OnceCell<ProviderCache> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    /// Unix timestamp (seconds)
    expires_at: u64,
}

/// Disk-backed cache keyed by provider-specific strings
pub struct ProviderCache {
    store: Keyspace,
}

fn read_raw(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl ProviderCache {
    /// Open (or create) the cache database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("cache", fjall::KeyspaceCreateOptions::default)?;
        Ok(ProviderCache { store: items })
    }

    /// Store a serializable value with a time-to-live.
    #[tracing::instrument(name = "cache_put", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieve a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "cache_get", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || read_raw(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("cache miss");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        if now < entry.expires_at {
            tracing::debug!("cache hit");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("cache entry expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually remove a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// Initializes the global cache. **Must be called once before use.**
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = ProviderCache::open(path)?;
    GLOBAL_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

/// Whether the global cache has been initialized; providers skip caching
/// entirely when it has not (library consumers and unit tests).
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL_CACHE.get().is_some()
}

fn get_cache() -> Option<&'static ProviderCache> {
    GLOBAL_CACHE.get()
}

/// Store a value in the global cache; a no-op when the cache is not
/// initialized.
pub async fn put<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    match get_cache() {
        Some(cache) => cache.put(key, value, ttl).await,
        None => Ok(()),
    }
}

/// Store a value with +-10% jitter on the TTL so a burst of writes does not
/// expire at the same instant.
pub async fn put_jittered<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    let jitter: f32 = rand::rng().random_range(0.9..1.1);
    let secs = (ttl.as_secs_f32() * jitter).max(1.0) as u64;
    put(key, value, Duration::from_secs(secs)).await
}

/// Read a value from the global cache; always a miss when the cache is not
/// initialized.
pub async fn get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    match get_cache() {
        Some(cache) => cache.get(key).await,
        None => Ok(None),
    }
}
