//! Cache-first fetching
//!
//! This service serves reads from a cache when it can, refreshing the entry in
//! the background so the next read is fresher. Two storage backends exist: an
//! in-process map and Redis.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::config::settings::{CacheBackend, CacheConfig};
use crate::utils::errors::{Result, VolunteamError};

/// Key/value storage behind [`CacheService`]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<bool>;

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Cache entry with TTL information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub ttl_seconds: u64,
}

impl<T> CacheEntry<T> {
    pub fn is_expired(&self) -> bool {
        let age = chrono::Utc::now() - self.created_at;
        age.num_seconds() >= self.ttl_seconds as i64
    }
}

/// In-process cache backend
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry<String>>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let expired = match self.entries.read().await.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.data.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(key = %key, "Cache entry expired, removing");
            self.entries.write().await.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let entry = CacheEntry {
            data: value,
            created_at: chrono::Utc::now(),
            ttl_seconds,
        };
        let mut entries = self.entries.write().await;
        entries.retain(|_, existing| !existing.is_expired());
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

/// Redis cache backend
#[derive(Clone, Debug)]
pub struct RedisCacheStore {
    client: Client,
    prefix: String,
}

impl RedisCacheStore {
    /// Create a new RedisCacheStore instance
    pub fn new(redis_url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = Client::open(redis_url).map_err(VolunteamError::Redis)?;
        Ok(Self { client, prefix: prefix.into() })
    }

    /// Get Redis connection
    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        self.client.get_async_connection().await.map_err(VolunteamError::Redis)
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);
        let value: Option<String> = conn.get(&full_key).await?;
        debug!(key = %full_key, hit = value.is_some(), "Redis cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);
        let _: () = conn.set_ex(&full_key, value, ttl_seconds).await?;
        debug!(key = %full_key, ttl = ttl_seconds, "Value set in Redis");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = conn.del(self.full_key(key)).await?;
        Ok(deleted > 0)
    }

    async fn health_check(&self) -> Result<bool> {
        match self.get_connection().await {
            Ok(mut conn) => {
                let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                match result {
                    Ok(response) => Ok(response == "PONG"),
                    Err(e) => {
                        warn!(error = %e, "Redis health check failed");
                        Ok(false)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Redis connection failed");
                Ok(false)
            }
        }
    }
}

/// Where a cache-first value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Cache,
    Network,
}

/// Result of [`CacheService::get_cache_first`]
#[derive(Debug)]
pub struct CacheFirst<T> {
    pub value: T,
    pub source: FetchSource,
    /// Background refresh started for a cache hit
    pub refresh: Option<JoinHandle<()>>,
}

/// Cache-first reads over a [`CacheStore`]
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStore>,
    ttl_seconds: u64,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// Build the backend selected in configuration
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let store: Arc<dyn CacheStore> = match config.backend {
            CacheBackend::Memory => Arc::new(MemoryCacheStore::new()),
            CacheBackend::Redis => {
                let redis_url = config.redis_url.as_deref().ok_or_else(|| {
                    VolunteamError::Config("Redis URL is required for the redis cache backend".to_string())
                })?;
                Arc::new(RedisCacheStore::new(redis_url, config.prefix.clone())?)
            }
        };
        Ok(Self::new(store, config.ttl_seconds))
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Return the cached value for `key` if any, refreshing it from `network`
    /// in the background; otherwise wait for `network` and cache its value.
    ///
    /// Cache failures are logged and treated as a miss.
    pub async fn get_cache_first<T, F>(&self, key: &str, network: F) -> Result<CacheFirst<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        match self.read::<T>(key).await {
            Some(value) => {
                debug!(key = %key, "Serving cached value, refreshing in background");
                let service = self.clone();
                let key = key.to_string();
                let refresh = tokio::spawn(async move {
                    match network.await {
                        Ok(fresh) => service.write(&key, &fresh).await,
                        Err(e) => warn!(key = %key, error = %e, "Background cache refresh failed"),
                    }
                });
                Ok(CacheFirst { value, source: FetchSource::Cache, refresh: Some(refresh) })
            }
            None => {
                let value = network.await?;
                self.write(key, &value).await;
                Ok(CacheFirst { value, source: FetchSource::Network, refresh: None })
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding corrupted cache entry");
                if let Err(e) = self.store.delete(key).await {
                    warn!(key = %key, error = %e, "Failed to remove corrupted cache entry");
                }
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.store.set(key, serialized, self.ttl_seconds).await {
            warn!(key = %key, error = %e, "Cache write failed");
        }
    }
}
