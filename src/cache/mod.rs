use anyhow::{anyhow, Result};

use crate::config::settings::{CacheConfig, CacheKind};

pub mod memory;
pub mod redis;

use self::memory::MemoryStore;
use self::redis::RedisStore;

/// Configured token store backend.
///
/// The store is advisory: a missing value is never an error, the gateway
/// simply falls back to the upstream call.
#[derive(Clone)]
pub enum StoreKind {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl StoreKind {
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            StoreKind::Memory(s) => Ok(s.get(key).await),
            StoreKind::Redis(s) => s.get(key).await,
        }
    }

    pub async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        match self {
            StoreKind::Memory(s) => {
                s.put(key, value, ttl_seconds).await;
                Ok(())
            }
            StoreKind::Redis(s) => s.put(key, value, ttl_seconds).await,
        }
    }
}

/// Build the store from config. `None` disables caching entirely.
pub fn build_store(cfg: &CacheConfig) -> Result<Option<StoreKind>> {
    match cfg.kind {
        CacheKind::Disabled => Ok(None),
        CacheKind::Memory => Ok(Some(StoreKind::Memory(MemoryStore::new()))),
        CacheKind::Redis => {
            let url = cfg
                .redis_url
                .as_ref()
                .ok_or_else(|| anyhow!("cache.redis_url is required when cache.kind is 'redis'"))?;
            Ok(Some(StoreKind::Redis(RedisStore::connect(url)?)))
        }
    }
}
