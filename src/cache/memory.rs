use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: i64, // UNIX timestamp
}

/// In-process store: key -> (value, expiry).
///
/// Expired entries are filtered on read and overwritten on the next put,
/// so there is no background cleanup task.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let mut map = self.inner.write().await;
        map.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now().timestamp() + ttl_seconds as i64,
            },
        );
    }

    /// Get a value if it exists and is not expired
    pub async fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(key)
            .filter(|e| Utc::now().timestamp() < e.expires_at)
            .map(|e| e.value.clone())
    }
}
