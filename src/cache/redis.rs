use anyhow::{Context, Result};
use redis::{AsyncCommands, Client};

/// Redis-backed store. The per-write TTL is enforced with `SET .. EX`,
/// eviction is entirely Redis' concern.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).context("invalid redis url")?;
        Ok(Self { client })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    pub async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }
}
