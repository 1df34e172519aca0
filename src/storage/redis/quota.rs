//! Redis quota store

use super::pool::RedisPool;
use crate::config::RedisConfig;
use crate::core::identity::ClientIdentity;
use crate::core::quota::{QuotaDecision, QuotaPolicy, QuotaRecord};
use crate::storage::traits::{QuotaStore, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use redis::{AsyncCommands, Script};
use uuid::Uuid;

// KEYS[1] record key
// ARGV[1] now (ms), ARGV[2] window (ms), ARGV[3] cap, ARGV[4] member
// Returns {allowed, retained, oldest (ms)}
static RESERVE_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
redis.call('ZREMRANGEBYSCORE', KEYS[1], '-inf', now - window)
local count = redis.call('ZCARD', KEYS[1])
local allowed = 0
if count < tonumber(ARGV[3]) then
    redis.call('ZADD', KEYS[1], now, ARGV[4])
    count = count + 1
    allowed = 1
end
redis.call('PEXPIRE', KEYS[1], window)
local oldest = now
local first = redis.call('ZRANGE', KEYS[1], 0, 0, 'WITHSCORES')
if first[2] then
    oldest = tonumber(first[2])
end
return {allowed, count, oldest}
"#,
    )
});

/// Quota records in Redis sorted sets
#[derive(Debug)]
pub struct RedisQuotaStore {
    pool: RedisPool,
}

impl RedisQuotaStore {
    /// Create the store and try an initial connection
    pub async fn connect(config: &RedisConfig) -> StorageResult<Self> {
        let pool = RedisPool::new(config)?;
        pool.warm_up().await;
        Ok(Self { pool })
    }

    /// Health check
    pub async fn health_check(&self) -> StorageResult<()> {
        self.pool.health_check().await
    }

    fn millis_to_time(ms: i64) -> StorageResult<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| StorageError::Corrupt(format!("timestamp out of range: {}", ms)))
    }
}

#[async_trait]
impl QuotaStore for RedisQuotaStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn load(&self, client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>> {
        let mut conn = self.pool.get_connection().await?;
        let entries: redis::RedisResult<Vec<(String, f64)>> = conn
            .zrange_withscores(self.pool.key(client.as_str()), 0, -1)
            .await;
        let entries = entries.inspect_err(|_| self.pool.invalidate())?;

        if entries.is_empty() {
            return Ok(None);
        }

        let mut requests = entries
            .into_iter()
            .map(|(_, score)| Self::millis_to_time(score as i64))
            .collect::<StorageResult<Vec<_>>>()?;
        requests.sort();
        let last_reset = requests[0];

        Ok(Some(QuotaRecord {
            client_id: client.clone(),
            requests,
            last_reset,
        }))
    }

    async fn reserve(
        &self,
        client: &ClientIdentity,
        now: DateTime<Utc>,
        policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision> {
        let now_ms = now.timestamp_millis();
        let member = format!("{}-{}", now_ms, Uuid::new_v4().simple());

        let mut conn = self.pool.get_connection().await?;
        let reply: redis::RedisResult<(i64, i64, i64)> = RESERVE_SCRIPT
            .key(self.pool.key(client.as_str()))
            .arg(now_ms)
            .arg(policy.window_millis())
            .arg(policy.max_requests)
            .arg(member)
            .invoke_async(&mut conn)
            .await;
        let (allowed, retained, oldest_ms) = reply.inspect_err(|_| self.pool.invalidate())?;

        let oldest = Self::millis_to_time(oldest_ms)?;
        Ok(QuotaDecision {
            allowed: allowed == 1,
            remaining: if allowed == 1 {
                policy.max_requests.saturating_sub(retained as u32)
            } else {
                0
            },
            limit: policy.max_requests,
            reset_time: oldest + policy.window,
        })
    }
}
