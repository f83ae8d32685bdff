//! Key-value access shared by every store.
//!
//! Only the handful of single-key primitives the stores need are exposed.
//! Each call is atomic on its own; sequences of calls are not.

use async_trait::async_trait;
use redis::Value;

/// Errors surfaced by the key-value layer and the stores built on it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered, but not with something we can interpret.
    #[error("unexpected store response: {0}")]
    Protocol(String),
    /// A write was not acknowledged with OK.
    #[error("store write not acknowledged: {0}")]
    Write(String),
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Outcome of [`KeyValueStore::set_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetIfAbsent {
    /// No value existed; the supplied one was written.
    Created,
    /// A value already existed and was left untouched.
    Existing(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Health check - verify store connectivity.
    async fn ping(&self) -> Result<bool, StoreError>;

    /// Write `value` only if `key` is absent, returning any prior value.
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: Option<u64>,
    ) -> Result<SetIfAbsent, StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Unconditional write. Without a TTL the key persists.
    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<(), StoreError>;
}

/// Redis implementation of KeyValueStore.
///
/// `set_if_absent` relies on `SET .. NX GET`, which needs Redis 7.0 or later.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: redis::Client,
}

impl RedisKeyValueStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn ping(&self) -> Result<bool, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: Option<u64>,
    ) -> Result<SetIfAbsent, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX").arg("GET");
        if let Some(ttl) = ttl_secs {
            cmd.arg("EX").arg(ttl);
        }

        let reply: Value = cmd.query_async(&mut conn).await?;
        interpret_set_if_absent(reply)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl_secs {
            cmd.arg("EX").arg(ttl);
        }

        let reply: Value = cmd.query_async(&mut conn).await?;
        interpret_set(reply)
    }
}

fn interpret_set_if_absent(reply: Value) -> Result<SetIfAbsent, StoreError> {
    match reply {
        Value::Nil => Ok(SetIfAbsent::Created),
        Value::BulkString(bytes) => String::from_utf8(bytes)
            .map(SetIfAbsent::Existing)
            .map_err(|_| StoreError::Protocol("stored value is not UTF-8".into())),
        Value::Okay => Err(StoreError::Protocol(
            "response doesn't contain data".into(),
        )),
        other => Err(StoreError::Protocol(format!("{other:?}"))),
    }
}

fn interpret_set(reply: Value) -> Result<(), StoreError> {
    match reply {
        Value::Okay => Ok(()),
        Value::SimpleString(s) if s == "OK" => Ok(()),
        other => Err(StoreError::Write(format!("{other:?}"))),
    }
}
