//! Failed PIN attempt limiting.
//!
//! One key holds a JSON array of millisecond timestamps, one per failed
//! attempt. Only timestamps inside the trailing window count. Once
//! [`MAX_FAILED_ATTEMPTS`] are inside it, callers are told to wait until the
//! oldest of them is `WINDOW + BLOCK` seconds old.
//!
//! Checking never writes, so successful requests do not grow the list.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::kv::{KeyValueStore, StoreError};

pub const MAX_FAILED_ATTEMPTS: usize = 3;
pub const WINDOW_SECS: i64 = 30;
pub const BLOCK_SECS: i64 = 30;

/// Lifetime of the attempt log after each write.
pub const ATTEMPTS_TTL_SECS: u64 = (WINDOW_SECS + BLOCK_SECS) as u64;

/// Rate limiter for failed PIN attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptLimiter: Send + Sync {
    /// Whether another attempt may be made at `now`. Read-only.
    async fn can_attempt(&self, now: DateTime<Utc>) -> Result<AttemptCheck, StoreError>;

    /// Log a failed attempt at `now`.
    /// Returns whether the caller was still within the limit before this one.
    async fn record_failed_attempt(&self, now: DateTime<Utc>) -> Result<bool, StoreError>;
}

/// Result of an attempt check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptCheck {
    Allowed,
    /// Too many recent failures; retry after `delay_secs` seconds.
    Blocked { delay_secs: u64 },
}

impl AttemptCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AttemptCheck::Allowed)
    }

    pub fn delay_secs(&self) -> u64 {
        match self {
            AttemptCheck::Allowed => 0,
            AttemptCheck::Blocked { delay_secs } => *delay_secs,
        }
    }
}

/// AttemptLimiter on top of a KeyValueStore.
#[derive(Clone)]
pub struct KvAttemptLimiter {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvAttemptLimiter {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { kv, key }
    }

    async fn recent_attempts(&self, now_ms: i64) -> Result<Vec<i64>, StoreError> {
        let attempts = match self.kv.get(&self.key).await? {
            Some(json) => serde_json::from_str::<Vec<i64>>(&json)
                .map_err(|e| StoreError::Protocol(format!("attempt log is malformed: {e}")))?,
            None => Vec::new(),
        };

        Ok(within_window(attempts, now_ms))
    }
}

#[async_trait]
impl AttemptLimiter for KvAttemptLimiter {
    async fn can_attempt(&self, now: DateTime<Utc>) -> Result<AttemptCheck, StoreError> {
        let now_ms = now.timestamp_millis();
        let attempts = self.recent_attempts(now_ms).await?;

        Ok(evaluate(&attempts, now_ms))
    }

    async fn record_failed_attempt(&self, now: DateTime<Utc>) -> Result<bool, StoreError> {
        let now_ms = now.timestamp_millis();
        let mut attempts = self.recent_attempts(now_ms).await?;
        let within_limit = attempts.len() < MAX_FAILED_ATTEMPTS;

        attempts.push(now_ms);
        let json = serde_json::to_string(&attempts)?;
        self.kv.set(&self.key, &json, Some(ATTEMPTS_TTL_SECS)).await?;

        Ok(within_limit)
    }
}

fn within_window(attempts: Vec<i64>, now_ms: i64) -> Vec<i64> {
    attempts
        .into_iter()
        .filter(|&at| now_ms - at < WINDOW_SECS * 1000)
        .collect()
}

fn evaluate(attempts: &[i64], now_ms: i64) -> AttemptCheck {
    if attempts.len() < MAX_FAILED_ATTEMPTS {
        return AttemptCheck::Allowed;
    }

    let Some(&oldest) = attempts.iter().min() else {
        return AttemptCheck::Allowed;
    };

    let remaining_ms = oldest + (WINDOW_SECS + BLOCK_SECS) * 1000 - now_ms;
    let delay_secs = if remaining_ms <= 0 {
        0
    } else {
        // ceil(remaining_ms / 1000) for positive values
        ((remaining_ms + 999) / 1000) as u64
    };

    AttemptCheck::Blocked { delay_secs }
}
