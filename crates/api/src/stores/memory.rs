//! In-process key-value store for local development and tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::kv::{KeyValueStore, SetIfAbsent, StoreError};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Map-backed KeyValueStore with lazy expiry. State is lost on restart.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn expiry(ttl_secs: Option<u64>) -> Option<Instant> {
    ttl_secs.map(|ttl| Instant::now() + Duration::from_secs(ttl))
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn ping(&self) -> Result<bool, StoreError> {
        Ok(true)
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: Option<u64>,
    ) -> Result<SetIfAbsent, StoreError> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key)
            && entry.is_live(Instant::now())
        {
            return Ok(SetIfAbsent::Existing(entry.value.clone()));
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: expiry(ttl_secs),
            },
        );
        Ok(SetIfAbsent::Created)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<(), StoreError> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: expiry(ttl_secs),
            },
        );
        Ok(())
    }
}
