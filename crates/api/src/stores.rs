//! Ephemeral stores (Redis, or in-process for local development).
//!
//! This module contains traits and implementations for the two pieces of
//! state the API keeps. Both live in the key-value store with TTL-based
//! expiration; nothing is cached in the process between requests.
//!
//! ## Stores
//!
//! - **areas** - Area (zone) armed/disarmed flags (30 min TTL)
//! - **rate_limit** - Failed PIN attempt log (window + block TTL)
//!
//! ## Key Patterns
//!
//! ```text
//! areas[-{branch}]            → JSON array of AreaStatus
//! failed-attempts[-{branch}]  → JSON array of millisecond timestamps
//! ```
//!
//! The optional branch suffix keeps preview deployments that share one
//! Redis instance apart.
//!
//! ## Usage in Handlers
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let areas = state.stores.areas.get_areas().await?;
//! }
//! ```

mod areas;
mod kv;
mod memory;
mod rate_limit;

pub use areas::{AreaStore, KvAreaStore};
pub use kv::{KeyValueStore, RedisKeyValueStore, StoreError};
pub use memory::MemoryKeyValueStore;
pub use rate_limit::{AttemptLimiter, KvAttemptLimiter};

#[cfg(test)]
pub use areas::{MockAreaStore, default_areas};
#[cfg(test)]
pub use kv::MockKeyValueStore;
#[cfg(test)]
pub use rate_limit::{AttemptCheck, MockAttemptLimiter};

use std::sync::Arc;

const AREAS_KEY: &str = "areas";
const FAILED_ATTEMPTS_KEY: &str = "failed-attempts";

/// Collection of all stores.
#[derive(Clone)]
pub struct Stores {
    pub kv: Arc<dyn KeyValueStore>,
    pub areas: Arc<dyn AreaStore>,
    pub attempts: Arc<dyn AttemptLimiter>,
}

impl Stores {
    /// Build every store on top of one key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>, branch: Option<&str>) -> Self {
        Self {
            areas: Arc::new(KvAreaStore::new(kv.clone(), scoped_key(AREAS_KEY, branch))),
            attempts: Arc::new(KvAttemptLimiter::new(
                kv.clone(),
                scoped_key(FAILED_ATTEMPTS_KEY, branch),
            )),
            kv,
        }
    }
}

fn scoped_key(key: &str, branch: Option<&str>) -> String {
    match branch {
        Some(branch) if !branch.is_empty() => format!("{key}-{branch}"),
        _ => key.to_string(),
    }
}
