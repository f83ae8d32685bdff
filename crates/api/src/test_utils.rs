//! Shared test utilities for API handler tests.
//!
//! Provides a flexible `TestStateBuilder` for constructing `AppState`
//! instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut areas = MockAreaStore::new();
//! areas.expect_get_areas().returning(|| Ok(default_areas()));
//!
//! let state = TestStateBuilder::new().with_area_store(areas).build();
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::state::AppState;
use crate::stores::{MockAreaStore, MockAttemptLimiter, MockKeyValueStore, Stores};

/// PIN configured in [`test_config`].
pub const TEST_PIN: &str = "123456";

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        redis_url: None,
        local_pin: Some(TEST_PIN.to_string()),
        branch: None,
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for any store not explicitly set, so an
/// unexpected store call fails the test.
pub struct TestStateBuilder {
    config: Option<Config>,
    kv: Option<MockKeyValueStore>,
    area_store: Option<MockAreaStore>,
    attempt_limiter: Option<MockAttemptLimiter>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            config: None,
            kv: None,
            area_store: None,
            attempt_limiter: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_kv(mut self, kv: MockKeyValueStore) -> Self {
        self.kv = Some(kv);
        self
    }

    pub fn with_area_store(mut self, store: MockAreaStore) -> Self {
        self.area_store = Some(store);
        self
    }

    pub fn with_attempt_limiter(mut self, limiter: MockAttemptLimiter) -> Self {
        self.attempt_limiter = Some(limiter);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let stores = Stores {
            kv: Arc::new(self.kv.unwrap_or_else(MockKeyValueStore::new)),
            areas: Arc::new(self.area_store.unwrap_or_else(MockAreaStore::new)),
            attempts: Arc::new(
                self.attempt_limiter
                    .unwrap_or_else(MockAttemptLimiter::new),
            ),
        };

        AppState {
            config: self.config.unwrap_or_else(test_config),
            stores,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
