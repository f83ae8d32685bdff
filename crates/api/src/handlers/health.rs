//! Health check endpoint for load balancers and monitoring.
//!
//! Returns 200 OK if the key-value store is reachable,
//! 503 Service Unavailable otherwise. Not PIN-gated.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: bool,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_ok = match state.stores.kv.ping().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("store health check failed: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if store_ok { "ok" } else { "unhealthy" },
        store: store_ok,
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{MockKeyValueStore, StoreError};
    use crate::test_utils::TestStateBuilder;

    #[tokio::test]
    async fn healthy_when_store_answers() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_ping().returning(|| Ok(true));

        let state = TestStateBuilder::new().with_kv(kv).build();
        let response = health_check(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unhealthy_when_store_is_unreachable() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_ping()
            .returning(|| Err(StoreError::Protocol("connection refused".into())));

        let state = TestStateBuilder::new().with_kv(kv).build();
        let response = health_check(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
