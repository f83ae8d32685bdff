pub mod areas;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Every route the server exposes, before middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/health", health::router())
        .nest("/api", areas::router())
}
