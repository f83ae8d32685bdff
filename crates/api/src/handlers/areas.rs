//! Alarm area endpoints.
//!
//! Every route is gated by [`PinVerified`], which consults the attempt
//! limiter and compares the PIN before any handler body runs. Validation of
//! path and body therefore only happens for callers holding the PIN.
//!
//! ## Endpoints
//!
//! - GET /api/status - Current area collection
//! - POST /api/area/{id} - Arm or disarm one area (form field `toggle=on|off`)
//! - POST /api/off - Disarm every area

use axum::{
    Form, Json, Router, debug_handler,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    response::IntoResponse,
    routing::{get, post},
};
use garde::Validate;
use shared::api::{MAX_AREA_ID, MIN_AREA_ID, OperationResponse, TogglePayload};

use crate::{error::AppError, middleware::pin::PinVerified, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/area/{id}", post(toggle_area))
        .route("/off", post(deactivate_all))
}

#[debug_handler]
async fn get_status(
    _pin: PinVerified,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let areas = state.stores.areas.get_areas().await?;

    Ok(Json(areas))
}

#[debug_handler]
async fn toggle_area(
    _pin: PinVerified,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    form: Result<Form<TogglePayload>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path.map_err(|_| invalid_id())?;
    let id = parse_area_id(&id)?;

    let Form(payload) = form.map_err(|_| toggle_body_error())?;
    payload.validate().map_err(|_| toggle_body_error())?;
    let active = payload.active();

    let areas = state.stores.areas.update_area(id, active).await?;

    tracing::info!(area_id = id, active, "area toggled");

    Ok(Json(areas))
}

#[debug_handler]
async fn deactivate_all(
    _pin: PinVerified,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.stores.areas.deactivate_all().await?;

    tracing::info!("all areas deactivated");

    Ok(Json(OperationResponse::ok()))
}

fn parse_area_id(raw: &str) -> Result<u32, AppError> {
    let id: i64 = raw.parse().map_err(|_| invalid_id())?;

    if !(MIN_AREA_ID..=MAX_AREA_ID).contains(&id) {
        return Err(invalid_id());
    }

    u32::try_from(id).map_err(|_| invalid_id())
}

fn invalid_id() -> AppError {
    AppError::Validation("Invalid id in URL".into())
}

fn toggle_body_error() -> AppError {
    AppError::Validation(r#"Body must contain property "toggle" as either "on" or "off""#.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use shared::api::AreaStatus;

    use crate::stores::{MemoryKeyValueStore, MockAreaStore, Stores, default_areas};
    use crate::test_utils::{TestStateBuilder, test_config};

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn memory_state() -> AppState {
        AppState {
            config: test_config(),
            stores: Stores::new(Arc::new(MemoryKeyValueStore::new()), None),
        }
    }

    fn toggle(value: &str) -> Result<Form<TogglePayload>, FormRejection> {
        Ok(Form(TogglePayload {
            toggle: value.to_string(),
        }))
    }

    #[test]
    fn parse_area_id_accepts_bounds() {
        assert_eq!(parse_area_id("0").unwrap(), 0);
        assert_eq!(parse_area_id("1000").unwrap(), 1000);
    }

    #[test]
    fn parse_area_id_rejects_out_of_range_and_garbage() {
        for raw in ["-1", "1001", "1500", "abc", "", "1.5"] {
            assert!(
                matches!(parse_area_id(raw), Err(AppError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn get_status_returns_areas() {
        let mut areas = MockAreaStore::new();
        areas.expect_get_areas().returning(|| Ok(default_areas()));

        let state = TestStateBuilder::new().with_area_store(areas).build();

        let response = get_status(PinVerified, State(state))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<AreaStatus> = body_json(response).await;
        assert_eq!(body, default_areas());
    }

    #[tokio::test]
    async fn toggle_out_of_range_id_is_400() {
        let mut areas = MockAreaStore::new();
        areas.expect_update_area().never();

        let state = TestStateBuilder::new().with_area_store(areas).build();

        let result = toggle_area(
            PinVerified,
            State(state),
            Ok(Path("1500".to_string())),
            toggle("on"),
        )
        .await;

        let Err(err) = result else {
            panic!("Expected error, got Ok");
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn toggle_with_bad_value_is_400() {
        let mut areas = MockAreaStore::new();
        areas.expect_update_area().never();

        let state = TestStateBuilder::new().with_area_store(areas).build();

        let result = toggle_area(
            PinVerified,
            State(state),
            Ok(Path("1".to_string())),
            toggle("maybe"),
        )
        .await;

        let Err(err) = result else {
            panic!("Expected error, got Ok");
        };
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn toggle_on_returns_updated_collection() {
        let state = memory_state();

        let response = toggle_area(
            PinVerified,
            State(state.clone()),
            Ok(Path("1".to_string())),
            toggle("on"),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<AreaStatus> = body_json(response).await;
        let area = body.iter().find(|a| a.id == 1).unwrap();
        assert!(area.active);

        let stored = state.stores.areas.get_areas().await.unwrap();
        assert!(stored.iter().find(|a| a.id == 1).unwrap().active);
    }

    #[tokio::test]
    async fn toggle_passes_id_and_flag_to_store() {
        let mut areas = MockAreaStore::new();
        areas
            .expect_update_area()
            .with(mockall::predicate::eq(0), mockall::predicate::eq(false))
            .times(1)
            .returning(|_, _| Ok(default_areas()));

        let state = TestStateBuilder::new().with_area_store(areas).build();

        let response = toggle_area(
            PinVerified,
            State(state),
            Ok(Path("0".to_string())),
            toggle("off"),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let mut areas = MockAreaStore::new();
        areas.expect_update_area().returning(|_, _| {
            Err(crate::stores::StoreError::Write("Nil".into()))
        });

        let state = TestStateBuilder::new().with_area_store(areas).build();

        let Err(err) = toggle_area(
            PinVerified,
            State(state),
            Ok(Path("1".to_string())),
            toggle("on"),
        )
        .await
        else {
            panic!("Expected error, got Ok");
        };
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn deactivate_all_reports_ok_and_turns_everything_off() {
        let state = memory_state();
        state.stores.areas.update_area(1, true).await.unwrap();

        let response = deactivate_all(PinVerified, State(state.clone()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "operation": "ok" }));

        let stored = state.stores.areas.get_areas().await.unwrap();
        assert!(stored.iter().all(|a| !a.active));
    }
}
