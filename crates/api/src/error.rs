use std::time::{Duration, SystemTime};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{HeaderMapExt, RetryAfter};
use shared::api::ErrorResponse;

#[derive(Debug)]
pub enum AppError {
    /// Internal errors (store failures etc.) - logged but return generic 500 to user
    Internal(anyhow::Error),
    /// Required configuration is missing - fatal for the request, not retryable
    Configuration(&'static str),
    /// Validation errors - safe to show
    Validation(String),
    /// The supplied PIN did not match
    InvalidPin,
    /// Too many failed PIN attempts; `delay_secs` is 0 when no wait is known
    RateLimited { delay_secs: u64 },
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Configuration(what) => {
                tracing::error!("configuration error: {}", what);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured")
            }
            AppError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            AppError::InvalidPin => json_error(StatusCode::FORBIDDEN, "Invalid PIN"),
            AppError::RateLimited { delay_secs } => {
                let mut response = json_error(StatusCode::TOO_MANY_REQUESTS, "Try later");
                if delay_secs > 0 {
                    let retry_at = SystemTime::now() + Duration::from_secs(delay_secs);
                    response
                        .headers_mut()
                        .typed_insert(RetryAfter::date(retry_at));
                }
                response
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::RETRY_AFTER;
    use http_body_util::BodyExt;

    use crate::stores::StoreError;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_returns_500_generic_message() {
        let err = AppError::Internal(anyhow::anyhow!("redis connection refused"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await["error"],
            "Internal server error"
        );
    }

    #[tokio::test]
    async fn store_error_converts_to_internal() {
        let err: AppError = StoreError::Write("Nil".into()).into();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn configuration_error_hides_details() {
        let err = AppError::Configuration("ALARM_LOCAL_PIN not set");
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert!(!body.to_string().contains("LOCAL_PIN"));
    }

    #[tokio::test]
    async fn validation_error_returns_400_with_details() {
        let err = AppError::Validation("Invalid id in URL".into());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response_json(response).await["error"], "Invalid id in URL");
    }

    #[tokio::test]
    async fn invalid_pin_returns_403() {
        let response = AppError::InvalidPin.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response_json(response).await["error"], "Invalid PIN");
    }

    #[tokio::test]
    async fn rate_limited_sets_retry_after_date() {
        let response = AppError::RateLimited { delay_secs: 42 }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after = response.headers().get(RETRY_AFTER).unwrap();
        assert!(retry_after.to_str().unwrap().ends_with("GMT"));
    }

    #[tokio::test]
    async fn rate_limited_without_delay_omits_retry_after() {
        let response = AppError::RateLimited { delay_secs: 0 }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().get(RETRY_AFTER).is_none());
    }
}
