//! PIN gate for the alarm endpoints.
//!
//! Usage: add `PinVerified` as the first extractor of a handler. It runs,
//! in order:
//!
//! 1. the attempt limiter check (429 while blocked, no write),
//! 2. the PIN comparison against the `X-System-Code` header,
//! 3. on mismatch, a failed-attempt record followed by 403.
//!
//! Only genuine mismatches count against the limit.
//!
//! ```ignore
//! async fn my_handler(_pin: PinVerified, ...) -> ... {}
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use shared::api::PIN_HEADER;

use crate::{error::AppError, state::AppState};

/// Marker proving the request carried the correct PIN and was not rate limited.
#[derive(Debug)]
pub struct PinVerified;

impl FromRequestParts<AppState> for PinVerified {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let now = Utc::now();

        let check = state.stores.attempts.can_attempt(now).await?;
        if !check.is_allowed() {
            let delay_secs = check.delay_secs();
            tracing::warn!(delay_secs, "PIN attempt rejected: rate limited");
            return Err(AppError::RateLimited { delay_secs });
        }

        let supplied = parts
            .headers
            .get(PIN_HEADER)
            .and_then(|v| v.to_str().ok());

        if !check_pin(state.config.local_pin.as_deref(), supplied)? {
            let within_limit = state.stores.attempts.record_failed_attempt(now).await?;
            tracing::warn!(within_limit, "invalid PIN");
            return Err(AppError::InvalidPin);
        }

        Ok(PinVerified)
    }
}

/// Compare the configured PIN with the one supplied by the client.
///
/// A missing or empty configured PIN is a configuration error, never a pass.
/// A missing header simply doesn't match.
pub fn check_pin(expected: Option<&str>, supplied: Option<&str>) -> Result<bool, AppError> {
    let expected = match expected {
        Some(pin) if !pin.is_empty() => pin,
        _ => return Err(AppError::Configuration("ALARM_LOCAL_PIN not set")),
    };

    Ok(supplied == Some(expected))
}
