//! Classified API failures.
//!
//! Callers only need to tell three situations apart: the access token is no
//! good (sign in again), the PIN was rejected (possibly with a wait), and
//! everything else.

use std::time::Duration;

use crate::ui::format_wait_time;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 from the server.
    #[error("Token is not valid")]
    InvalidToken,
    /// 403 or 429. `retry_after` is set when the server asked us to wait.
    #[error("{}", pin_message(.retry_after))]
    Pin { retry_after: Option<Duration> },
    /// Any other non-2xx response.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Response was not JSON")]
    NotJson,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// How long to wait before another PIN attempt, if the server said so.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::Pin { retry_after } => *retry_after,
            _ => None,
        }
    }
}

fn pin_message(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(wait) if !wait.is_zero() => format!(
            "Too many wrong PIN attempts! Please wait {}",
            format_wait_time(*wait)
        ),
        _ => "Invalid PIN".to_string(),
    }
}
