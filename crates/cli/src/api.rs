//! HTTP client for the alarm API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use shared::api::{AreaStatus, CREDS_HEADER, OperationResponse, PIN_HEADER, TogglePayload};

use crate::error::ApiError;

/// Overall deadline for a single request, connection included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// What every request has to carry.
#[derive(Debug, Clone)]
pub struct Auth {
    /// Bearer token from the identity provider.
    pub token: String,
    pub pin: String,
    pub creds: Option<String>,
}

pub struct Api {
    http: Client,
    pub base_url: String,
    auth: Auth,
}

impl Api {
    pub fn new(base_url: String, auth: Auth) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Fetches the current status of every area.
    pub async fn status(&self) -> Result<Vec<AreaStatus>, ApiError> {
        let response = self.request(Method::GET, "/api/status").send().await?;

        Self::json(response).await
    }

    /// Arms or disarms one area and returns the updated collection.
    pub async fn toggle(&self, id: u32, active: bool) -> Result<Vec<AreaStatus>, ApiError> {
        let response = self
            .request(Method::POST, &format!("/api/area/{}", id))
            .form(&TogglePayload::new(active))
            .send()
            .await?;

        Self::json(response).await
    }

    /// Disarms every area.
    pub async fn deactivate_all(&self) -> Result<OperationResponse, ApiError> {
        let response = self.request(Method::POST, "/api/off").send().await?;

        Self::json(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.auth.token)
            .header(PIN_HEADER, &self.auth.pin);

        if let Some(creds) = &self.auth.creds {
            builder = builder.header(CREDS_HEADER, creds);
        }

        builder
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_response(response).await?;

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|ct| ct.trim() == "application/json");
        if !is_json {
            return Err(ApiError::NotJson);
        }

        Ok(response.json().await?)
    }

    async fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::InvalidToken),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| parse_retry_after(v, Utc::now()));

                Err(ApiError::Pin { retry_after })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();

                // Try to extract error message from JSON response
                let message = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|json| {
                        json.get("error")
                            .and_then(|v| v.as_str())
                            .map(|s| s.to_string())
                    })
                    .unwrap_or_else(|| {
                        status
                            .canonical_reason()
                            .unwrap_or("Invalid response status code")
                            .to_string()
                    });

                Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Time left until a `Retry-After` value, if it lies in the future.
/// Accepts both the HTTP-date and the delay-seconds forms.
fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    if let Ok(secs) = value.trim().parse::<u64>() {
        return (secs > 0).then(|| Duration::from_secs(secs));
    }

    let at = DateTime::parse_from_rfc2822(value.trim()).ok()?;
    (at.with_timezone(&Utc) - now)
        .to_std()
        .ok()
        .filter(|wait| !wait.is_zero())
}
