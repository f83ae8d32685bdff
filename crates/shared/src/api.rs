//! Shared API request/response types used by both CLI and API server.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Header carrying the panel PIN.
pub const PIN_HEADER: &str = "x-system-code";
/// Header carrying the opaque credentials payload forwarded by the client.
pub const CREDS_HEADER: &str = "x-system-creds";

/// Smallest area id accepted in `/api/area/{id}`.
pub const MIN_AREA_ID: i64 = 0;
/// Largest area id accepted in `/api/area/{id}`.
pub const MAX_AREA_ID: i64 = 1000;

/// One alarm area (zone) and whether it is armed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaStatus {
    pub id: u32,
    pub name: String,
    pub active: bool,
}

/// Form body for `POST /api/area/{id}`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TogglePayload {
    #[garde(pattern(r"^(on|off)$"))]
    pub toggle: String,
}

impl TogglePayload {
    pub fn new(active: bool) -> Self {
        Self {
            toggle: if active { "on" } else { "off" }.to_string(),
        }
    }

    /// Whether the payload asks to arm the area. Only meaningful after validation.
    pub fn active(&self) -> bool {
        self.toggle == "on"
    }
}

/// Returned by `POST /api/off`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationResponse {
    pub operation: String,
}

impl OperationResponse {
    pub fn ok() -> Self {
        Self {
            operation: "ok".to_string(),
        }
    }
}

/// JSON error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
