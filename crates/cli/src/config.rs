use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Panel PIN; prompted for when unset.
    #[serde(default)]
    pub pin: Option<String>,
    /// Access token; overrides the one stored by `alarm login`.
    #[serde(default)]
    pub token: Option<String>,
    /// Opaque payload forwarded in the X-System-Creds header.
    #[serde(default)]
    pub creds: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:3000".into()
}
