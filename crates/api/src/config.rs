use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Redis URL. When unset, state is kept in process memory (development only).
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Panel PIN compared against the X-System-Code header.
    /// Left optional so a missing PIN fails requests, not startup.
    #[serde(default)]
    pub local_pin: Option<String>,
    /// Suffix for store keys, isolating deployments that share one Redis.
    #[serde(default)]
    pub branch: Option<String>,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}
