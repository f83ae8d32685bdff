//! Test context for CLI command tests.
//!
//! Sets up a wiremock MockServer and a config pointing at it, with the
//! token and PIN filled in so commands never touch the credentials file
//! or prompt on stdin.

use wiremock::MockServer;

use crate::config::Config;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_PIN: &str = "123456";

pub struct TestContext {
    pub mock_server: MockServer,
    pub config: Config,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;

        let config = Config {
            api_url: mock_server.uri(),
            pin: Some(TEST_PIN.to_string()),
            token: Some(TEST_TOKEN.to_string()),
            creds: None,
        };

        Self {
            mock_server,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_context_points_at_mock_server() {
        let ctx = TestContext::new().await;

        assert!(ctx.mock_server.uri().starts_with("http://"));
        assert_eq!(ctx.config.api_url, ctx.mock_server.uri());
        assert_eq!(ctx.config.token.as_deref(), Some(TEST_TOKEN));
    }
}
