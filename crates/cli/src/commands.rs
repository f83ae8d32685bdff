pub mod login;
pub mod logout;
pub mod off;
pub mod status;
pub mod toggle;

use anyhow::Result;

use crate::{
    api::{Api, Auth},
    config::Config,
    credentials, ui,
};

/// Builds an authenticated client: the token from config or the credentials
/// file, the PIN from config or a prompt.
pub async fn connect(config: &Config) -> Result<Api> {
    let token = match &config.token {
        Some(token) => token.clone(),
        None => credentials::get_token().await?,
    };

    let pin = match &config.pin {
        Some(pin) => ui::validate_pin(pin)?,
        None => ui::prompt_pin()?,
    };

    let auth = Auth {
        token,
        pin,
        creds: config.creds.clone(),
    };

    Ok(Api::new(config.api_url.clone(), auth)?)
}
