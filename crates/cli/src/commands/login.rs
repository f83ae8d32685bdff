//! Store the access token used for every later request.
//!
//! The token goes to the system keyring when one is available. It comes
//! from the identity provider; this command does not verify it. A bad token shows up as "Token is not valid" on first use.

use anyhow::Result;

use crate::{credentials, ui};

pub async fn run(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("No token given.");
    }

    credentials::set_token(token.to_string()).await?;
    ui::success("Signed in");
    Ok(())
}
