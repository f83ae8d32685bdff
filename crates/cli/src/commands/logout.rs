//! Sign out by removing the stored token.
//!
//! Clears the token from the system keyring and file storage. Nothing is
//! revoked server-side.

use anyhow::Result;

use crate::{credentials, ui};

pub async fn run() -> Result<()> {
    credentials::delete_all().await?;
    ui::success("Signed out");
    Ok(())
}
