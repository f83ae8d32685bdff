//! Credential storage with keyring and file-based fallback.
//!
//! Tries the system keyring first (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service). Falls back to ~/.config/alarm/credentials.json when
//! no keyring is available. Only the bearer token is stored, never the PIN.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use keyring::KeyringEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileCredentials {
    token: Option<String>,
}

fn credentials_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alarm")
        .join("credentials.json")
}

fn load_file_credentials(path: &Path) -> FileCredentials {
    if path.exists() {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    } else {
        FileCredentials::default()
    }
}

fn save_file_credentials(path: &Path, creds: &FileCredentials) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(creds)?;
    std::fs::write(path, json)?;

    // Set restrictive permissions on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

fn token_at(path: &Path) -> Result<String> {
    load_file_credentials(path)
        .token
        .ok_or_else(|| anyhow!("Not signed in. Run: alarm login <token>"))
}

fn set_token_at(path: &Path, token: String) -> Result<()> {
    let mut creds = load_file_credentials(path);
    creds.token = Some(token);
    save_file_credentials(path, &creds)
}

fn delete_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

const TOKEN_ENTRY: &str = "access-token";

/// Load the access token, with a helpful error if not signed in.
pub async fn get_token() -> Result<String> {
    if let Ok(entry) = KeyringEntry::try_new(TOKEN_ENTRY)
        && let Ok(secret) = entry.get_secret().await
    {
        return Ok(secret);
    }

    token_at(&credentials_path())
}

pub async fn set_token(token: String) -> Result<()> {
    if let Ok(entry) = KeyringEntry::try_new(TOKEN_ENTRY)
        && entry.set_secret(token.clone()).await.is_ok()
    {
        return Ok(());
    }

    set_token_at(&credentials_path(), token)
}

/// Delete the token from the keyring and the credentials file.
pub async fn delete_all() -> Result<()> {
    if let Ok(entry) = KeyringEntry::try_new(TOKEN_ENTRY) {
        let _ = entry.delete_secret().await;
    }

    delete_at(&credentials_path())
}
