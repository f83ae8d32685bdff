//! Terminal UI helpers for consistent colored output.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use dialoguer::{Password, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::error::ApiError;

/// Print a success message with green checkmark.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an info message with blue info icon.
pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

/// Print an error message with red X.
fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint/suggestion (dimmed, indented).
fn hint(msg: &str) {
    eprintln!("  {} {}", "→".dimmed(), msg.dimmed());
}

/// Run an async operation with a spinner showing the given message.
pub async fn spin<T, F: Future<Output = T>>(msg: &str, fut: F) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.dim} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;

    spinner.finish_and_clear();
    result
}

/// Display an error with a contextual hint for the API failures we know about.
pub fn print_error(err: &anyhow::Error) {
    error(&err.to_string());

    let Some(api_err) = err.downcast_ref::<ApiError>() else {
        return;
    };

    match api_err {
        ApiError::InvalidToken => {
            hint("Your token may have expired. Run: alarm login <token>");
        }
        ApiError::Pin { .. } if api_err.retry_after().is_none() => {
            hint("Check the PIN and try again. Repeated mistakes lock the panel for a while.");
        }
        ApiError::Status { status, .. } if *status >= 500 => {
            hint("The server had a problem. Try again shortly.");
        }
        ApiError::Transport(e) if e.is_timeout() || e.is_connect() => {
            hint("Check your internet connection and try again.");
        }
        _ => {}
    }
}

/// Human-readable wait, rounded up: seconds below 90 s, minutes below
/// 90 min, hours beyond.
pub fn format_wait_time(wait: Duration) -> String {
    let ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);

    let (value, unit) = if ms < 90 * 1000 {
        (ms.div_ceil(1000), "second")
    } else if ms < 90 * 60 * 1000 {
        (ms.div_ceil(60 * 1000), "minute")
    } else {
        (ms.div_ceil(3600 * 1000), "hour")
    };

    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// Prompt for the panel PIN without echoing it.
pub fn prompt_pin() -> Result<String> {
    let pin = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("PIN")
        .interact()?;

    validate_pin(pin.trim())
}

/// The panel only accepts six ASCII digits.
pub fn validate_pin(pin: &str) -> Result<String> {
    if pin.len() != 6 || !pin.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("The PIN must be exactly 6 digits.");
    }

    Ok(pin.to_string())
}
