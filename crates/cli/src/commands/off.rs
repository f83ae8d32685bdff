//! Disarm every area at once.

use anyhow::Result;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::{commands::connect, config::Config, ui};

pub async fn run(config: &Config, yes: bool) -> Result<()> {
    let api = connect(config).await?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to turn off all alarms?")
            .default(false)
            .interact()?;

        if !confirmed {
            ui::info("Cancelled");
            return Ok(());
        }
    }

    ui::spin("Turning off...", api.deactivate_all()).await?;
    ui::success("All alarms turned off");

    Ok(())
}
