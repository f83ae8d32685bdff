//! Arm or disarm a single area.
//!
//! Without `--yes` the current status is fetched first so the confirmation
//! can name the area.

use anyhow::Result;
use clap::ValueEnum;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::{
    commands::{connect, status},
    config::Config,
    ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn active(self) -> bool {
        self == Switch::On
    }
}

pub async fn run(config: &Config, id: u32, switch: Switch, yes: bool) -> Result<()> {
    let api = connect(config).await?;
    let active = switch.active();

    if !yes {
        let areas = ui::spin("Fetching status...", api.status()).await?;
        let name = areas
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
            .unwrap_or("this area");

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(confirm_text(name, active))
            .default(false)
            .interact()?;

        if !confirmed {
            ui::info("Cancelled");
            return Ok(());
        }
    }

    let areas = ui::spin("Updating...", api.toggle(id, active)).await?;
    println!("{}", status::render(&areas));

    Ok(())
}

fn confirm_text(name: &str, active: bool) -> String {
    if active {
        format!("Do you want to activate {name}?")
    } else {
        format!("Do you want to deactivate {name}?")
    }
}
