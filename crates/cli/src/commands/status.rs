//! Show whether each alarm area is armed.

use anyhow::Result;
use shared::api::AreaStatus;
use tabled::{Table, Tabled, settings::Style};

use crate::{commands::connect, config::Config, ui};

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Area")]
    name: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

pub async fn run(config: &Config) -> Result<()> {
    let api = connect(config).await?;

    let areas = ui::spin("Fetching status...", api.status()).await?;
    println!("{}", render(&areas));

    Ok(())
}

/// Area table shared with `toggle`.
pub fn render(areas: &[AreaStatus]) -> String {
    if areas.is_empty() {
        return "No areas".to_string();
    }

    let rows = areas.iter().map(|area| AreaRow {
        id: area.id,
        name: area.name.clone(),
        state: if area.active { "on" } else { "off" },
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
