mod api;
mod commands;
mod config;
mod credentials;
mod error;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use keyring::set_global_service_name;

use crate::{commands::toggle::Switch, config::Config};

#[derive(Parser)]
#[command(name = "alarm")]
#[command(about = "Remote control for the alarm panel")]
#[command(version)]
#[command(after_help = "Examples:
  alarm login <token>       Store your access token
  alarm status              Show which areas are armed
  alarm toggle 1 on         Arm area 1
  alarm off --yes           Disarm everything without asking

The PIN is read from ALARM_PIN or prompted for.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the access token from the identity provider
    #[command(after_help = "Example: alarm login eyJhbGciOi...")]
    Login {
        /// Bearer token
        token: String,
    },

    /// Forget the stored access token
    #[command(after_help = "Example: alarm logout")]
    Logout,

    /// Show the state of every area
    #[command(after_help = "Example: alarm status")]
    Status,

    /// Arm or disarm one area
    #[command(after_help = "Examples:
  alarm toggle 0 on
  alarm toggle 1 off --yes")]
    Toggle {
        /// Area ID (0-1000)
        #[arg(value_parser = clap::value_parser!(u32).range(0..=1000))]
        id: u32,
        /// New state
        #[arg(value_enum)]
        state: Switch,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Disarm every area
    #[command(after_help = "Example: alarm off")]
    Off {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    #[command(after_help = "Examples:
  alarm completions bash > ~/.bash_completion.d/alarm
  alarm completions zsh > ~/.zfunc/_alarm
  alarm completions fish > ~/.config/fish/completions/alarm.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    set_global_service_name("alarm");

    let config = envy::prefixed("ALARM_").from_env::<Config>()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { token } => commands::login::run(&token).await,
        Commands::Logout => commands::logout::run().await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Toggle { id, state, yes } => {
            commands::toggle::run(&config, id, state, yes).await
        }
        Commands::Off { yes } => commands::off::run(&config, yes).await,
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "alarm", &mut std::io::stdout());
            Ok(())
        }
    }
}
