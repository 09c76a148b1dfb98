//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use pms_core::config::Config;
use pms_core::logging::{self, WorkerGuard};

mod commands;

#[derive(Parser)]
#[command(name = "pms")]
#[command(version)]
#[command(about = "Hotel PMS staff console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the auth service base URL from config
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Staff username
        #[arg(short, long)]
        username: String,

        /// Staff password
        #[arg(short, long, env = "PMS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the current view as plain text
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    match command {
        // config commands must work even when the file is broken
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Some(Commands::Login { username, password }) => {
            let (config, _log_guard) = prepare(base_url)?;
            commands::session::login(&config, &username, &password).await
        }
        Some(Commands::Logout) => {
            let (_config, _log_guard) = prepare(base_url)?;
            commands::session::logout()
        }
        Some(Commands::Status) => {
            let (_config, _log_guard) = prepare(base_url)?;
            commands::session::status()
        }
        None => {
            let (config, _log_guard) = prepare(base_url)?;
            commands::console::run(&config).await
        }
    }
}

/// Loads config, applies CLI overrides and starts file logging.
///
/// Logging failures are reported and otherwise ignored.
fn prepare(base_url: Option<String>) -> Result<(Config, Option<WorkerGuard>)> {
    let mut config = Config::load().context("load config")?;
    if let Some(url) = base_url {
        config.auth.base_url = url;
    }

    let guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };
    Ok((config, guard))
}
