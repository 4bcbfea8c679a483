//! Command-line interface definitions and dispatch.

mod commands;
mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taller_core::config::Config;
use taller_core::logging;

#[derive(Parser)]
#[command(name = "taller")]
#[command(version, about = "Terminal client for the Taller user service")]
pub struct Cli {
    /// Service base URL (overrides TALLER_API_BASE_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long, short)]
        username: String,

        /// Read from stdin when omitted
        #[arg(long, env = "TALLER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(long, short)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Read from stdin when omitted
        #[arg(long, env = "TALLER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List registered users
    Users {
        /// Print the raw JSON list instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,

    /// Create a default config file
    Init,

    /// Store the service base URL in the config file
    SetBaseUrl { url: String },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { base_url, command } = cli;
    let flag = base_url.as_deref();

    let Some(command) = command else {
        let config = Config::load().context("load config")?;
        let base_url = config.effective_base_url(flag)?;
        return commands::interactive::run(&config, &base_url).await;
    };

    logging::init_stderr("warn");

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&resolve_base_url(flag)?, &username, password).await
        }
        Commands::Register {
            username,
            email,
            first_name,
            last_name,
            password,
        } => {
            let args = commands::auth::RegisterArgs {
                username,
                email,
                first_name,
                last_name,
                password,
            };
            commands::auth::register(&resolve_base_url(flag)?, args).await
        }
        Commands::Logout => {
            commands::auth::logout(&resolve_base_url(flag)?);
            Ok(())
        }
        Commands::Whoami => commands::auth::whoami(&resolve_base_url(flag)?),
        Commands::Users { json } => commands::users::list(&resolve_base_url(flag)?, json).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
        },
    }
}

fn resolve_base_url(flag: Option<&str>) -> Result<String> {
    let config = Config::load().context("load config")?;
    let base_url = config.effective_base_url(flag)?;
    tracing::debug!(%base_url, "Resolved base URL");
    Ok(base_url)
}
