//! HostForge - Entry Point
//!
//! Deploys a zipped static site through a HostForge backend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use hostforge::app::options::AppOptions;
use hostforge::app::run::{self, await_shutdown_signal, DeployInput};
use hostforge::filesys::file::File;
use hostforge::logs::{init_logging, LogLevel};
use hostforge::models::region::DEFAULT_REGION;
use hostforge::storage::settings::load_settings;
use hostforge::ui::terminal::TerminalTheme;
use hostforge::utils::version_info;

#[derive(Debug, Parser)]
#[clap(name = "hostforge", about = "Deploy a static website through a HostForge backend")]
struct Cli {
    /// Settings file (JSON)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the settings file
    #[clap(long, global = true)]
    backend_url: Option<String>,

    /// trace, debug, info, warn or error
    #[clap(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    json_logs: bool,

    /// No emoji in output
    #[clap(long, global = true)]
    plain: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the inputs, check backend health and deploy
    Deploy {
        /// Region code
        #[clap(long, default_value = DEFAULT_REGION)]
        location: String,

        /// Environment tag, e.g. dev or prod
        #[clap(long)]
        environment: String,

        /// Owner tag (letters, numbers, hyphens, underscores)
        #[clap(long)]
        owner: String,

        /// 3-24 lowercase letters and numbers
        #[clap(long)]
        storage_account_name: String,

        /// ZIP archive with the site; must contain an index.html
        #[clap(long)]
        zip: PathBuf,
    },

    /// Check backend health
    Status,

    /// List deployment regions
    Locations,

    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Command::Version => {
            println!("{}", serde_json::to_string_pretty(&version_info())?);
            return Ok(true);
        }
        Command::Locations => {
            run::locations();
            return Ok(true);
        }
        Command::Deploy { .. } | Command::Status => {}
    }

    let config = cli.config.as_ref().map(File::new);
    let settings = load_settings(config.as_ref()).await?;
    let mut options = AppOptions::from_settings(&settings);

    if let Some(url) = cli.backend_url {
        options.backend.base_url = url;
    }
    if let Some(level) = cli.log_level {
        options.log.log_level = level.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if cli.json_logs {
        options.log.json_format = true;
    }
    if cli.plain {
        options.theme = TerminalTheme::plain();
    }

    if let Err(e) = init_logging(options.log.clone()) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Running with options: {:?}", options);

    match cli.command {
        Command::Deploy {
            location,
            environment,
            owner,
            storage_account_name,
            zip,
        } => {
            let input = DeployInput {
                location,
                environment,
                owner,
                storage_account_name,
                zip,
            };
            Ok(run::deploy(&options, input, await_shutdown_signal()).await?)
        }
        Command::Status => Ok(run::status(&options).await?),
        Command::Version | Command::Locations => Ok(true),
    }
}
