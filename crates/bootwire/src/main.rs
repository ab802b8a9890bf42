mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use bootwire_core::kernel::bootstrap::{Application, ApplicationSettings};
use bootwire_core::kernel::constants;
use bootwire_core::kernel::error::Result;
use clap::{Parser, Subcommand};
use log::info;

// --- Providers for Static Registration ---
use core_logging::LoggingProvider;
use greeter_provider::GreeterProvider;

/// Bootwire: an application kernel assembled from service providers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for testing
    #[arg(long)]
    ping: bool,

    /// Directory relative config paths resolve against
    #[arg(long, default_value = constants::DEFAULT_BASE_DIR)]
    base_dir: PathBuf,

    /// Application config file (json, yaml, toml); repeat to layer several
    #[arg(long = "config", value_name = "FILE")]
    config_files: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List service providers in boot order
    Providers,
    /// List console commands registered by providers
    Commands,
    /// Inspect the merged configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Boot providers and run the component lifecycle (default)
    Run,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the whole configuration
    Show {
        /// Output format: json, yaml or toml (toml leaves out null values)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Print a single value as JSON
    Get {
        key: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: CliArgs) -> Result<()> {
    let mut settings = ApplicationSettings::new(args.base_dir);
    settings.config_files = args.config_files;

    let mut app = Application::with_settings(settings)?;
    app.register_named_provider(core_logging::PROVIDER_NAME, LoggingProvider)?;
    app.register_named_provider("greeter", GreeterProvider)?;

    match args.command.unwrap_or(Commands::Run) {
        Commands::Providers => {
            app.boot()?;
            print!("{}", cli::render_providers(&app)?);
        }
        Commands::Commands => {
            app.boot()?;
            print!("{}", cli::render_commands(&app.commands()?.entries()));
        }
        Commands::Config { command } => {
            app.boot()?;
            let config = app.config()?;
            match command {
                ConfigCommand::Show { format } => print!("{}", cli::render_config(&config, &format)?),
                ConfigCommand::Get { key } => print!("{}", cli::render_value(&config, &key)?),
            }
        }
        Commands::Run => {
            println!("Starting {}...", constants::APP_NAME);
            app.run().await?;
            info!("Application run complete.");
            println!("Shutting down application...");
        }
    }
    Ok(())
}
