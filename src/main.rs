use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kalkurs::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for kalkurs::AppCommand {
    fn from(cmd: Commands) -> kalkurs::AppCommand {
        match cmd {
            Commands::Rate => kalkurs::AppCommand::Rate,
            Commands::Quote => kalkurs::AppCommand::Quote,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the current exchange rate and its buffered value
    Rate,
    /// Display the price projection worksheet
    Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(cli.config_path.as_deref()),
        Some(cmd) => kalkurs::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup(config_path: Option<&str>) -> Result<()> {
    match config_path {
        Some(path) => kalkurs::cli::setup::setup_at_path(path),
        None => kalkurs::cli::setup::setup(),
    }
}
