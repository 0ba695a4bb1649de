use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::generator::Generator;

/// Command-line interface for apiforge
///
/// Provides the ahead-of-time maintenance commands: configuration checking
/// and generation of the two API source files.
#[derive(Parser)]
#[command(name = "apiforge")]
#[command(about = "apiforge CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate the model mapping, then generate the forms and routes files
    Generate {
        /// Path to the apiforge configuration file (TOML)
        #[arg(short, long, default_value = "apiforge.toml")]
        config: PathBuf,
    },
    /// Validate the configuration without writing any files
    Check {
        /// Path to the apiforge configuration file (TOML)
        #[arg(short, long, default_value = "apiforge.toml")]
        config: PathBuf,
    },
}

/// Parse process arguments and execute the selected command.
///
/// # Errors
///
/// Returns an error if the configuration fails to load or validate, or if
/// either generation operation fails. Nothing is retried; a failure aborts
/// the run.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse())
}

/// Execute an already-parsed command.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Generate { config } => {
            // Model validation happens inside load(); generation never runs
            // against an unvalidated mapping.
            let config = AppConfig::load(config)?;
            let generator = Generator::from_config(&config);
            generator.generate_forms()?;
            generator.generate_routes()?;
            println!("APIs have been generated successfully.");
            Ok(())
        }
        Commands::Check { config } => {
            let config = AppConfig::load(config)?;
            println!(
                "Configuration is valid: {} endpoint(s), {} model(s).",
                config.endpoints.len(),
                config.registry.len()
            );
            Ok(())
        }
    }
}
