//! Unit tests for CLI commands

use crate::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_generate_command_parses() {
    let cli = Cli::try_parse_from(["apiforge", "generate", "--config", "my.toml"]).unwrap();

    match cli.command {
        Commands::Generate { config } => {
            assert_eq!(config.to_string_lossy(), "my.toml");
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_command_default_config() {
    let cli = Cli::try_parse_from(["apiforge", "generate"]).unwrap();

    match cli.command {
        Commands::Generate { config } => {
            assert_eq!(config.to_string_lossy(), "apiforge.toml");
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["apiforge", "check", "-c", "other.toml"]).unwrap();

    match cli.command {
        Commands::Check { config } => {
            assert_eq!(config.to_string_lossy(), "other.toml");
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["apiforge", "frobnicate"]).is_err());
}
