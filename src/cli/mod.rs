//! # CLI Module
//!
//! Command-line interface for the apiforge maintenance commands.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Validate the configured model mapping, then generate the forms and routes
//! source files:
//!
//! ```bash
//! apiforge generate --config apiforge.toml
//! ```
//!
//! ### `check`
//!
//! Validate the configuration without writing anything:
//!
//! ```bash
//! apiforge check --config apiforge.toml
//! ```
//!
//! Both commands print a success line or the failing error; the process exit
//! code is the only machine-readable contract.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
