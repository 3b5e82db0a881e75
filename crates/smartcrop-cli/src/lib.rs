//! Command-line front end for the smart crop engine.

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{Cli, Command};
pub use config::CliConfig;
