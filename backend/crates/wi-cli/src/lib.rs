//! wi-cli library
//!
//! Argument definitions and command runners, exported for the `wi` binary
//! and its tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod runner;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::{Commands, ContractArgs, ListArgs};
pub use error::{CliError, Result};
