//! Command-line interface for the vault

pub mod commands;

pub use commands::{AppState, CliResult};
