//! CLI module for the schema-export binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
