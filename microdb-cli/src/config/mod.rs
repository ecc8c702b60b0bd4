//! Configuration management for microdb-cli

pub mod defaults;
mod settings;

pub use settings::CliConfig;
