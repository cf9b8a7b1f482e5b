//! `medbill` command-line front end: configuration, subcommands, rendering.

pub mod args;
pub mod commands;
pub mod config;
pub mod render;

pub use args::{Cli, Command};
pub use commands::{Outcome, open_source, run};
pub use config::Config;
