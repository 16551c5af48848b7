//! Daily intake tracker CLI library.
//!
//! This crate provides the command-line presentation layer: argument
//! parsing, configuration, the clock, and rendering of command output.

mod cli;
pub mod clock;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DateArg, RemoveArgs};
pub use config::Config;
