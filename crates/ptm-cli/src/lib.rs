//! Personal trainer matcher CLI library.
//!
//! This crate provides the CLI interface and spreadsheet I/O around `ptm-core`.

mod cli;
pub mod commands;
mod config;
pub mod sheet;

pub use cli::{Cli, Commands};
pub use config::Config;
