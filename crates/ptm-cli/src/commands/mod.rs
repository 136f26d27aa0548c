//! CLI subcommand implementations.

pub mod matching;
pub mod parse;
