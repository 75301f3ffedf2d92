//! CLI module
//!
//! Command-line interface over the paged collection API.
//!
//! # Commands
//!
//! - `fetch` - Fetch one page of a collection with its neighbor links
//! - `dump` - Aggregate every page of a collection into one list

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
