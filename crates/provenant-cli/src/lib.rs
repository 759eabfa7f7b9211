//! Provenant CLI library.
//!
//! Command-line interface for analyzing documents: reads text files,
//! runs them through the analysis pipeline and prints reports as tables,
//! JSON or flat dotted keys.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
