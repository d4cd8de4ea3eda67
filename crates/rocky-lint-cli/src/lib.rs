//! rocky-lint CLI Library
//!
//! Argument parsing, configuration, logging and exit-code plumbing around
//! the `rocky-lint` library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::Cli;
pub use config::{ColorChoice, LintConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::LintRunner;
