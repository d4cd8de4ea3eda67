//! Error types for the CLI

use rocky_lint::{ExitStatus, LintError};
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// rocky-lint library error
    #[error(transparent)]
    Lint(#[from] LintError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit status the process ends with
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Lint(e) => e.exit_status(),
            Self::Io(_) => ExitStatus::Failure,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_input_exits_one() {
        let err: CliError = LintError::InvalidInput {
            files: vec![PathBuf::from("missing.js")],
        }
        .into();
        assert_eq!(err.exit_status().code(), 1);
    }

    #[test]
    fn test_unsupported_runtime_exits_253() {
        let err: CliError = LintError::UnsupportedRuntime {
            found: "v4.9.1".to_string(),
            required: ">=8".to_string(),
        }
        .into();
        assert_eq!(err.exit_status().code(), 253);
        assert!(err.to_string().contains("v4.9.1"));
    }

    #[test]
    fn test_compiler_error_exits_255() {
        let err: CliError = LintError::compiler("bridge exited").into();
        assert_eq!(err.exit_status().code(), 255);
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
        assert_eq!(cli_err.exit_status(), ExitStatus::Failure);
    }
}
