//! Result and error types for rocky-lint.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rocky-lint operations
pub type LintResult<T> = Result<T, LintError>;

/// Process exit status of a lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// No errors, warnings within the configured maximum
    Success,
    /// One or more input paths are missing or not regular files
    InvalidInput,
    /// The compiler host runtime is missing or too old
    UnsupportedRuntime,
    /// Warning count exceeded `--max-warnings`
    TooManyWarnings,
    /// Errors were reported, or workspace/compiler setup failed
    Failure,
}

impl ExitStatus {
    /// Numeric process exit code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InvalidInput => 1,
            Self::UnsupportedRuntime => 253,
            Self::TooManyWarnings => 254,
            Self::Failure => 255,
        }
    }

    /// Whether the run counts as passed
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Errors that abort a lint run
#[derive(Debug, Error)]
pub enum LintError {
    /// Input or definition paths that do not name regular files
    #[error("{} input file(s) do not exist or are not files", files.len())]
    InvalidInput {
        /// Offending paths, in argument order
        files: Vec<PathBuf>,
    },

    /// The temporary workspace directory could not be created
    #[error("Failed to create workspace directory: {0}")]
    Workspace(#[source] std::io::Error),

    /// Reading or writing a specific file failed
    #[error("I/O error on {}: {source}", path.display())]
    File {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error (report output, child process pipes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compiler host runtime could not be started
    #[error("Failed to run {program}: {source}")]
    RuntimeUnavailable {
        /// Runtime binary that was invoked
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The compiler host runtime is older than required
    #[error("Node {required} is required, but {found} is used.")]
    UnsupportedRuntime {
        /// Version reported by the runtime
        found: String,
        /// Required version range
        required: String,
    },

    /// The compiler failed to produce a program
    #[error("Compiler failed: {message}")]
    Compiler {
        /// Error message
        message: String,
    },

    /// Compiler output could not be decoded
    #[error("Malformed compiler output: {0}")]
    Json(#[from] serde_json::Error),
}

impl LintError {
    /// Create a compiler error
    #[must_use]
    pub fn compiler(message: impl Into<String>) -> Self {
        Self::Compiler {
            message: message.into(),
        }
    }

    /// Create a file error for `path`
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Exit status this error terminates the run with
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::InvalidInput { .. } => ExitStatus::InvalidInput,
            Self::RuntimeUnavailable { .. } | Self::UnsupportedRuntime { .. } => {
                ExitStatus::UnsupportedRuntime
            }
            Self::Workspace(_)
            | Self::File { .. }
            | Self::Io(_)
            | Self::Compiler { .. }
            | Self::Json(_) => ExitStatus::Failure,
        }
    }
}
