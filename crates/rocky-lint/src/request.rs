//! Validated lint invocation.

use crate::result::{LintError, LintResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything one lint run needs from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintRequest {
    /// Source files to lint, in argument order
    pub inputs: Vec<PathBuf>,
    /// Definition files loaded alongside the sources
    pub definitions: Vec<PathBuf>,
    /// Verbosity level (0 = warnings, 1 = info, 2+ = debug)
    pub verbosity: u8,
    /// Show a source excerpt under each located diagnostic
    pub pretty: bool,
    /// Fail with a distinct status when warnings exceed this count
    pub max_warnings: Option<u32>,
}

impl LintRequest {
    /// Create a request for `inputs` checked against `definitions`
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>, definitions: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            definitions,
            ..Self::default()
        }
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set pretty output
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the warning threshold
    #[must_use]
    pub const fn with_max_warnings(mut self, max_warnings: Option<u32>) -> Self {
        self.max_warnings = max_warnings;
        self
    }

    /// Paths that are not regular files: inputs first, then definitions
    #[must_use]
    pub fn invalid_files(&self) -> Vec<PathBuf> {
        self.inputs
            .iter()
            .chain(&self.definitions)
            .filter(|path| !is_file(path))
            .cloned()
            .collect()
    }

    /// Reject the request if any path is not a regular file
    pub fn validate(&self) -> LintResult<()> {
        let files = self.invalid_files();
        if files.is_empty() {
            Ok(())
        } else {
            Err(LintError::InvalidInput { files })
        }
    }

    /// Whether `warnings` exceeds the configured threshold
    #[must_use]
    pub fn exceeds_max_warnings(&self, warnings: usize) -> bool {
        self.max_warnings
            .is_some_and(|max| warnings > max as usize)
    }
}

fn is_file(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "not a file");
            false
        }
    }
}
