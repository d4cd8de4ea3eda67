//! CLI configuration

use crate::commands::Cli;
use rocky_lint::LintRequest;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Warnings only
    #[default]
    Normal,
    /// Informational progress (`-v`)
    Verbose,
    /// Everything the linter logs (`-vv`)
    Debug,
}

impl Verbosity {
    /// Map a `-v` count to a level
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter(self) -> &'static str {
        match self {
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }

    /// Check if debug mode (argument and diagnostic dumps)
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Numeric level carried on the lint request
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Verbose => 1,
            Self::Debug => 2,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Use colors when the stream is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply the choice to every `console` stream
    pub fn apply(self) {
        if self == Self::Never {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Source files to lint
    pub files: Vec<PathBuf>,
    /// Definition files
    pub definitions: Vec<PathBuf>,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Show source excerpts
    pub pretty: bool,
    /// Warning threshold
    pub max_warnings: Option<u32>,
    /// Node.js binary
    pub node: PathBuf,
    /// TypeScript module specifier or path
    pub typescript: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            definitions: Vec::new(),
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            pretty: false,
            max_warnings: None,
            node: PathBuf::from("node"),
            typescript: "typescript".to_string(),
        }
    }
}

impl LintConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configuration from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new()
            .with_files(cli.files.clone(), cli.definitions.clone())
            .with_verbosity(Verbosity::from_count(cli.verbose))
            .with_color(if cli.no_color {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            })
            .with_pretty(cli.pretty)
            .with_max_warnings(cli.max_warnings)
            .with_node(cli.node.clone())
            .with_typescript(cli.typescript.clone())
    }

    /// Set input and definition files
    #[must_use]
    pub fn with_files(mut self, files: Vec<PathBuf>, definitions: Vec<PathBuf>) -> Self {
        self.files = files;
        self.definitions = definitions;
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
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

    /// Set the Node.js binary
    #[must_use]
    pub fn with_node(mut self, node: impl Into<PathBuf>) -> Self {
        self.node = node.into();
        self
    }

    /// Set the TypeScript module
    #[must_use]
    pub fn with_typescript(mut self, typescript: impl Into<String>) -> Self {
        self.typescript = typescript.into();
        self
    }

    /// The lint request this configuration describes
    #[must_use]
    pub fn request(&self) -> LintRequest {
        LintRequest::new(self.files.clone(), self.definitions.clone())
            .with_verbosity(self.verbosity.level())
            .with_pretty(self.pretty)
            .with_max_warnings(self.max_warnings)
    }
}
