//! Compiler interface.
//!
//! The linter never type-checks anything itself. A [`Compiler`] turns a set
//! of workspace files into a [`Program`], which answers the four diagnostic
//! queries and can emit output. [`TscCompiler`] drives the TypeScript
//! compiler through Node.js.

mod tsc;

pub use tsc::{TscCompiler, MIN_NODE_MAJOR};

use crate::diagnostic::Diagnostic;
use crate::result::LintResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compiler configuration used for every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// ECMAScript target
    pub target: String,
    /// Do not report unreachable code
    pub allow_unreachable_code: bool,
    /// Do not report unused labels
    pub allow_unused_labels: bool,
    /// Treat `null`/`undefined` as distinct types
    pub strict_null_checks: bool,
    /// Standard library surface (`es5` resolves to `lib.es5.d.ts`)
    pub lib: Vec<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target: "es5".to_string(),
            allow_unreachable_code: true,
            allow_unused_labels: true,
            strict_null_checks: true,
            lib: vec!["es5".to_string()],
        }
    }
}

/// Result of an emit pass
#[derive(Debug, Clone, Default)]
pub struct EmitOutcome {
    /// The compiler produced no output files
    pub emit_skipped: bool,
    /// Diagnostics raised while emitting
    pub diagnostics: Vec<Diagnostic>,
}

/// A compiled set of files
pub trait Program {
    /// Problems with the compiler options
    fn options_diagnostics(&self) -> &[Diagnostic];

    /// Problems not tied to any file
    fn global_diagnostics(&self) -> &[Diagnostic];

    /// Parse errors
    fn syntactic_diagnostics(&self) -> &[Diagnostic];

    /// Type-checking issues
    fn semantic_diagnostics(&self) -> &[Diagnostic];

    /// Write transformed output next to the sources
    fn emit(&self) -> LintResult<EmitOutcome>;
}

/// Creates programs from workspace files
pub trait Compiler {
    /// Check that the host runtime can run this compiler
    fn check_runtime(&self) -> LintResult<()> {
        Ok(())
    }

    /// Compile `files`, resolved relative to `root`
    fn create_program(
        &self,
        root: &Path,
        files: &[String],
        options: &CompilerOptions,
    ) -> LintResult<Box<dyn Program>>;
}
