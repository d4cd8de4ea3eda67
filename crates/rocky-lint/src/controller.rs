//! Lint run orchestration.
//!
//! ```text
//! Validating ──► Materializing ──► Compiling ──► Reporting ──► Deciding
//!     │ exit 1        │ exit 255                                 │ 255 / 254 / 0
//! ```
//!
//! Diagnostics go to the `out` writer, summaries and hints to `err`.

use crate::classify::{Classification, Classifier, RunStats};
use crate::compiler::{Compiler, CompilerOptions, Program};
use crate::diagnostic::{Category, Diagnostic};
use crate::reporter::Reporter;
use crate::request::LintRequest;
use crate::result::{ExitStatus, LintResult};
use crate::workspace::Workspace;
use console::style;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Final counters
    pub stats: RunStats,
    /// Exit status chosen by the decision policy
    pub status: ExitStatus,
    /// Workspace directory, left in place for inspection
    pub workspace: PathBuf,
}

/// Exit status for the final counters: errors, then the warning threshold
#[must_use]
pub fn decide(stats: RunStats, request: &LintRequest) -> ExitStatus {
    if stats.has_errors() {
        ExitStatus::Failure
    } else if stats.has_warnings() && request.exceeds_max_warnings(stats.warnings) {
        ExitStatus::TooManyWarnings
    } else {
        ExitStatus::Success
    }
}

/// Runs one lint pass against a compiler
#[derive(Debug)]
pub struct RunController<'c, C: Compiler + ?Sized> {
    compiler: &'c C,
    options: CompilerOptions,
    temp_root: Option<PathBuf>,
}

impl<'c, C: Compiler + ?Sized> RunController<'c, C> {
    /// Create a controller with the fixed compiler options
    #[must_use]
    pub fn new(compiler: &'c C) -> Self {
        Self {
            compiler,
            options: CompilerOptions::default(),
            temp_root: None,
        }
    }

    /// Create workspaces under `dir` instead of the system temp directory
    #[must_use]
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    fn materialize(&self, request: &LintRequest) -> LintResult<Workspace> {
        match &self.temp_root {
            Some(dir) => Workspace::create_in(dir, request),
            None => Workspace::create(request),
        }
    }

    /// Validate, materialise, compile, report and decide.
    ///
    /// Errors abort the run; their exit status is `LintError::exit_status`.
    pub fn run(
        &self,
        request: &LintRequest,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> LintResult<RunOutcome> {
        request.validate()?;
        self.compiler.check_runtime()?;

        let workspace = self.materialize(request)?;
        debug!(files = ?workspace.file_names(), "Compiling files");
        let program =
            self.compiler
                .create_program(workspace.root(), workspace.file_names(), &self.options)?;

        let reporter = Reporter::new(workspace.replacements(), request.pretty);
        let dump = request.verbosity >= 2;
        let stats = report_all(program.as_ref(), &reporter, dump, out)?;
        let status = decide(stats, request);
        write_verdict(err, stats, status, request.max_warnings)?;

        if status.is_success() {
            emit(program.as_ref());
        }

        Ok(RunOutcome {
            stats,
            status,
            workspace: workspace.root().to_path_buf(),
        })
    }
}

/// Classify and print the four diagnostic groups in order.
///
/// With `dump` set every raw diagnostic is logged before classification.
fn report_all(
    program: &dyn Program,
    reporter: &Reporter<'_>,
    dump: bool,
    out: &mut dyn Write,
) -> LintResult<RunStats> {
    let groups: [(&str, &[Diagnostic], Option<Category>); 4] = [
        ("options", program.options_diagnostics(), None),
        ("global", program.global_diagnostics(), None),
        ("syntactic", program.syntactic_diagnostics(), Some(Category::Error)),
        ("semantic", program.semantic_diagnostics(), Some(Category::Warning)),
    ];

    let mut classifier = Classifier::new();
    for (name, diagnostics, category_override) in groups {
        debug!("Printing {name} diagnostics...");
        for diagnostic in diagnostics {
            if dump {
                debug!(
                    category = %diagnostic.category,
                    code = diagnostic.code,
                    message = ?diagnostic.message,
                    file = diagnostic.file.as_ref().map(|f| f.file_name()),
                    start = diagnostic.start,
                    length = diagnostic.length,
                    "diagnostic"
                );
            }
            if let Classification::Emit(lines) = classifier.classify(diagnostic, category_override)
            {
                reporter.render(out, diagnostic, &lines)?;
            }
        }
    }
    Ok(classifier.stats())
}

fn write_summary(err: &mut dyn Write, stats: RunStats) -> std::io::Result<()> {
    writeln!(err)?;
    writeln!(
        err,
        "Errors: {}, Warnings: {}",
        style(stats.errors).bold().for_stderr(),
        style(stats.warnings).bold().for_stderr()
    )
}

fn write_verdict(
    err: &mut dyn Write,
    stats: RunStats,
    status: ExitStatus,
    max_warnings: Option<u32>,
) -> std::io::Result<()> {
    if stats.has_errors() {
        write_summary(err, stats)?;
        writeln!(
            err,
            "Please fix the issues marked with '{}' above.",
            style("error").red().for_stderr()
        )
    } else if stats.has_warnings() {
        write_summary(err, stats)?;
        writeln!(err, "There are some issues with your code.")?;
        match (status, max_warnings) {
            (ExitStatus::TooManyWarnings, Some(max)) => {
                writeln!(err, "Too many warnings (max: {max}).")
            }
            _ => Ok(()),
        }
    } else {
        writeln!(
            err,
            "Everything looks {}!",
            style("AWESOME").magenta().bold().for_stderr()
        )
    }
}

/// Emit failures are logged only; they never change the exit status
fn emit(program: &dyn Program) {
    match program.emit() {
        Ok(outcome) if !outcome.emit_skipped => info!("Transformed file has been emitted."),
        Ok(outcome) => debug!(diagnostics = outcome.diagnostics.len(), "emit skipped"),
        Err(e) => warn!("Emit failed: {e}"),
    }
}
