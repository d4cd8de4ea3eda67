//! Lint runner implementation

use crate::config::LintConfig;
use crate::error::CliResult;
use console::Term;
use rocky_lint::{RunController, RunOutcome, TscCompiler};
use std::io::Write;
use tracing::{debug, info};

/// Runs one lint pass for a CLI configuration
#[derive(Debug)]
pub struct LintRunner {
    config: LintConfig,
    compiler: TscCompiler,
}

impl LintRunner {
    /// Create a runner with the Node.js compiler backend
    #[must_use]
    pub fn new(config: LintConfig) -> Self {
        let compiler = TscCompiler::new()
            .with_node(config.node.clone())
            .with_typescript(config.typescript.clone());
        Self { config, compiler }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lint to the terminal: diagnostics on stdout, summary on stderr
    pub fn run(&self) -> CliResult<RunOutcome> {
        self.run_with(&mut Term::stdout(), &mut Term::stderr())
    }

    /// Lint to arbitrary writers
    pub fn run_with(&self, out: &mut dyn Write, err: &mut dyn Write) -> CliResult<RunOutcome> {
        if self.config.verbosity.is_debug() {
            debug!(config = ?self.config, "arguments");
        }
        let request = self.config.request();
        info!(
            files = request.inputs.len(),
            definitions = request.definitions.len(),
            "Linting"
        );
        let outcome = RunController::new(&self.compiler).run(&request, out, err)?;
        out.flush()?;
        info!(
            total = outcome.stats.total,
            status = outcome.status.code(),
            "Lint finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use rocky_lint::LintError;
    use std::path::PathBuf;

    #[test]
    fn test_runner_keeps_config() {
        let config = LintConfig::new().with_node("/opt/node");
        let runner = LintRunner::new(config.clone());
        assert_eq!(runner.config(), &config);
    }

    #[test]
    fn test_missing_files_rejected_before_node() {
        let config = LintConfig::new()
            .with_files(
                vec![PathBuf::from("definitely/missing.js")],
                vec![PathBuf::from("definitely/missing.d.ts")],
            )
            .with_node("definitely-not-a-node-binary");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = LintRunner::new(config).run_with(&mut out, &mut err);
        match result {
            Err(CliError::Lint(LintError::InvalidInput { files })) => assert_eq!(files.len(), 2),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_node_is_unsupported_runtime() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("app.js");
        let def = dir.path().join("rocky.d.ts");
        std::fs::write(&input, "var x = 1;\n").unwrap();
        std::fs::write(&def, "declare var rocky: any;\n").unwrap();
        let config = LintConfig::new()
            .with_files(vec![input], vec![def])
            .with_node(dir.path().join("no-such-node"));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let error = LintRunner::new(config)
            .run_with(&mut out, &mut err)
            .unwrap_err();
        assert_eq!(error.exit_status().code(), 253);
    }
}
