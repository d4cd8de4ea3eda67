//! rocky-lint: type-check Rocky.js sources with the TypeScript compiler
//!
//! ## Usage
//!
//! ```bash
//! rocky-lint -d rocky.d.ts src/js/index.js          # Lint one file
//! rocky-lint -d rocky.d.ts --pretty src/js/*.js     # Show source excerpts
//! rocky-lint -d rocky.d.ts --max-warnings 0 app.js  # Fail on any warning
//! ```

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rocky_lint::{ExitStatus, LintError};
use rocky_lint_cli::{logging, Cli, CliError, LintConfig, LintRunner};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(&e),
    };
    let config = LintConfig::from_cli(&cli);
    config.color.apply();
    logging::init(&config);

    match LintRunner::new(config).run() {
        Ok(outcome) => ExitCode::from(outcome.status.code()),
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_status().code())
        }
    }
}

/// Help and version exit 0; every other argument problem exits like an invalid input list
fn usage_error(error: &clap::Error) -> ExitCode {
    if let Err(io) = error.print() {
        eprintln!("{io}");
    }
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(ExitStatus::InvalidInput.code()),
    }
}

fn report_error(error: &CliError) {
    match error {
        CliError::Lint(LintError::InvalidInput { files }) => {
            eprintln!("{}", Cli::command().render_help());
            for file in files {
                eprintln!("File does not exist (or isn't a file): {}", file.display());
            }
        }
        other => eprintln!("{} {other}", console::style("Error:").red().bold().for_stderr()),
    }
}
