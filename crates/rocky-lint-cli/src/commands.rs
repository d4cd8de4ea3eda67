//! CLI command definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// rocky-lint: type-check Rocky.js watchface sources with the TypeScript compiler
#[derive(Parser, Debug)]
#[command(name = "rocky-lint")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "rocky-lint [OPTIONS] -d rocky.d.ts <FILES>...")]
pub struct Cli {
    /// JavaScript files to lint
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// TypeScript definition file to check against (repeatable)
    #[arg(short, long = "definition", value_name = "PATH", required = true, action = clap::ArgAction::Append)]
    pub definitions: Vec<PathBuf>,

    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Fail with exit code 254 when warnings exceed this number
    #[arg(long, value_name = "N")]
    pub max_warnings: Option<u32>,

    /// Show the offending source line under each diagnostic
    #[arg(long)]
    pub pretty: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Node.js binary used to run the TypeScript compiler
    #[arg(long, value_name = "PATH", env = "ROCKY_LINT_NODE", default_value = "node")]
    pub node: PathBuf,

    /// Module specifier or path of the TypeScript package
    #[arg(
        long,
        value_name = "PATH",
        env = "ROCKY_LINT_TYPESCRIPT",
        default_value = "typescript"
    )]
    pub typescript: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["rocky-lint", "-d", "rocky.d.ts", "app.js"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("app.js")]);
        assert_eq!(cli.definitions, vec![PathBuf::from("rocky.d.ts")]);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.max_warnings, None);
        assert!(!cli.pretty);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_parse_everything() {
        let cli = Cli::try_parse_from([
            "rocky-lint",
            "-vv",
            "--definition",
            "a.d.ts",
            "-d",
            "b.d.ts",
            "--max-warnings",
            "3",
            "--pretty",
            "--no-color",
            "--node",
            "/opt/node/bin/node",
            "--typescript",
            "/opt/ts",
            "one.js",
            "two.js",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.definitions,
            vec![PathBuf::from("a.d.ts"), PathBuf::from("b.d.ts")]
        );
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.max_warnings, Some(3));
        assert!(cli.pretty);
        assert!(cli.no_color);
        assert_eq!(cli.node, PathBuf::from("/opt/node/bin/node"));
        assert_eq!(cli.typescript, "/opt/ts");
    }

    #[test]
    fn test_definition_required() {
        assert!(Cli::try_parse_from(["rocky-lint", "app.js"]).is_err());
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["rocky-lint", "-d", "rocky.d.ts"]).is_err());
    }

    #[test]
    fn test_max_warnings_must_be_a_number() {
        assert!(Cli::try_parse_from([
            "rocky-lint",
            "-d",
            "rocky.d.ts",
            "--max-warnings",
            "lots",
            "app.js"
        ])
        .is_err());
    }

    #[test]
    fn test_usage_mentions_definition() {
        let usage = Cli::command().render_usage().to_string();
        assert!(usage.contains("-d rocky.d.ts"));
    }
}
