//! rocky-lint: type-check Rocky.js watchface sources against TypeScript definitions
//!
//! Plain JavaScript goes in, with optional `/*: type */` annotations. The
//! sources are copied into a scratch workspace, the annotations are
//! uncommented, and the TypeScript compiler checks the result against the
//! Rocky.js definition files. Its diagnostics are filtered, re-categorised
//! and printed against the original file names.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      ROCKY-LINT Pipeline                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌───────────┐   ┌──────────┐   ┌──────────────┐   │
//! │  │ Request │──►│ Workspace │──►│ Compiler │──►│ Classifier   │   │
//! │  │ (paths) │   │ + uncom-  │   │ (tsc via │   │ + Reporter   │   │
//! │  │         │   │   ment    │   │  node)   │   │ ─► exit code │   │
//! │  └─────────┘   └───────────┘   └──────────┘   └──────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rocky_lint::{LintRequest, RunController, TscCompiler};
//!
//! let request = LintRequest::new(vec!["app.js".into()], vec!["rocky.d.ts".into()]);
//! let compiler = TscCompiler::new();
//! let outcome = RunController::new(&compiler).run(
//!     &request,
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! )?;
//! std::process::exit(i32::from(outcome.status.code()));
//! # Ok::<(), rocky_lint::LintError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Diagnostic filtering and re-categorisation
pub mod classify;
/// Compiler interface and the Node.js backend
pub mod compiler;
/// Run orchestration and exit decision
pub mod controller;
/// Compiler diagnostics and message chains
pub mod diagnostic;
/// Console rendering
pub mod reporter;
/// Command-line request model
pub mod request;
/// Error and exit status types
pub mod result;
/// Source text with UTF-16 position mapping
pub mod source;
/// Annotation uncommenting
pub mod transform;
/// Scratch workspace materialisation
pub mod workspace;

pub use classify::{Classification, ClassifiedLine, Classifier, Rule, RuleAction, RunStats};
pub use compiler::{Compiler, CompilerOptions, EmitOutcome, Program, TscCompiler};
pub use controller::{decide, RunController, RunOutcome};
pub use diagnostic::{Category, Diagnostic, Message, MessageChain};
pub use reporter::Reporter;
pub use request::LintRequest;
pub use result::{ExitStatus, LintError, LintResult};
pub use source::{LineAndCharacter, SourceFile};
pub use transform::uncomment_annotations;
pub use workspace::{FileNameReplacements, Workspace};
