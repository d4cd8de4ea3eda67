//! TypeScript compiler backend.
//!
//! Runs `node -e <bridge>` inside the workspace directory, sends the request
//! as JSON on stdin and decodes the JSON answer. Every query batch is one
//! short-lived child process.

use super::{Compiler, CompilerOptions, EmitOutcome, Program};
use crate::diagnostic::{Category, Diagnostic, Message, MessageChain};
use crate::result::{LintError, LintResult};
use crate::source::SourceFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::rc::Rc;
use tracing::debug;

/// Lowest supported Node.js major version
pub const MIN_NODE_MAJOR: u32 = 8;

const BRIDGE_SCRIPT: &str = include_str!("bridge.js");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BridgeRequest<'a> {
    mode: &'a str,
    typescript: &'a str,
    search_paths: Vec<String>,
    files: &'a [String],
    options: &'a CompilerOptions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Text(String),
    Chain(RawChain),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChain {
    message_text: String,
    category: Category,
    code: u32,
    #[serde(default)]
    next: Vec<RawChain>,
}

impl From<RawChain> for MessageChain {
    fn from(raw: RawChain) -> Self {
        Self {
            text: raw.message_text,
            category: raw.category,
            code: raw.code,
            next: raw.next.into_iter().map(Self::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiagnostic {
    category: Category,
    code: u32,
    message_text: RawMessage,
    file: Option<String>,
    start: Option<usize>,
    length: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    options: Vec<RawDiagnostic>,
    global: Vec<RawDiagnostic>,
    syntactic: Vec<RawDiagnostic>,
    semantic: Vec<RawDiagnostic>,
    #[serde(default)]
    sources: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmitResponse {
    emit_skipped: bool,
    diagnostics: Vec<RawDiagnostic>,
    #[serde(default)]
    sources: HashMap<String, String>,
}

/// Files referenced by one response, shared by all its diagnostics
struct SourceCache {
    files: HashMap<String, Rc<SourceFile>>,
}

impl SourceCache {
    fn new(sources: HashMap<String, String>) -> Self {
        let files = sources
            .into_iter()
            .map(|(name, text)| {
                let file = Rc::new(SourceFile::new(name.clone(), text));
                (name, file)
            })
            .collect();
        Self { files }
    }

    fn get(&mut self, name: &str) -> Rc<SourceFile> {
        self.files
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(file = name, "no source text for diagnostic file");
                Rc::new(SourceFile::new(name, ""))
            })
            .clone()
    }

    fn resolve(&mut self, raw: Vec<RawDiagnostic>) -> Vec<Diagnostic> {
        raw.into_iter()
            .map(|d| {
                let message = match d.message_text {
                    RawMessage::Text(text) => Message::Text(text),
                    RawMessage::Chain(chain) => Message::Chain(chain.into()),
                };
                Diagnostic {
                    category: d.category,
                    code: d.code,
                    message,
                    file: d.file.as_deref().map(|name| self.get(name)),
                    start: d.start.unwrap_or(0),
                    length: d.length.unwrap_or(0),
                }
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct DiagnosticGroups {
    options: Vec<Diagnostic>,
    global: Vec<Diagnostic>,
    syntactic: Vec<Diagnostic>,
    semantic: Vec<Diagnostic>,
}

fn parse_check(json: &[u8]) -> LintResult<DiagnosticGroups> {
    let response: CheckResponse = serde_json::from_slice(json)?;
    let mut cache = SourceCache::new(response.sources);
    Ok(DiagnosticGroups {
        options: cache.resolve(response.options),
        global: cache.resolve(response.global),
        syntactic: cache.resolve(response.syntactic),
        semantic: cache.resolve(response.semantic),
    })
}

fn parse_emit(json: &[u8]) -> LintResult<EmitOutcome> {
    let response: EmitResponse = serde_json::from_slice(json)?;
    let mut cache = SourceCache::new(response.sources);
    Ok(EmitOutcome {
        emit_skipped: response.emit_skipped,
        diagnostics: cache.resolve(response.diagnostics),
    })
}

/// Major version from `node --version` output such as `v18.17.1`
fn parse_node_major(version: &str) -> Option<u32> {
    let version = version.trim();
    version
        .strip_prefix('v')
        .unwrap_or(version)
        .split('.')
        .next()?
        .parse()
        .ok()
}

/// Drives the TypeScript compiler through Node.js
#[derive(Debug, Clone)]
pub struct TscCompiler {
    node: PathBuf,
    typescript: String,
    search_paths: Vec<PathBuf>,
}

impl Default for TscCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl TscCompiler {
    /// `node` from `PATH`, `typescript` resolved from the current directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            node: PathBuf::from("node"),
            typescript: "typescript".to_string(),
            search_paths: std::env::current_dir().into_iter().collect(),
        }
    }

    /// Set the Node.js binary
    #[must_use]
    pub fn with_node(mut self, node: impl Into<PathBuf>) -> Self {
        self.node = node.into();
        self
    }

    /// Set the module specifier or path of the TypeScript package
    #[must_use]
    pub fn with_typescript(mut self, typescript: impl Into<String>) -> Self {
        self.typescript = typescript.into();
        self
    }

    /// Add a directory the TypeScript package is resolved from
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    fn node_name(&self) -> String {
        self.node.display().to_string()
    }

    fn invoke(
        &self,
        root: &Path,
        mode: &str,
        files: &[String],
        options: &CompilerOptions,
    ) -> LintResult<Vec<u8>> {
        let request = BridgeRequest {
            mode,
            typescript: &self.typescript,
            search_paths: self
                .search_paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            files,
            options,
        };
        let payload = serde_json::to_vec(&request)?;
        debug!(mode, root = %root.display(), "starting compiler bridge");

        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(BRIDGE_SCRIPT)
            .current_dir(root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LintError::RuntimeUnavailable {
                program: self.node_name(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload)?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LintError::compiler(format!(
                "bridge exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

impl Compiler for TscCompiler {
    fn check_runtime(&self) -> LintResult<()> {
        let output = Command::new(&self.node)
            .arg("--version")
            .output()
            .map_err(|source| LintError::RuntimeUnavailable {
                program: self.node_name(),
                source,
            })?;
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(%version, "detected node");

        match parse_node_major(&version) {
            Some(major) if major >= MIN_NODE_MAJOR => Ok(()),
            _ => Err(LintError::UnsupportedRuntime {
                found: version,
                required: format!(">={MIN_NODE_MAJOR}"),
            }),
        }
    }

    fn create_program(
        &self,
        root: &Path,
        files: &[String],
        options: &CompilerOptions,
    ) -> LintResult<Box<dyn Program>> {
        let stdout = self.invoke(root, "check", files, options)?;
        let groups = parse_check(&stdout)?;
        Ok(Box::new(TscProgram {
            compiler: self.clone(),
            root: root.to_path_buf(),
            files: files.to_vec(),
            options: options.clone(),
            groups,
        }))
    }
}

struct TscProgram {
    compiler: TscCompiler,
    root: PathBuf,
    files: Vec<String>,
    options: CompilerOptions,
    groups: DiagnosticGroups,
}

impl Program for TscProgram {
    fn options_diagnostics(&self) -> &[Diagnostic] {
        &self.groups.options
    }

    fn global_diagnostics(&self) -> &[Diagnostic] {
        &self.groups.global
    }

    fn syntactic_diagnostics(&self) -> &[Diagnostic] {
        &self.groups.syntactic
    }

    fn semantic_diagnostics(&self) -> &[Diagnostic] {
        &self.groups.semantic
    }

    fn emit(&self) -> LintResult<EmitOutcome> {
        let stdout = self
            .compiler
            .invoke(&self.root, "emit", &self.files, &self.options)?;
        parse_emit(&stdout)
    }
}
