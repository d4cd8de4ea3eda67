//! Temporary compiler workspace.
//!
//! Inputs are copied (with inline annotations uncommented) to `<stem>.ts`,
//! definitions are copied verbatim to `<index>_<basename>`. The directory is
//! left in place after the run so the compiler's view of the sources can be
//! inspected.

use crate::request::LintRequest;
use crate::result::{LintError, LintResult};
use crate::transform::{count_annotations, uncomment_annotations};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of every workspace directory name
pub const WORKSPACE_PREFIX: &str = "rocky-lint-";

/// Maps workspace-local file names back to the paths the user passed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNameReplacements {
    entries: HashMap<String, PathBuf>,
}

impl FileNameReplacements {
    /// Record `original` under the workspace-local `synthetic` name
    pub fn insert(&mut self, synthetic: impl Into<String>, original: impl Into<PathBuf>) {
        self.entries.insert(synthetic.into(), original.into());
    }

    /// Original path for a workspace-local name
    #[must_use]
    pub fn get(&self, synthetic: &str) -> Option<&Path> {
        self.entries.get(synthetic).map(PathBuf::as_path)
    }

    /// Name to show for `file_name`: the original path, or the name itself
    #[must_use]
    pub fn display_name<'a>(&'a self, file_name: &'a str) -> Cow<'a, str> {
        self.get(file_name)
            .map_or(Cow::Borrowed(file_name), |path| path.to_string_lossy())
    }

    /// Number of recorded names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A materialised workspace
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    files: Vec<String>,
    replacements: FileNameReplacements,
}

impl Workspace {
    /// Create a workspace under the system temporary directory
    pub fn create(request: &LintRequest) -> LintResult<Self> {
        Self::create_in(&std::env::temp_dir(), request)
    }

    /// Create a workspace under `parent`
    pub fn create_in(parent: &Path, request: &LintRequest) -> LintResult<Self> {
        let root = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(LintError::Workspace)?
            .keep();
        info!("Working directory: {}", root.display());

        let mut files = Vec::with_capacity(request.inputs.len() + request.definitions.len());
        let mut replacements = FileNameReplacements::default();

        for input in &request.inputs {
            let name = source_name(input);
            copy_uncommented(input, &root.join(&name))?;
            debug!(from = %input.display(), to = %name, "copied input");
            replacements.insert(name.clone(), input.clone());
            files.push(name);
        }

        for (index, definition) in request.definitions.iter().enumerate() {
            let name = definition_name(index, definition);
            let destination = root.join(&name);
            fs::copy(definition, &destination).map_err(|e| LintError::file(definition, e))?;
            debug!(from = %definition.display(), to = %name, "copied definition");
            files.push(name);
        }

        Ok(Self {
            root,
            files,
            replacements,
        })
    }

    /// Workspace directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace-local file names: inputs first, then definitions
    #[must_use]
    pub fn file_names(&self) -> &[String] {
        &self.files
    }

    /// Display-name table for reporting
    #[must_use]
    pub fn replacements(&self) -> &FileNameReplacements {
        &self.replacements
    }
}

/// `<stem>.ts` for an input file
fn source_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| Cow::Borrowed("input"), |s| s.to_string_lossy());
    format!("{stem}.ts")
}

/// `<index>_<basename>`; the index keeps same-named definitions apart
fn definition_name(index: usize, definition: &Path) -> String {
    let base = definition
        .file_name()
        .map_or_else(|| Cow::Borrowed("definition.d.ts"), |s| s.to_string_lossy());
    format!("{index}_{base}")
}

fn copy_uncommented(source: &Path, destination: &Path) -> LintResult<()> {
    let bytes = fs::read(source).map_err(|e| LintError::file(source, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        LintError::file(
            source,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;
    debug!(
        file = %source.display(),
        annotations = count_annotations(&text),
        "uncommenting"
    );
    fs::write(destination, uncomment_annotations(&text).as_bytes())
        .map_err(|e| LintError::file(destination, e))
}
