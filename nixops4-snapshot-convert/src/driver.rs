use crate::rewrite::{rewrite_file, Mode, Outcome};
use anyhow::{Context, Result};
use std::{
    error::Error,
    fmt::Display,
    path::{Path, PathBuf},
};
use tracing::info;

const MODULE_SUFFIX: &str = ".nix";

/// The directory argument does not exist or is not a directory.
#[derive(Clone, Debug)]
pub struct NotADirectory {
    pub path: PathBuf,
}
impl Display for NotADirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a directory", self.path.display())
    }
}
impl Error for NotADirectory {}

/// What happened to the modules in a directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub converted: usize,
    pub unchanged: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Any regular file whose name ends in `.nix`, dotfiles included.
fn is_module_file(path: &Path) -> bool {
    path.file_name()
        .map_or(false, |name| name.to_string_lossy().ends_with(MODULE_SUFFIX))
        && path.is_file()
}

/// List the module files directly inside `dir`, sorted by name.
pub fn module_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("listing directory {}", dir.display()))?;
        let path = entry.path();
        if is_module_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Rewrite every module in `dir`, one after the other.
///
/// Stops at the first error. Files before it stay rewritten; files after it
/// are not touched.
pub fn convert_directory(dir: &Path, mode: Mode) -> Result<Summary> {
    if !dir.is_dir() {
        return Err(NotADirectory {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let mut summary = Summary::default();
    for path in module_files(dir)? {
        summary.record(rewrite_file(&path, mode)?);
    }
    info!(
        converted = summary.converted,
        unchanged = summary.unchanged,
        "done"
    );
    Ok(summary)
}
