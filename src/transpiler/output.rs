use crate::transpiler::errors::TranspileError;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for generated files. Paths are relative to the sink's root.
pub trait OutputSink {
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), TranspileError>;
}

/// Writes generated files below a root directory on disk.
#[derive(Debug, Clone)]
pub struct FsOutput {
    root: PathBuf,
}

impl FsOutput {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsOutput {
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), TranspileError> {
        let target = self.root.join(path);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| TranspileError::io(parent, e))?;
        }

        fs::write(&target, contents).map_err(|e| TranspileError::io(&target, e))
    }
}

/// Keeps generated files in memory, in the order they were written.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    files: Vec<(PathBuf, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[(PathBuf, String)] {
        &self.files
    }

    /// Contents of the last file written to `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, contents)| contents.as_str())
    }
}

impl OutputSink for MemoryOutput {
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), TranspileError> {
        self.files.push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}
