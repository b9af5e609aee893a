// src/transpiler/errors.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranspileError {
    #[error("Failed to find entry point; make sure a '# {keyword}' heading exists")]
    MissingEntryPoint { keyword: String },

    #[error("Scene {name} is already defined")]
    DuplicateScene { name: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: tera::Error,
    },
}

impl TranspileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TranspileError::Io {
            path: path.into(),
            source,
        }
    }
}
