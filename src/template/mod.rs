//! Template loading and rendering

mod renderer;

pub use renderer::render;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::vault::Vault;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read template {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load a template note's content from the vault.
///
/// Callers treat a missing template as "empty template" after logging; the
/// distinction between missing and unreadable is kept for the log message.
pub fn load_content<V: Vault>(vault: &V, path: &Path) -> Result<String, TemplateError> {
    if !vault.exists(path) {
        return Err(TemplateError::NotFound(path.to_path_buf()));
    }

    vault.read_content(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
