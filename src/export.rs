//! JSON export of the schema document.
//!
//! Exports the document as received; table positions are session-only
//! and are not part of the artifact.

use crate::schema::SchemaData;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

pub fn file_name(project_id: &str) -> String {
    format!("schema-{}.json", project_id)
}

pub fn export(schema: &SchemaData, project_id: &str) -> Result<ExportArtifact, ExportError> {
    let contents = serde_json::to_string_pretty(schema)?;
    Ok(ExportArtifact {
        file_name: file_name(project_id),
        contents,
    })
}

impl ExportArtifact {
    /// Save into `dir` under the artifact's file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents).map_err(|source| ExportError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = self.contents.len(), "schema exported");
        Ok(path)
    }
}
