//! Export: packages a generated document as an `Artifact` and hands it to a
//! persistence collaborator.
//!
//! The HTTP download path needs no sink; `DirectorySink` is the server-side one.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const ARTIFACT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A finished, self-contained document plus the fixed name and type it is saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl Artifact {
    pub fn html(filename: &str, body: String) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: ARTIFACT_CONTENT_TYPE,
            body,
        }
    }

    /// `Content-Disposition` value forcing a download under the artifact's filename.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| match c {
                '"' | '\\' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("attachment; filename=\"{safe}\"")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredArtifact {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Persistence collaborator for exported artifacts.
///
/// Carried in `AppState` as `Arc<dyn ArtifactSink>`.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn store(&self, session_id: Uuid, artifact: &Artifact)
        -> Result<StoredArtifact, AppError>;
}

/// Writes `<root>/<session-id>/<filename>`, overwriting earlier exports of the same
/// session.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn target(&self, session_id: Uuid, filename: &str) -> Result<PathBuf, AppError> {
        // Keep only the final component so a configured filename cannot escape the root.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| AppError::Validation(format!("Invalid export filename '{filename}'")))?;
        Ok(self.root.join(session_id.to_string()).join(name))
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn store(
        &self,
        session_id: Uuid,
        artifact: &Artifact,
    ) -> Result<StoredArtifact, AppError> {
        let path = self.target(session_id, &artifact.filename)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating export directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, artifact.body.as_bytes())
            .await
            .with_context(|| format!("writing artifact to {}", path.display()))?;

        info!(%session_id, path = %path.display(), bytes = artifact.body.len(), "Artifact stored");
        Ok(StoredArtifact {
            path,
            bytes: artifact.body.len(),
        })
    }
}
