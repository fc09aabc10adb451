//! Lesson source backed by a local directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use triolingo_core::error::LoadError;
use triolingo_core::traits::LessonSource;

use crate::check_relative_path;

/// Serves documents from `<root>/languages.json`, `<root>/<code>/lessons.json`
/// and `<root>/<code>/<id>.json`.
pub struct DirSource {
    root: PathBuf,
    name: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = format!("dir:{}", root.display());
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl LessonSource for DirSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        check_relative_path(path)?;
        let full = self.root.join(path);

        match tokio::fs::read_to_string(&full).await {
            Ok(content) => {
                tracing::debug!(bytes = content.len(), "read {}", full.display());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LoadError::NotFound(path.to_string())),
            Err(e) => Err(LoadError::Fetch {
                resource: path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
