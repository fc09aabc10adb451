//! In-memory lesson source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use triolingo_core::error::LoadError;
use triolingo_core::traits::LessonSource;

/// Serves documents from a map of repository-relative paths.
#[derive(Default)]
pub struct MockSource {
    docs: HashMap<String, String>,
    fetch_count: AtomicU32,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any previous one at `path`.
    pub fn with_doc(mut self, path: &str, content: &str) -> Self {
        self.docs.insert(path.to_string(), content.to_string());
        self
    }

    /// Number of fetches made, including failed ones.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LessonSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.docs
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_string()))
    }
}
