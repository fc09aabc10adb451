//! Core trait definitions for lesson repositories.
//!
//! The async [`LessonSource`] trait is implemented by the
//! `triolingo-sources` crate for directories and static HTTP hosts.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::{Language, LessonSet, LessonSetMeta};
use crate::parser;

// ---------------------------------------------------------------------------
// Lesson source trait
// ---------------------------------------------------------------------------

/// A read-only lesson repository.
///
/// Implementors only need [`fetch`](Self::fetch); the document accessors
/// parse what it returns.
#[async_trait]
pub trait LessonSource: Send + Sync {
    /// Human-readable source name (e.g. "dir:./public").
    fn name(&self) -> &str;

    /// Fetch a document by repository-relative path (e.g. "es/lessons.json").
    ///
    /// A missing document must be reported as [`LoadError::NotFound`].
    async fn fetch(&self, path: &str) -> Result<String, LoadError>;

    /// All languages in `languages.json`.
    async fn languages(&self) -> Result<Vec<Language>, LoadError> {
        let content = self.fetch(parser::LANGUAGES_DOC).await?;
        parser::parse_languages(&content)
    }

    /// Lesson-set metadata from `<code>/lessons.json`.
    async fn lesson_sets(&self, language: &str) -> Result<Vec<LessonSetMeta>, LoadError> {
        let content = self.fetch(&parser::lesson_index_path(language)).await?;
        parser::parse_lesson_index(language, &content)
    }

    /// The questions of one lesson set, titled from `meta`.
    async fn lesson_set(&self, language: &str, meta: &LessonSetMeta) -> Result<LessonSet, LoadError> {
        let content = self.fetch(&parser::lesson_set_path(language, &meta.id)).await?;
        parser::parse_lesson_set(language, meta, &content)
    }
}
