//! Reference-data lookups behind each view.
//!
//! The catalog resolves what a view needs from a [`LessonSource`] and turns
//! missing documents into the matching "not found" error, checking the
//! language first, then the lesson-set metadata, then the lesson data.

use std::sync::Arc;

use tracing::instrument;

use crate::error::LoadError;
use crate::model::{Language, LessonSet, LessonSetMeta};
use crate::quiz::QuizSession;
use crate::route::Route;
use crate::traits::LessonSource;

/// Everything the quiz view needs, loaded and checked.
#[derive(Debug, Clone)]
pub struct QuizLaunch {
    pub language: Language,
    pub meta: LessonSetMeta,
    pub lesson_set: LessonSet,
}

impl QuizLaunch {
    /// Start a fresh session over the loaded lesson set.
    pub fn start(self) -> QuizSession {
        QuizSession::new(self.language.code, self.lesson_set)
    }
}

/// Lookups over a lesson source.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn LessonSource>,
}

impl Catalog {
    pub fn new(source: Arc<dyn LessonSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn source(&self) -> &dyn LessonSource {
        self.source.as_ref()
    }

    pub async fn languages(&self) -> Result<Vec<Language>, LoadError> {
        self.source.languages().await
    }

    /// Details for one language.
    #[instrument(skip(self))]
    pub async fn language(&self, code: &str) -> Result<Language, LoadError> {
        self.source
            .languages()
            .await?
            .into_iter()
            .find(|l| l.code == code)
            .ok_or_else(|| LoadError::LanguageNotFound(code.to_string()))
    }

    /// A language and its lesson sets. A language without an index has no
    /// lesson sets.
    #[instrument(skip(self))]
    pub async fn lesson_sets(&self, code: &str) -> Result<(Language, Vec<LessonSetMeta>), LoadError> {
        let language = self.language(code).await?;
        let sets = match self.source.lesson_sets(code).await {
            Ok(sets) => sets,
            Err(LoadError::NotFound(resource)) => {
                tracing::warn!("no lesson index for {code} ({resource})");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok((language, sets))
    }

    /// Load and check everything needed to quiz on one lesson set.
    #[instrument(skip(self))]
    pub async fn open_quiz(&self, code: &str, lesson_set_id: &str) -> Result<QuizLaunch, LoadError> {
        let language = self.language(code).await?;

        let not_listed = || LoadError::LessonSetNotFound {
            language: code.to_string(),
            lesson_set: lesson_set_id.to_string(),
        };
        let meta = match self.source.lesson_sets(code).await {
            Ok(sets) => sets
                .into_iter()
                .find(|s| s.id == lesson_set_id)
                .ok_or_else(not_listed)?,
            Err(LoadError::NotFound(_)) => return Err(not_listed()),
            Err(e) => return Err(e),
        };

        let lesson_set = match self.source.lesson_set(code, &meta).await {
            Ok(set) => set,
            Err(LoadError::NotFound(_)) => {
                return Err(LoadError::LessonDataMissing {
                    language: code.to_string(),
                    lesson_set: lesson_set_id.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            language = code,
            lesson_set = lesson_set_id,
            questions = lesson_set.len(),
            "lesson set loaded"
        );

        Ok(QuizLaunch {
            language,
            meta,
            lesson_set,
        })
    }

    /// Every quiz route in the repository. Languages whose index cannot be
    /// loaded are skipped with a warning.
    pub async fn all_routes(&self) -> Result<Vec<Route>, LoadError> {
        let mut routes = Vec::new();
        for language in self.source.languages().await? {
            match self.source.lesson_sets(&language.code).await {
                Ok(sets) => routes.extend(sets.into_iter().map(|s| Route::Quiz {
                    language: language.code.clone(),
                    lesson_set: s.id,
                })),
                Err(e) => tracing::warn!("could not load lesson sets for {}: {e}", language.code),
            }
        }
        Ok(routes)
    }
}
