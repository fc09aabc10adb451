//! Error types for lesson loading and quiz operations.
//!
//! Loading errors are split into missing reference data (the user navigated
//! to a language or lesson set that does not exist) and load failures (a
//! resource could not be fetched or parsed). Both end the current view; the
//! caller decides how to render them.

use thiserror::Error;

use crate::quiz::PhaseKind;

/// Errors that can occur while loading reference data from a lesson source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No language with this code is listed in `languages.json`.
    #[error("language \"{0}\" not found")]
    LanguageNotFound(String),

    /// The language exists but its index does not list this lesson set.
    #[error("lesson set metadata for \"{lesson_set}\" in {language} not found")]
    LessonSetNotFound {
        language: String,
        lesson_set: String,
    },

    /// The lesson set is listed but its question document is missing.
    #[error("lesson data for \"{language}/{lesson_set}\" not found")]
    LessonDataMissing {
        language: String,
        lesson_set: String,
    },

    /// The requested resource does not exist in the repository.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be read.
    #[error("failed to fetch {resource}: {message}")]
    Fetch { resource: String, message: String },

    /// The resource was read but is not a valid document.
    #[error("failed to parse {resource}: {message}")]
    Parse { resource: String, message: String },

    /// The lesson set parsed but contains no questions.
    #[error("lesson set \"{0}\" has no questions")]
    EmptyLessonSet(String),
}

impl LoadError {
    /// Returns `true` if the user asked for something the repository does
    /// not have, as opposed to the repository itself being broken.
    pub fn is_missing_reference(&self) -> bool {
        matches!(
            self,
            LoadError::LanguageNotFound(_)
                | LoadError::LessonSetNotFound { .. }
                | LoadError::LessonDataMissing { .. }
        )
    }

    pub(crate) fn parse(resource: &str, message: impl ToString) -> Self {
        LoadError::Parse {
            resource: resource.to_string(),
            message: message.to_string(),
        }
    }
}

/// Errors returned by [`QuizSession`](crate::quiz::QuizSession) operations
/// that are not valid in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("operation requires the {expected} phase, session is {actual}")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },

    #[error("no answer given")]
    EmptyInput,

    #[error("\"{0}\" is not one of the options")]
    UnknownOption(String),

    #[error("option {index} out of range (question has {count} options)")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("question is not multiple-choice")]
    NotMultipleChoice,

    #[error("session already finished")]
    SessionFinished,
}

/// Errors from parsing a navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("empty path segment in \"{0}\"")]
    EmptySegment(String),

    #[error("too many path segments in \"{0}\"")]
    TooManySegments(String),

    #[error("invalid path segment \"{0}\"")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_classification() {
        assert!(LoadError::LanguageNotFound("xx".into()).is_missing_reference());
        assert!(LoadError::LessonSetNotFound {
            language: "es".into(),
            lesson_set: "nope".into(),
        }
        .is_missing_reference());
        assert!(!LoadError::NotFound("languages.json".into()).is_missing_reference());
        assert!(!LoadError::parse("es/basics.json", "eof").is_missing_reference());
    }

    #[test]
    fn messages_name_the_resource() {
        let err = LoadError::LessonDataMissing {
            language: "fr".into(),
            lesson_set: "food".into(),
        };
        assert_eq!(err.to_string(), "lesson data for \"fr/food\" not found");

        let err = LoadError::parse("languages.json", "expected value");
        assert!(err.to_string().contains("languages.json"));
    }
}
