//! Lesson repository document parser.
//!
//! Converts the three JSON documents of a lesson repository into the model,
//! and validates lesson sets for common authoring mistakes.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::LoadError;
use crate::glossary;
use crate::model::{Language, LessonSet, LessonSetMeta, Question, QuestionKind};

/// Name of the top-level language list.
pub const LANGUAGES_DOC: &str = "languages.json";

/// Name of a language's lesson-set index.
pub const LESSON_INDEX_DOC: &str = "lessons.json";

/// Repository-relative path of a language's lesson-set index.
pub fn lesson_index_path(language: &str) -> String {
    format!("{language}/{LESSON_INDEX_DOC}")
}

/// Repository-relative path of a lesson set's question document.
pub fn lesson_set_path(language: &str, lesson_set: &str) -> String {
    format!("{language}/{lesson_set}.json")
}

/// Intermediate structure for `<code>/<id>.json`.
#[derive(Debug, Deserialize)]
struct JsonLessonFile {
    lessons: Vec<JsonLessonItem>,
}

#[derive(Debug, Deserialize)]
struct JsonLessonItem {
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    correct: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Parse `languages.json`.
pub fn parse_languages(content: &str) -> Result<Vec<Language>, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::parse(LANGUAGES_DOC, e))
}

/// Parse a language's `lessons.json`.
pub fn parse_lesson_index(language: &str, content: &str) -> Result<Vec<LessonSetMeta>, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::parse(&lesson_index_path(language), e))
}

/// Parse a lesson set document into a [`LessonSet`] titled from its metadata.
///
/// Fails on an empty question list, an unknown question type, a
/// multiple-choice question without options, or a blank correct answer.
pub fn parse_lesson_set(
    language: &str,
    meta: &LessonSetMeta,
    content: &str,
) -> Result<LessonSet, LoadError> {
    let resource = lesson_set_path(language, &meta.id);
    let parsed: JsonLessonFile =
        serde_json::from_str(content).map_err(|e| LoadError::parse(&resource, e))?;

    if parsed.lessons.is_empty() {
        return Err(LoadError::EmptyLessonSet(meta.id.clone()));
    }

    let questions = parsed
        .lessons
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let kind: QuestionKind = item.kind.parse().map_err(|e: String| {
                LoadError::parse(&resource, format!("question {}: {e}", i + 1))
            })?;

            if item.correct.trim().is_empty() {
                return Err(LoadError::parse(
                    &resource,
                    format!("question {}: correct answer is blank", i + 1),
                ));
            }

            let options = match kind {
                QuestionKind::MultipleChoice => match item.options {
                    Some(options) if !options.is_empty() => options,
                    _ => {
                        return Err(LoadError::parse(
                            &resource,
                            format!("question {}: multiple-choice question has no options", i + 1),
                        ))
                    }
                },
                // Options on a fill-blank question are never shown.
                QuestionKind::FillBlank => Vec::new(),
            };

            Ok(Question {
                prompt: item.question,
                kind,
                options,
                correct_answer: item.correct,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LessonSet {
        id: meta.id.clone(),
        title: meta.title.clone(),
        questions,
    })
}

/// A warning from lesson validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    pub message: String,
}

/// Check a lesson set for authoring problems that do not prevent loading.
///
/// `raw` is the source document, used to spot options on fill-blank
/// questions that the parser drops.
pub fn validate_lesson_set(set: &LessonSet, raw: Option<&str>) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, question) in set.questions.iter().enumerate() {
        let number = Some(i + 1);

        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt is empty".into(),
            });
        }

        if glossary::has_unterminated_span(&question.prompt) {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt has unterminated glossary markup".into(),
            });
        }

        if question.kind == QuestionKind::MultipleChoice {
            if !question.options.iter().any(|o| question.is_correct(o)) {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!(
                        "correct answer \"{}\" is not among the options",
                        question.correct_answer
                    ),
                });
            }

            let mut seen = HashSet::new();
            for option in &question.options {
                if !seen.insert(option.to_lowercase()) {
                    warnings.push(ValidationWarning {
                        question: number,
                        message: format!("duplicate option \"{option}\""),
                    });
                }
            }
        }
    }

    if let Some(raw) = raw {
        if let Ok(parsed) = serde_json::from_str::<JsonLessonFile>(raw) {
            for (i, item) in parsed.lessons.iter().enumerate() {
                let fill_blank = item.kind.parse::<QuestionKind>().ok() == Some(QuestionKind::FillBlank);
                if fill_blank && item.options.as_ref().is_some_and(|o| !o.is_empty()) {
                    warnings.push(ValidationWarning {
                        question: Some(i + 1),
                        message: "options on a fill-blank question are ignored".into(),
                    });
                }
            }
        }
    }

    warnings
}

/// Warn about language codes listed more than once.
pub fn validate_languages(languages: &[Language]) -> Vec<ValidationWarning> {
    duplicates(languages.iter().map(|l| l.code.as_str()))
        .map(|code| ValidationWarning {
            question: None,
            message: format!("duplicate language code: {code}"),
        })
        .collect()
}

/// Warn about lesson sets listed more than once in a language's index.
pub fn validate_lesson_index(sets: &[LessonSetMeta]) -> Vec<ValidationWarning> {
    duplicates(sets.iter().map(|s| s.id.as_str()))
        .map(|id| ValidationWarning {
            question: None,
            message: format!("duplicate lesson set id: {id}"),
        })
        .collect()
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    let mut seen = HashSet::new();
    ids.filter(move |id| !seen.insert(*id))
}
