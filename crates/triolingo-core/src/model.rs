//! Core data model types for TrioLingo.
//!
//! Languages, lesson sets and questions are read-only reference data loaded
//! from a lesson repository. Score entries are the only mutable records and
//! live in the [`ScoreStore`](crate::score::ScoreStore).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language offered by the lesson repository (`languages.json` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Short identifier used in paths and as the score key (e.g. "es").
    pub code: String,
    /// Human-readable name (e.g. "Spanish").
    pub name: String,
    /// Flag glyph shown next to the name.
    #[serde(default)]
    pub flag: String,
}

/// Lesson-set metadata from `<code>/lessons.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSetMeta {
    pub id: String,
    pub title: String,
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::FillBlank => write!(f, "fill-blank"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple-choice" | "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "fill-blank" | "fill_blank" | "fill-in-the-blank" => Ok(QuestionKind::FillBlank),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single quiz question.
///
/// `prompt` may contain inline glossary markup (`[word](definition)`); the
/// quiz never looks inside it, see [`crate::glossary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub kind: QuestionKind,
    /// Answer choices in display order. Empty for fill-blank questions.
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// Judge a user answer against the correct one.
    ///
    /// Comparison is case-insensitive; fill-blank answers are trimmed first.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.normalize(answer) == self.normalize(&self.correct_answer)
    }

    fn normalize(&self, text: &str) -> String {
        match self.kind {
            QuestionKind::FillBlank => text.trim().to_lowercase(),
            QuestionKind::MultipleChoice => text.to_lowercase(),
        }
    }
}

/// A named, ordered, non-empty collection of questions for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSet {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl LessonSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Running correct/incorrect tally for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub correct: u64,
    pub incorrect: u64,
}

impl ScoreEntry {
    pub fn total(&self) -> u64 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Fraction of correct answers, or `None` before the first answer.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.correct as f64 / total as f64),
        }
    }
}
