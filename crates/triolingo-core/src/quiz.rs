//! Quiz progression state machine.
//!
//! A [`QuizSession`] walks one lesson set question by question. Each
//! question starts in the answering phase; a successful [`submit`] judges
//! the pending input, reports exactly one outcome to the score sink and
//! moves to the result phase; [`advance`] moves to the next question or
//! completes the session.
//!
//! [`submit`]: QuizSession::submit
//! [`advance`]: QuizSession::advance

use std::fmt;

use crate::error::QuizError;
use crate::model::{LessonSet, Question, QuestionKind};
use crate::score::{Outcome, ScoreSink};

/// XP announced for each correct answer. Presentational only.
pub const XP_PER_CORRECT: u32 = 10;

/// The verdict on one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub correct: bool,
    /// The answer as submitted.
    pub given: String,
    /// The question's correct answer, as written in the lesson set.
    pub expected: String,
}

impl Judgement {
    pub fn outcome(&self) -> Outcome {
        if self.correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Session state for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for an answer; `input` is the pending answer.
    Answering { input: String },
    /// The answer has been judged and the result is on screen.
    ShowingResult { input: String, judgement: Judgement },
    /// The last question was passed; the session accepts no more operations.
    Completed,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Answering { .. } => PhaseKind::Answering,
            Phase::ShowingResult { .. } => PhaseKind::ShowingResult,
            Phase::Completed => PhaseKind::Completed,
        }
    }
}

/// Payload-free view of [`Phase`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Answering,
    ShowingResult,
    Completed,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Answering => write!(f, "answering"),
            PhaseKind::ShowingResult => write!(f, "showing-result"),
            PhaseKind::Completed => write!(f, "completed"),
        }
    }
}

/// Position within the lesson set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the current question.
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64 * 100.0
        }
    }
}

/// Per-session tally reported when the last question is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct: u32,
    pub incorrect: u32,
    pub total_questions: usize,
}

impl SessionSummary {
    pub fn xp_earned(&self) -> u32 {
        self.correct * XP_PER_CORRECT
    }
}

/// Result of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this 0-based index.
    Next(usize),
    /// The session is over.
    Completed(SessionSummary),
}

/// One pass through a lesson set for one language.
#[derive(Debug, Clone)]
pub struct QuizSession {
    language: String,
    lesson_set: LessonSet,
    index: usize,
    phase: Phase,
    correct: u32,
    incorrect: u32,
}

impl QuizSession {
    /// Start a session at the first question.
    ///
    /// Lesson sets are non-empty by construction (the parser rejects empty
    /// ones), so the first question always exists.
    pub fn new(language: impl Into<String>, lesson_set: LessonSet) -> Self {
        Self {
            language: language.into(),
            lesson_set,
            index: 0,
            phase: Phase::Answering {
                input: String::new(),
            },
            correct: 0,
            incorrect: 0,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn lesson_set(&self) -> &LessonSet {
        &self.lesson_set
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// 0-based index of the current question. Always in bounds.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> &Question {
        &self.lesson_set.questions[self.index]
    }

    pub fn pending_input(&self) -> &str {
        match &self.phase {
            Phase::Answering { input } | Phase::ShowingResult { input, .. } => input,
            Phase::Completed => "",
        }
    }

    /// The verdict on the current question, once it has been submitted.
    pub fn last_judgement(&self) -> Option<&Judgement> {
        match &self.phase {
            Phase::ShowingResult { judgement, .. } => Some(judgement),
            _ => None,
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.lesson_set.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.index + 1,
            total: self.lesson_set.questions.len(),
        }
    }

    pub fn correct_so_far(&self) -> u32 {
        self.correct
    }

    pub fn incorrect_so_far(&self) -> u32 {
        self.incorrect
    }

    /// Pick one of the current multiple-choice options as the answer.
    pub fn select_option(&mut self, option: &str) -> Result<(), QuizError> {
        self.ensure_answering()?;
        let question = self.current_question();
        if question.kind != QuestionKind::MultipleChoice {
            return Err(QuizError::NotMultipleChoice);
        }
        if !question.options.iter().any(|o| o == option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }
        self.replace_input(option.to_string());
        Ok(())
    }

    /// Pick an option by its 0-based position in display order.
    pub fn select_option_index(&mut self, index: usize) -> Result<(), QuizError> {
        self.ensure_answering()?;
        let question = self.current_question();
        if question.kind != QuestionKind::MultipleChoice {
            return Err(QuizError::NotMultipleChoice);
        }
        let option = question
            .options
            .get(index)
            .cloned()
            .ok_or(QuizError::OptionOutOfRange {
                index,
                count: question.options.len(),
            })?;
        self.replace_input(option);
        Ok(())
    }

    /// Replace the pending free-text answer.
    pub fn set_input(&mut self, text: &str) -> Result<(), QuizError> {
        self.ensure_answering()?;
        self.replace_input(text.to_string());
        Ok(())
    }

    /// Judge the pending answer and report the outcome to `scores`.
    ///
    /// Only valid while answering. The sink sees exactly one outcome per
    /// question: once judged, further calls fail with `WrongPhase` until
    /// [`advance`](Self::advance).
    pub fn submit(&mut self, scores: &mut dyn ScoreSink) -> Result<Judgement, QuizError> {
        self.ensure_answering()?;
        let question = self.current_question();
        let input = self.pending_input().to_string();

        if input.is_empty() {
            return Err(QuizError::EmptyInput);
        }

        let judgement = Judgement {
            correct: question.is_correct(&input),
            given: input.clone(),
            expected: question.correct_answer.clone(),
        };

        if judgement.correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        tracing::debug!(
            language = %self.language,
            lesson_set = %self.lesson_set.id,
            question = self.index,
            correct = judgement.correct,
            "answer judged"
        );
        scores.record(&self.language, judgement.outcome());

        self.phase = Phase::ShowingResult {
            input,
            judgement: judgement.clone(),
        };
        Ok(judgement)
    }

    /// Leave the result screen: go to the next question, or complete the
    /// session after the last one. The index never moves past the end.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        match self.phase.kind() {
            PhaseKind::ShowingResult => {}
            PhaseKind::Completed => return Err(QuizError::SessionFinished),
            actual => {
                return Err(QuizError::WrongPhase {
                    expected: PhaseKind::ShowingResult,
                    actual,
                })
            }
        }

        if self.is_last_question() {
            self.phase = Phase::Completed;
            return Ok(Advance::Completed(SessionSummary {
                correct: self.correct,
                incorrect: self.incorrect,
                total_questions: self.lesson_set.questions.len(),
            }));
        }

        self.index += 1;
        self.phase = Phase::Answering {
            input: String::new(),
        };
        Ok(Advance::Next(self.index))
    }

    fn ensure_answering(&self) -> Result<(), QuizError> {
        match self.phase.kind() {
            PhaseKind::Answering => Ok(()),
            PhaseKind::Completed => Err(QuizError::SessionFinished),
            actual => Err(QuizError::WrongPhase {
                expected: PhaseKind::Answering,
                actual,
            }),
        }
    }

    fn replace_input(&mut self, text: String) {
        if let Phase::Answering { input } = &mut self.phase {
            *input = text;
        }
    }
}
