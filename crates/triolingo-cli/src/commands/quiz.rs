//! The `triolingo quiz` command: the interactive quiz view.

use std::io::{BufRead, Write};

use anyhow::Result;

use triolingo_core::error::QuizError;
use triolingo_core::glossary;
use triolingo_core::model::QuestionKind;
use triolingo_core::quiz::{Advance, Judgement, QuizSession, SessionSummary, XP_PER_CORRECT};
use triolingo_core::route::Route;
use triolingo_core::score::ScoreStore;

use crate::context::Context;
use crate::view;

/// Typed at the answer prompt to leave the quiz.
const QUIT: &str = ":q";

/// How an interactive quiz ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizExit {
    Completed(SessionSummary),
    /// The user typed `:q` or input ended.
    Left,
}

pub async fn execute(ctx: &Context, language: &str, lesson_set: &str) -> Result<()> {
    let route = Route::Quiz {
        language: language.to_string(),
        lesson_set: lesson_set.to_string(),
    };
    let launch = match ctx.catalog.open_quiz(language, lesson_set).await {
        Ok(launch) => launch,
        Err(e) => return view::load_error(&mut std::io::stdout().lock(), &route, e),
    };

    let mut scores = ctx.open_scores()?;
    let mut session = launch.start();
    let exit = run(
        &mut session,
        &mut scores,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )?;
    tracing::debug!(?exit, "quiz ended");
    Ok(())
}

/// Drive a session from line-oriented input until it completes or the user
/// leaves. Every judged answer is recorded in `scores`.
pub fn run(
    session: &mut QuizSession,
    scores: &mut ScoreStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<QuizExit> {
    let back = Route::LessonSets {
        language: session.language().to_string(),
    };

    loop {
        show_question(session, scores, out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                return Ok(QuizExit::Left);
            };

            let trimmed = line.trim();
            if trimmed == QUIT {
                writeln!(out, "Back to: {back}")?;
                return Ok(QuizExit::Left);
            }
            if line.is_empty() {
                writeln!(out, "Type an answer first.")?;
                continue;
            }

            if let Err(message) = take_answer(session, &line) {
                writeln!(out, "{message}")?;
                continue;
            }

            match session.submit(scores) {
                Ok(judgement) => {
                    show_judgement(&judgement, out)?;
                    break;
                }
                Err(QuizError::EmptyInput) => writeln!(out, "Type an answer first.")?,
                Err(e) => return Err(e.into()),
            }
        }

        writeln!(out, "Press Enter to continue.")?;
        if read_line(input)?.is_none() {
            return Ok(QuizExit::Left);
        }

        match session.advance()? {
            Advance::Next(_) => {}
            Advance::Completed(summary) => {
                writeln!(
                    out,
                    "\n🎉 Lesson complete! {} of {} correct. +{} XP earned!",
                    summary.correct,
                    summary.total_questions,
                    summary.xp_earned()
                )?;
                writeln!(out, "Back to: {back}")?;
                return Ok(QuizExit::Completed(summary));
            }
        }
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn show_question(session: &QuizSession, scores: &ScoreStore, out: &mut impl Write) -> Result<()> {
    let question = session.current_question();
    let progress = session.progress();
    let segments = glossary::parse_prompt(&question.prompt);

    writeln!(out)?;
    view::header(out, scores.get_score(session.language()))?;
    writeln!(
        out,
        "{} · Question {} of {}",
        session.lesson_set().title,
        progress.current,
        progress.total
    )?;
    writeln!(out, "\n{}", glossary::plain_text(&segments))?;
    for (word, definition) in glossary::glossary(&segments) {
        writeln!(out, "  * {word}: {definition}")?;
    }

    match question.kind {
        QuestionKind::MultipleChoice => {
            writeln!(out)?;
            for (i, option) in question.options.iter().enumerate() {
                writeln!(out, "  {}) {option}", i + 1)?;
            }
            writeln!(out, "\nType the number of your answer, or {QUIT} to leave.")?;
        }
        QuestionKind::FillBlank => {
            writeln!(out, "\nType your answer, or {QUIT} to leave.")?;
        }
    }
    Ok(())
}

/// Set the pending answer from one line of input. Multiple-choice input may
/// be an option's text or its 1-based number.
fn take_answer(session: &mut QuizSession, line: &str) -> Result<(), String> {
    let question = session.current_question();
    match question.kind {
        QuestionKind::FillBlank => session.set_input(line).map_err(|e| e.to_string()),
        QuestionKind::MultipleChoice => {
            let text = line.trim();
            let count = question.options.len();
            let by_text = question
                .options
                .iter()
                .find(|o| o.to_lowercase() == text.to_lowercase())
                .cloned();

            let result = match (by_text, text.parse::<usize>()) {
                (Some(option), _) => session.select_option(&option),
                (None, Ok(number)) if number >= 1 => session.select_option_index(number - 1),
                _ => Err(QuizError::UnknownOption(text.to_string())),
            };
            result.map_err(|_| format!("Choose an option from 1 to {count}."))
        }
    }
}

fn show_judgement(judgement: &Judgement, out: &mut impl Write) -> Result<()> {
    if judgement.correct {
        writeln!(out, "✓ Correct! +{XP_PER_CORRECT} XP")?;
    } else {
        writeln!(out, "✗ Incorrect. The correct answer was: {}", judgement.expected)?;
    }
    Ok(())
}
