//! Text rendering for the three navigation views.

use std::io::Write;

use anyhow::Result;

use triolingo_core::error::LoadError;
use triolingo_core::model::{Language, LessonSetMeta, ScoreEntry};
use triolingo_core::route::Route;
use triolingo_core::score::ScoreStore;

/// Presentational counters shown in the quiz header. Nothing changes them.
pub const STREAK: u32 = 3;
pub const HEARTS: u32 = 5;

pub fn header(out: &mut impl Write, score: ScoreEntry) -> Result<()> {
    writeln!(out, "🔥 {STREAK}   ❤️ {HEARTS}   ⭐ {}", score.correct)?;
    Ok(())
}

pub fn languages(out: &mut impl Write, languages: &[Language], scores: &ScoreStore) -> Result<()> {
    writeln!(out, "Choose a language:")?;
    if languages.is_empty() {
        writeln!(out, "  (no languages available)")?;
        return Ok(());
    }
    for language in languages {
        let score = scores.get_score(&language.code);
        writeln!(
            out,
            "  {} {} ({})  ✓ {}  ✗ {}",
            language.flag, language.name, language.code, score.correct, score.incorrect
        )?;
    }
    writeln!(out, "\nNext: triolingo lessons <code>")?;
    Ok(())
}

pub fn lesson_sets(out: &mut impl Write, language: &Language, sets: &[LessonSetMeta]) -> Result<()> {
    writeln!(out, "{} {} lesson sets:", language.flag, language.name)?;
    if sets.is_empty() {
        writeln!(out, "  No lesson sets found for {}.", language.name)?;
    } else {
        let width = sets.iter().map(|s| s.id.len()).max().unwrap_or(0);
        for set in sets {
            writeln!(out, "  {:<width$}  {}", set.id, set.title)?;
        }
        writeln!(out, "\nNext: triolingo quiz {} <lesson-set>", language.code)?;
    }
    writeln!(out, "Back to: {}", Route::Languages)?;
    Ok(())
}

/// The "cannot proceed" view for a route that failed to load.
///
/// A missing language or lesson set is a normal outcome and returns `Ok`;
/// a broken repository is returned as an error so the process exits 1.
pub fn load_error(out: &mut impl Write, route: &Route, err: LoadError) -> Result<()> {
    let back = route.parent();
    if err.is_missing_reference() {
        writeln!(out, "Cannot open {route}: {err}.")?;
        writeln!(out, "Back to: {back}")?;
        return Ok(());
    }

    tracing::debug!("load of {route} failed: {err}");
    writeln!(out, "Cannot open {route}: the lesson data could not be loaded.")?;
    writeln!(out, "Back to: {back}")?;
    Err(anyhow::Error::new(err).context(format!("failed to load {route}")))
}
