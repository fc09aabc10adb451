//! The `triolingo validate` command.

use anyhow::{Context as _, Result};
use futures::future::join_all;

use triolingo_core::error::LoadError;
use triolingo_core::model::{Language, LessonSet, LessonSetMeta};
use triolingo_core::parser::{self, ValidationWarning};
use triolingo_core::traits::LessonSource;

use crate::context::Context;

/// Outcome of loading one lesson set.
struct Checked {
    meta: LessonSetMeta,
    result: Result<(LessonSet, Vec<ValidationWarning>), LoadError>,
}

pub async fn execute(ctx: &Context) -> Result<()> {
    let source = ctx.catalog.source();
    println!("Source: {}", ctx.catalog.source_name());

    let languages = source
        .languages()
        .await
        .context("failed to load the language list")?;

    let mut total_warnings = 0;
    let mut failures = 0;

    for w in parser::validate_languages(&languages) {
        println!("  WARNING: {}", w.message);
        total_warnings += 1;
    }

    let indexes = join_all(languages.iter().map(|l| source.lesson_sets(&l.code))).await;

    for (language, index) in languages.iter().zip(indexes) {
        let sets = match index {
            Ok(sets) => sets,
            Err(LoadError::NotFound(resource)) => {
                println!("Language: {} ({}), no lesson index", language.name, language.code);
                println!("  WARNING: {resource} not found");
                total_warnings += 1;
                continue;
            }
            Err(e) => {
                println!("Language: {} ({})", language.name, language.code);
                println!("  ERROR: {e}");
                failures += 1;
                continue;
            }
        };

        println!(
            "Language: {} ({}), {} lesson set(s)",
            language.name,
            language.code,
            sets.len()
        );
        for w in parser::validate_lesson_index(&sets) {
            println!("  WARNING: {}", w.message);
            total_warnings += 1;
        }

        let checked = join_all(sets.into_iter().map(|meta| check(source, language, meta))).await;
        for Checked { meta, result } in checked {
            let prefix = format!("  [{}/{}]", language.code, meta.id);
            match result {
                Ok((set, warnings)) => {
                    println!("{prefix} {} ({} questions)", set.title, set.len());
                    for w in &warnings {
                        let question = w
                            .question
                            .map(|n| format!(" question {n}"))
                            .unwrap_or_default();
                        println!("{prefix}{question} WARNING: {}", w.message);
                    }
                    total_warnings += warnings.len();
                }
                Err(e) => {
                    println!("{prefix} ERROR: {e}");
                    failures += 1;
                }
            }
        }
    }

    if total_warnings == 0 && failures == 0 {
        println!("All lesson sets valid.");
    } else if total_warnings > 0 {
        println!("\n{total_warnings} warning(s) found.");
    }

    if failures > 0 {
        anyhow::bail!("{failures} document(s) failed to load");
    }
    Ok(())
}

async fn check(source: &dyn LessonSource, language: &Language, meta: LessonSetMeta) -> Checked {
    let path = parser::lesson_set_path(&language.code, &meta.id);
    let result = match source.fetch(&path).await {
        Ok(raw) => parser::parse_lesson_set(&language.code, &meta, &raw).map(|set| {
            let warnings = parser::validate_lesson_set(&set, Some(&raw));
            (set, warnings)
        }),
        Err(e) => Err(e),
    };
    Checked { meta, result }
}
