//! The `triolingo scores` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use triolingo_core::model::ScoreEntry;

use crate::context::Context;

pub fn execute(ctx: &Context, language: Option<&str>) -> Result<()> {
    let store = ctx.open_scores()?;

    let rows: Vec<(String, ScoreEntry)> = match language {
        Some(code) => vec![(code.to_string(), store.get_score(code))],
        None => store
            .scores()
            .map(|(code, entry)| (code.to_string(), entry))
            .collect(),
    };

    if rows.is_empty() {
        println!("No scores yet. Start a quiz with: triolingo quiz <language> <lesson-set>");
        return Ok(());
    }

    println!("{}", score_table(&rows));
    Ok(())
}

fn score_table(rows: &[(String, ScoreEntry)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Language", "Correct", "Incorrect", "Total", "Accuracy"]);

    for (code, entry) in rows {
        let accuracy = entry
            .accuracy()
            .map(|a| format!("{:.1}%", a * 100.0))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(code),
            Cell::new(entry.correct),
            Cell::new(entry.incorrect),
            Cell::new(entry.total()),
            Cell::new(accuracy),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_language() {
        let rows = vec![
            ("es".to_string(), ScoreEntry { correct: 3, incorrect: 1 }),
            ("fr".to_string(), ScoreEntry::default()),
        ];
        let rendered = score_table(&rows).to_string();
        assert!(rendered.contains("Accuracy"));
        assert!(rendered.contains("75.0%"));
        assert!(rendered.contains("fr"));
        assert!(rendered.contains('-'));
    }
}
