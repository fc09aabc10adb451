//! The `triolingo init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    for (path, contents) in [
        ("triolingo.toml", SAMPLE_CONFIG),
        ("public/languages.json", SAMPLE_LANGUAGES),
        ("public/es/lessons.json", SAMPLE_LESSON_INDEX),
        ("public/es/basics.json", SAMPLE_LESSON_SET),
    ] {
        write_if_missing(Path::new(path), contents)?;
    }

    println!("\nNext steps:");
    println!("  1. Run: triolingo validate");
    println!("  2. Run: triolingo lessons es");
    println!("  3. Run: triolingo quiz es basics");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# triolingo configuration

# Scores default to $XDG_DATA_HOME/triolingo/languageScores.json.
# scores_path = "./languageScores.json"

[source]
type = "dir"
path = "./public"

# Or serve the same layout over HTTP:
# [source]
# type = "http"
# base_url = "https://example.com/lessons"
# timeout_secs = 30
"#;

const SAMPLE_LANGUAGES: &str = r#"[
  { "code": "es", "name": "Spanish", "flag": "🇪🇸" }
]
"#;

const SAMPLE_LESSON_INDEX: &str = r#"[
  { "id": "basics", "title": "Basics 1" }
]
"#;

const SAMPLE_LESSON_SET: &str = r#"{
  "lessons": [
    {
      "question": "What does '[Hola](hello)' mean in English?",
      "options": ["Hello", "Goodbye", "Thank you", "Please"],
      "correct": "Hello",
      "type": "multiple-choice"
    },
    {
      "question": "Choose the correct translation for 'cat':",
      "options": ["perro", "gato", "casa", "agua"],
      "correct": "gato",
      "type": "multiple-choice"
    },
    {
      "question": "Complete: '[Me llamo](my name is) ___'",
      "correct": "Maria",
      "type": "fill-blank"
    }
  ]
}
"#;
