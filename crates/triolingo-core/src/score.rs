//! Per-language score tallies with pluggable persistence.
//!
//! The store is created once at startup and passed by reference to whatever
//! needs it. After every mutation the complete mapping is written through
//! the [`ScoreStorage`] port as one JSON record; a record that fails to
//! parse on startup is discarded and the store starts empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::model::ScoreEntry;

/// Name of the persisted score record.
pub const SCORE_RECORD_NAME: &str = "languageScores";

/// Result of judging one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Receives one outcome per judged answer.
pub trait ScoreSink {
    fn record(&mut self, language: &str, outcome: Outcome);
}

/// Durable storage for the serialized score mapping.
pub trait ScoreStorage: Send {
    /// Read the stored record, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored record.
    fn save(&self, contents: &str) -> Result<()>;

    /// Remove the stored record.
    fn clear(&self) -> Result<()>;
}

/// Stores the record as a JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/triolingo/languageScores.json`, falling back to
    /// `$HOME/.local/share/triolingo/languageScores.json`.
    pub fn default_path() -> Option<PathBuf> {
        let data_home = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME")
                    .map(|home| PathBuf::from(home).join(".local").join("share"))
            })?;
        Some(
            data_home
                .join("triolingo")
                .join(format!("{SCORE_RECORD_NAME}.json")),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read scores from {}", self.path.display())),
        }
    }

    fn save(&self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        std::io::Write::write_all(&mut tmp, contents.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to write scores to {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

/// In-memory storage. Clones share the same buffer, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn with_contents(contents: &str) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(contents.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.record.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ScoreStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<()> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Language code → running tally, persisted after every change.
pub struct ScoreStore {
    scores: BTreeMap<String, ScoreEntry>,
    storage: Box<dyn ScoreStorage>,
}

impl ScoreStore {
    /// Load the persisted mapping, starting empty if there is none or if it
    /// cannot be read or parsed.
    pub fn open(storage: Box<dyn ScoreStorage>) -> Self {
        let scores = match storage.load() {
            Ok(Some(content)) => match serde_json::from_str(&content) {
                Ok(scores) => scores,
                Err(e) => {
                    tracing::warn!("failed to parse stored scores, starting fresh: {e}");
                    if let Err(e) = storage.clear() {
                        tracing::warn!("failed to clear corrupted scores: {e:#}");
                    }
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("failed to load stored scores, starting fresh: {e:#}");
                BTreeMap::new()
            }
        };

        Self { scores, storage }
    }

    pub fn record_correct(&mut self, language: &str) -> ScoreEntry {
        self.bump(language, Outcome::Correct)
    }

    pub fn record_incorrect(&mut self, language: &str) -> ScoreEntry {
        self.bump(language, Outcome::Incorrect)
    }

    /// The tally for a language; `{0, 0}` if it has never been scored.
    pub fn get_score(&self, language: &str) -> ScoreEntry {
        self.scores.get(language).copied().unwrap_or_default()
    }

    /// All tallies in language-code order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, ScoreEntry)> {
        self.scores.iter().map(|(code, entry)| (code.as_str(), *entry))
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn bump(&mut self, language: &str, outcome: Outcome) -> ScoreEntry {
        let entry = self.scores.entry(language.to_string()).or_default();
        match outcome {
            Outcome::Correct => entry.correct = entry.correct.saturating_add(1),
            Outcome::Incorrect => entry.incorrect = entry.incorrect.saturating_add(1),
        }
        let updated = *entry;
        self.persist();
        updated
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.scores)
            .context("failed to serialize scores")
            .and_then(|json| self.storage.save(&json));
        if let Err(e) = result {
            tracing::error!("failed to persist scores: {e:#}");
        }
    }
}

impl ScoreSink for ScoreStore {
    fn record(&mut self, language: &str, outcome: Outcome) {
        self.bump(language, outcome);
    }
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(correct: u64, incorrect: u64) -> ScoreEntry {
        ScoreEntry { correct, incorrect }
    }

    #[test]
    fn unknown_language_scores_zero() {
        let store = ScoreStore::open(Box::new(MemoryStorage::default()));
        assert_eq!(store.get_score("xx"), entry(0, 0));
        assert!(store.is_empty());
    }

    #[test]
    fn record_correct_then_incorrect() {
        let mut store = ScoreStore::open(Box::new(MemoryStorage::default()));
        assert_eq!(store.record_correct("fr"), entry(1, 0));
        assert_eq!(store.record_incorrect("fr"), entry(1, 1));
        assert_eq!(store.get_score("fr"), entry(1, 1));
        assert_eq!(store.get_score("es"), entry(0, 0));
    }

    #[test]
    fn every_mutation_rewrites_the_record() {
        let storage = MemoryStorage::default();
        let mut store = ScoreStore::open(Box::new(storage.clone()));

        store.record_correct("es");
        assert_eq!(
            storage.contents().as_deref(),
            Some(r#"{"es":{"correct":1,"incorrect":0}}"#)
        );

        store.record("de", Outcome::Incorrect);
        assert_eq!(
            storage.contents().as_deref(),
            Some(r#"{"de":{"correct":0,"incorrect":1},"es":{"correct":1,"incorrect":0}}"#)
        );
    }

    #[test]
    fn reload_yields_identical_mapping() {
        let storage = MemoryStorage::default();
        let mut store = ScoreStore::open(Box::new(storage.clone()));
        for _ in 0..7 {
            store.record_correct("es");
        }
        for _ in 0..3 {
            store.record_incorrect("ja");
        }
        store.record_incorrect("es");

        let reloaded = ScoreStore::open(Box::new(storage));
        let before: Vec<_> = store.scores().collect();
        let after: Vec<_> = reloaded.scores().collect();
        assert_eq!(before, after);
        assert_eq!(reloaded.get_score("es"), entry(7, 1));
    }

    #[test]
    fn loads_existing_record() {
        let storage =
            MemoryStorage::with_contents(r#"{"it":{"correct":12,"incorrect":4}}"#);
        let store = ScoreStore::open(Box::new(storage));
        assert_eq!(store.get_score("it"), entry(12, 4));
    }

    #[test]
    fn malformed_record_starts_empty_and_is_cleared() {
        for bad in [
            r#"{"es":{"correct":1,"#,
            "not json at all",
            r#"{"es":{"correct":-1,"incorrect":0}}"#,
            r#"{"es":{"correct":1.5,"incorrect":0}}"#,
            r#"["es"]"#,
        ] {
            let storage = MemoryStorage::with_contents(bad);
            let store = ScoreStore::open(Box::new(storage.clone()));
            assert!(store.is_empty(), "{bad}");
            assert_eq!(storage.contents(), None, "{bad}");
        }
    }

    #[test]
    fn counts_saturate_at_the_maximum() {
        let storage = MemoryStorage::with_contents(&format!(
            r#"{{"es":{{"correct":{max},"incorrect":{max}}}}}"#,
            max = u64::MAX
        ));
        let mut store = ScoreStore::open(Box::new(storage));
        assert_eq!(store.record_correct("es"), entry(u64::MAX, u64::MAX));
        assert_eq!(store.record_incorrect("es"), entry(u64::MAX, u64::MAX));
        assert_eq!(store.get_score("es").total(), u64::MAX);
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = ScoreStore::open(Box::new(JsonFileStorage::new(&path)));
        store.record_correct("es");
        store.record_incorrect("es");
        store.record_correct("fr");
        assert!(path.exists());

        let reloaded = ScoreStore::open(Box::new(JsonFileStorage::new(&path)));
        assert_eq!(reloaded.get_score("es"), entry(1, 1));
        assert_eq!(reloaded.get_score("fr"), entry(1, 0));
    }

    #[test]
    fn file_storage_truncated_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"es":{"corr"#).unwrap();

        let store = ScoreStore::open(Box::new(JsonFileStorage::new(&path)));
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.load().unwrap(), None);
        storage.clear().unwrap();
    }
}
