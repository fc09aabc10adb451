//! Per-invocation state shared by the commands.

use std::path::PathBuf;

use anyhow::Result;

use triolingo_core::catalog::Catalog;
use triolingo_core::score::{JsonFileStorage, ScoreStore};
use triolingo_sources::config::{load_config_from, SourceConfig, TriolingoConfig};
use triolingo_sources::create_source;

pub struct Context {
    pub catalog: Catalog,
    pub config: TriolingoConfig,
}

impl Context {
    /// Load the config, apply command-line overrides and build the source.
    pub fn load(
        config_path: Option<PathBuf>,
        content: Option<PathBuf>,
        scores: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = load_config_from(config_path.as_deref())?;
        if let Some(path) = content {
            config.source = SourceConfig::Dir { path };
        }
        if let Some(path) = scores {
            config.scores_path = Some(path);
        }

        let catalog = Catalog::new(create_source(&config.source)?);
        tracing::debug!(source = catalog.source_name(), "catalog ready");
        Ok(Self { catalog, config })
    }

    /// Open the score store at the configured or per-user location.
    pub fn open_scores(&self) -> Result<ScoreStore> {
        let path = self.config.resolved_scores_path()?;
        Ok(ScoreStore::open(Box::new(JsonFileStorage::new(path))))
    }
}
