//! Configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use triolingo_core::score::JsonFileStorage;
use triolingo_core::traits::LessonSource;

use crate::dir::DirSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};

/// Name of the project-local config file.
pub const CONFIG_FILE: &str = "triolingo.toml";

/// Where lesson documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Dir {
        #[serde(default = "default_content_dir")]
        path: PathBuf,
    },
    Http {
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Dir {
            path: default_content_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./public")
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level triolingo configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriolingoConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Score file; defaults to the per-user data directory.
    #[serde(default)]
    pub scores_path: Option<PathBuf>,
}

impl TriolingoConfig {
    /// The score file to use, falling back to [`JsonFileStorage::default_path`].
    pub fn resolved_scores_path(&self) -> Result<PathBuf> {
        match &self.scores_path {
            Some(path) => Ok(path.clone()),
            None => JsonFileStorage::default_path()
                .context("cannot determine a score file location; set scores_path or TRIOLINGO_SCORES"),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `triolingo.toml` in the current directory
/// 2. `~/.config/triolingo/config.toml`
///
/// Environment variable overrides: `TRIOLINGO_CONTENT_DIR`,
/// `TRIOLINGO_BASE_URL`, `TRIOLINGO_SCORES`.
pub fn load_config() -> Result<TriolingoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriolingoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriolingoConfig::default(),
    };

    Ok(apply_env_overrides(config, |name| std::env::var(name).ok()))
}

/// Parse a config document and resolve `${VAR}` references in it.
pub fn parse_config(content: &str) -> Result<TriolingoConfig> {
    let mut config: TriolingoConfig = toml::from_str(content)?;

    config.source = match config.source {
        SourceConfig::Dir { path } => SourceConfig::Dir {
            path: resolve_path(&path),
        },
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => SourceConfig::Http {
            base_url: resolve_env_vars(&base_url),
            timeout_secs,
        },
    };
    config.scores_path = config.scores_path.as_deref().map(resolve_path);

    Ok(config)
}

/// Apply `TRIOLINGO_*` overrides. A base URL wins over a content directory.
fn apply_env_overrides(
    mut config: TriolingoConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> TriolingoConfig {
    if let Some(dir) = lookup("TRIOLINGO_CONTENT_DIR") {
        config.source = SourceConfig::Dir {
            path: PathBuf::from(dir),
        };
    }
    if let Some(base_url) = lookup("TRIOLINGO_BASE_URL") {
        config.source = SourceConfig::Http {
            base_url,
            timeout_secs: default_timeout(),
        };
    }
    if let Some(scores) = lookup("TRIOLINGO_SCORES") {
        config.scores_path = Some(PathBuf::from(scores));
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("triolingo"))
}

/// Create a lesson source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn LessonSource>> {
    match config {
        SourceConfig::Dir { path } => Ok(Arc::new(DirSource::new(path))),
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => Ok(Arc::new(HttpSource::with_timeout(base_url, *timeout_secs)?)),
    }
}
