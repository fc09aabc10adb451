//! triolingo-sources — lesson repository backends.
//!
//! Implements the `LessonSource` trait for local directories and static
//! HTTP hosts, and loads the `triolingo.toml` configuration that picks one.

pub mod config;
pub mod dir;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, load_config_from, SourceConfig, TriolingoConfig};
pub use dir::DirSource;
pub use http::HttpSource;
pub use mock::MockSource;

use triolingo_core::error::LoadError;
use triolingo_core::route::is_valid_segment;

/// Reject repository paths that could escape the repository root.
pub(crate) fn check_relative_path(path: &str) -> Result<(), LoadError> {
    if path.split('/').all(is_valid_segment) {
        Ok(())
    } else {
        Err(LoadError::Fetch {
            resource: path.to_string(),
            message: "invalid repository path".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_checks() {
        assert!(check_relative_path("languages.json").is_ok());
        assert!(check_relative_path("es/basics.json").is_ok());
        assert!(check_relative_path("../secret").is_err());
        assert!(check_relative_path("/etc/passwd").is_err());
        assert!(check_relative_path("es//x.json").is_err());
    }
}
