//! Shared plumbing for the site search binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use site_search::{FileSource, HttpSource, IndexSource, LoadError, SearchConfig};
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads `--config` if given, else the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => SearchConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SearchConfig::default()),
    }
}

/// An `--index` argument: a local file or an `http(s)://` URL.
#[derive(Debug, Clone)]
pub enum IndexArg {
    /// Local `index.json`.
    File(FileSource),
    /// Remote `index.json`.
    Http(HttpSource),
}

impl IndexArg {
    /// Interprets a command-line value.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Http(HttpSource::new(value))
        } else {
            Self::File(FileSource::new(PathBuf::from(value)))
        }
    }
}

impl IndexSource for IndexArg {
    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Http(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        match self {
            Self::File(source) => source.fetch().await,
            Self::Http(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_http_sources() {
        assert!(matches!(IndexArg::parse("https://example.com/index.json"), IndexArg::Http(_)));
        assert!(matches!(IndexArg::parse("http://localhost:1313/index.json"), IndexArg::Http(_)));
        assert!(matches!(IndexArg::parse("public/index.json"), IndexArg::File(_)));
    }

    #[test]
    fn missing_config_is_default() {
        assert_eq!(load_config(None).unwrap(), SearchConfig::default());
    }

    #[test]
    fn bad_config_names_the_file() {
        let err = load_config(Some(Path::new("/nonexistent/search.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/search.toml"));
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.toml");
        std::fs::write(&path, "max_results = 3\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_results, 3);
    }
}
