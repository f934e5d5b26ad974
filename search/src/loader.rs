//! Loads the article index.
//!
//! [`IndexSource`] fetches the raw body; [`load_index`] turns any failure
//! into an empty index so a broken index only ever means "no results".

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::SearchIndex;

/// Errors raised while fetching or parsing the index.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The index file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The request failed before a response arrived.
    #[error("request failed: {0}")]
    Transport(String),
    /// The body is not a JSON array.
    #[error("malformed index: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the index body can be fetched from.
#[allow(async_fn_in_trait)]
pub trait IndexSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Fetches the raw index body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be retrieved.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Fetches and parses the index, logging and swallowing every failure.
pub async fn load_index<S: IndexSource>(source: &S) -> SearchIndex {
    let location = source.describe();
    tracing::info!(%location, "loading search index");
    let parsed = match source.fetch().await {
        Ok(body) => SearchIndex::from_json(&body).map_err(LoadError::from),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(index) => {
            tracing::info!(articles = index.len(), "search index loaded");
            index
        }
        Err(e) => {
            tracing::error!(%location, "failed to load search index: {e}");
            SearchIndex::empty()
        }
    }
}

/// An index body held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl IndexSource for StaticSource {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.0.clone())
    }
}

/// An `index.json` on the local filesystem, e.g. in a built site's output.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Reads from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IndexSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// An index served over HTTP.
///
/// The request blocks the calling thread; there is no timeout and no retry.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpSource {
    /// Fetches from `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl IndexSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let mut response = ureq::get(&self.url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => LoadError::Status(status),
            other => LoadError::Transport(other.to_string()),
        })?;
        tracing::debug!(status = response.status().as_u16(), "index response");
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| LoadError::Transport(e.to_string()))
    }
}
