//! Engine configuration.
//!
//! Every field has a default matching the stock site setup, so an empty
//! TOML file (or no file at all) is a valid configuration:
//!
//! ```toml
//! index_path = "/index.json"
//! results_path = "/search/"
//! debounce_ms = 300
//! max_results = 20
//! date_style = "japanese"
//!
//! [messages]
//! title_template = "%d results"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates::DateStyle;
use crate::snippet::Window;

/// Built-in results-count label; `%d` is the count.
pub const DEFAULT_TITLE_TEMPLATE: &str = "%d件の検索結果";
/// Built-in no-results line; `%s` is the escaped query.
pub const DEFAULT_NO_RESULTS: &str = "「%s」に一致する記事が見つかりませんでした。";

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The TOML did not match the configuration schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    /// The JSON did not match the configuration schema.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric setting must be positive.
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}

/// Search engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Site path of the article index.
    pub index_path: String,
    /// Site path of the dedicated results page.
    pub results_path: String,
    /// URL parameter carrying the active query.
    pub keyword_param: String,
    /// Input idle time before a keystroke search runs.
    pub debounce_ms: u64,
    /// Maximum number of results rendered.
    pub max_results: usize,
    /// Snippet length in characters.
    pub snippet_length: usize,
    /// Distance between candidate snippet windows.
    pub snippet_step: usize,
    /// Category badges shown per result.
    pub max_categories: usize,
    /// Tag badges shown per result.
    pub max_tags: usize,
    /// Date presentation on result cards.
    pub date_style: DateStyle,
    /// User-facing copy.
    pub messages: Messages,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: "/index.json".to_string(),
            results_path: "/search/".to_string(),
            keyword_param: "keyword".to_string(),
            debounce_ms: 300,
            max_results: 20,
            snippet_length: 150,
            snippet_step: 50,
            max_categories: 2,
            max_tags: 5,
            date_style: DateStyle::default(),
            messages: Messages::default(),
        }
    }
}

/// Result-list copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Results-count label, `%d` replaced by the count. When unset the
    /// page-level template or [`DEFAULT_TITLE_TEMPLATE`] is used.
    pub title_template: Option<String>,
    /// No-results line, `%s` replaced by the escaped query.
    pub no_results: String,
    /// Guidance bullets shown under the no-results line.
    pub hints: Vec<String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            title_template: None,
            no_results: DEFAULT_NO_RESULTS.to_string(),
            hints: vec![
                "キーワードを変更して再度検索してみてください".to_string(),
                "より一般的な単語を使用してみてください".to_string(),
                "スペースで区切って複数のキーワードで検索してみてください".to_string(),
            ],
        }
    }
}

impl SearchConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a setting is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a setting is out of range.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that sizes and limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] naming the first zero setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Zero("max_results"));
        }
        if self.snippet_length == 0 {
            return Err(ConfigError::Zero("snippet_length"));
        }
        if self.snippet_step == 0 {
            return Err(ConfigError::Zero("snippet_step"));
        }
        Ok(())
    }

    /// Quiet period for keystroke searches.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Snippet window geometry.
    pub fn window(&self) -> Window {
        Window {
            length: self.snippet_length,
            step: self.snippet_step,
        }
    }
}
