//! Data model types for the article index and scored results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single article in the site's search index.
///
/// Every field is lenient on input: a missing or `null` string becomes the
/// empty string and a missing or `null` list becomes an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// Full plain-text body, used for scoring and snippets.
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
    /// Link to the article page.
    #[serde(default, deserialize_with = "nullable")]
    pub permalink: String,
    /// Publication date as an ISO date or date-time string.
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    /// Tags, in site order.
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    /// Categories, in site order.
    #[serde(default, deserialize_with = "nullable")]
    pub categories: Vec<String>,
}

/// Treats an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The in-memory article index, loaded once per page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    articles: Vec<Article>,
}

impl SearchIndex {
    /// Creates an index over the given articles.
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// The index used when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the JSON array served at `/index.json`.
    ///
    /// Entries that are not valid articles are skipped with a warning; only a
    /// body that is not a JSON array at all is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not valid JSON or not an array.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<Value> = serde_json::from_str(body)?;
        let mut articles = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Article>(entry) {
                Ok(article) => articles.push(article),
                Err(e) => tracing::warn!(position, "skipping malformed index entry: {e}"),
            }
        }
        Ok(Self { articles })
    }

    /// The articles, in index order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Number of articles in the index.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the index holds no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// An article together with its relevance score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult<'a> {
    /// The matched article, borrowed from the index.
    pub article: &'a Article,
    /// Additive relevance weight; always positive for returned results.
    pub score: f64,
}
