//! Query normalization.

/// A normalized search query.
///
/// The text is trimmed and lowercased; the terms are its whitespace-separated
/// tokens in order, duplicates kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    terms: Vec<String>,
}

impl Query {
    /// Normalizes raw input from a search box or the `keyword` parameter.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let terms = text.split_whitespace().map(str::to_string).collect();
        Self { text, terms }
    }

    /// The normalized query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The query terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns true if the query has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits() {
        let query = Query::parse("  Rust  ASYNC\tguide\n");
        assert_eq!(query.text(), "rust  async\tguide");
        assert_eq!(query.terms(), ["rust", "async", "guide"]);
    }

    #[test]
    fn keeps_duplicate_terms() {
        let query = Query::parse("go go");
        assert_eq!(query.terms(), ["go", "go"]);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(Query::parse("   ").is_empty());
        assert!(Query::parse("").is_empty());
    }
}
