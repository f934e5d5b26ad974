//! Weighted substring scoring and ranking.
//!
//! Each term contributes independently to an article's score:
//!
//! | Field      | Contribution                                   |
//! |------------|------------------------------------------------|
//! | title      | 10 if the title starts with the term, else 5   |
//! | tags       | 3 if any tag contains the term                 |
//! | categories | 3 if any category contains the term            |
//! | content    | 0.5 per occurrence, capped at 3                |
//!
//! All matching is on lowercased text. Terms are literal substrings.

use crate::model::{Article, ScoredResult, SearchIndex};
use crate::query::Query;

/// Title contribution when the title starts with the term.
pub const TITLE_LEADING: f64 = 10.0;
/// Title contribution when the term occurs later in the title.
pub const TITLE_INNER: f64 = 5.0;
/// Tag list contribution.
pub const TAG_MATCH: f64 = 3.0;
/// Category list contribution.
pub const CATEGORY_MATCH: f64 = 3.0;
/// Content contribution per occurrence.
pub const CONTENT_PER_MATCH: f64 = 0.5;
/// Upper bound on the content contribution of a single term.
pub const CONTENT_CAP: f64 = 3.0;

/// Scores every article, drops non-matches, and returns the best `limit`
/// results in descending score order.
///
/// The sort is stable: articles with equal scores keep their index order.
pub fn perform_search<'a>(
    index: &'a SearchIndex,
    query: &Query,
    limit: usize,
) -> Vec<ScoredResult<'a>> {
    let mut results: Vec<ScoredResult<'a>> = index
        .articles()
        .iter()
        .map(|article| ScoredResult {
            article,
            score: score_article(article, query.terms()),
        })
        .filter(|result| result.score > 0.0)
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);

    tracing::debug!(query = query.text(), hits = results.len(), "search executed");
    results
}

/// Computes the additive relevance score of one article.
pub fn score_article(article: &Article, terms: &[String]) -> f64 {
    let title = article.title.to_lowercase();
    let content = article.content.to_lowercase();
    let tags = article.tags.join(" ").to_lowercase();
    let categories = article.categories.join(" ").to_lowercase();

    terms
        .iter()
        .map(|term| {
            let mut score = match title.find(term.as_str()) {
                Some(0) => TITLE_LEADING,
                Some(_) => TITLE_INNER,
                None => 0.0,
            };
            if tags.contains(term.as_str()) {
                score += TAG_MATCH;
            }
            if categories.contains(term.as_str()) {
                score += CATEGORY_MATCH;
            }
            let matches = count_occurrences(&content, term);
            score + (matches as f64 * CONTENT_PER_MATCH).min(CONTENT_CAP)
        })
        .sum()
}

/// Counts non-overlapping literal occurrences of `term` in `haystack`.
pub(crate) fn count_occurrences(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    haystack.matches(term).count()
}
