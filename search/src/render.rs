//! Renders search results as HTML.
//!
//! Results first become a [`ResultsView`], a typed description of what the
//! list shows. [`render_results`] is then the only place that turns a view
//! into markup, and every plain-text value passes through [`escape_html`]
//! there. Values ending in `_html` are already escaped and highlighted.

use crate::config::{Messages, SearchConfig, DEFAULT_TITLE_TEMPLATE};
use crate::dates::format_date;
use crate::highlight::{escape_html, highlight_text};
use crate::model::ScoredResult;
use crate::query::Query;
use crate::snippet::highlighted_summary;

/// One result card.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    /// Link target.
    pub href: String,
    /// Highlighted title markup.
    pub title_html: String,
    /// Machine-readable date for the `datetime` attribute.
    pub datetime: String,
    /// Human-readable date.
    pub date: String,
    /// Category badges, already truncated.
    pub categories: Vec<String>,
    /// Highlighted snippet markup.
    pub summary_html: String,
    /// Tag badges, already truncated.
    pub tags: Vec<String>,
}

/// What the results list shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// The query matched nothing.
    NoResults {
        /// Normalized query text, unescaped.
        query: String,
    },
    /// Ranked result cards.
    Articles(Vec<ArticleCard>),
}

impl ResultsView {
    /// Number of result cards.
    pub fn len(&self) -> usize {
        match self {
            Self::NoResults { .. } => 0,
            Self::Articles(cards) => cards.len(),
        }
    }

    /// Returns true if there are no result cards.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the view for a ranked result list.
pub fn results_view(
    results: &[ScoredResult<'_>],
    query: &Query,
    config: &SearchConfig,
) -> ResultsView {
    if results.is_empty() {
        return ResultsView::NoResults {
            query: query.text().to_string(),
        };
    }
    let cards = results
        .iter()
        .map(|result| {
            let article = result.article;
            ArticleCard {
                href: article.permalink.clone(),
                title_html: highlight_text(&article.title, query.terms()),
                datetime: article.date.clone(),
                date: format_date(&article.date, config.date_style),
                categories: article
                    .categories
                    .iter()
                    .take(config.max_categories)
                    .cloned()
                    .collect(),
                summary_html: highlighted_summary(
                    &article.content,
                    query.terms(),
                    config.window(),
                ),
                tags: article.tags.iter().take(config.max_tags).cloned().collect(),
            }
        })
        .collect();
    ResultsView::Articles(cards)
}

/// Resolves the results-count label.
///
/// The page-provided template wins over the configured one; the built-in
/// template is the last resort. The first `%d` is replaced by `count`.
pub fn title_label(count: usize, page_template: Option<&str>, messages: &Messages) -> String {
    let template = page_template
        .or(messages.title_template.as_deref())
        .unwrap_or(DEFAULT_TITLE_TEMPLATE);
    template.replacen("%d", &count.to_string(), 1)
}

/// Renders a view as the inner HTML of the results list.
pub fn render_results(view: &ResultsView, messages: &Messages) -> String {
    match view {
        ResultsView::NoResults { query } => render_no_results(query, messages),
        ResultsView::Articles(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_no_results(query: &str, messages: &Messages) -> String {
    let line = messages.no_results.replace("%s", &escape_html(query));
    let mut html = String::from("<div class=\"no-results\">\n");
    html.push_str(&format!("<p>{line}</p>\n"));
    if !messages.hints.is_empty() {
        html.push_str("<ul>\n");
        for hint in &messages.hints {
            html.push_str(&format!("<li>{}</li>\n", escape_html(hint)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_card(card: &ArticleCard) -> String {
    let categories = if card.categories.is_empty() {
        String::new()
    } else {
        let badges: String = card
            .categories
            .iter()
            .map(|c| format!("<span class=\"category-tag\">{}</span>", escape_html(c)))
            .collect();
        format!("<span class=\"search-categories\">{badges}</span>")
    };
    let tags = if card.tags.is_empty() {
        String::new()
    } else {
        let badges: String = card
            .tags
            .iter()
            .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
            .collect();
        format!("\n<div class=\"search-tags\">{badges}</div>")
    };
    format!(
        r#"<article class="search-article">
<div class="search-article-content">
<h3 class="search-article-title"><a href="{href}">{title}</a></h3>
<div class="search-article-meta">
<time datetime="{datetime}">{date}</time>{categories}
</div>
<div class="search-article-summary">{summary}</div>{tags}
</div>
</article>
"#,
        href = escape_html(&card.href),
        title = card.title_html,
        datetime = escape_html(&card.datetime),
        date = escape_html(&card.date),
        categories = categories,
        summary = card.summary_html,
        tags = tags,
    )
}
