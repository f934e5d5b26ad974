//! The search engine service.
//!
//! One [`SearchEngine`] is built per page load. It owns the index, the page
//! handle and the debounce state; host event handlers call into it and it
//! writes results back through the [`Page`].

use std::time::Duration;

use crate::config::SearchConfig;
use crate::debounce::{Debounce, Scheduled, Ticket};
use crate::loader::{load_index, IndexSource};
use crate::location::{query_param, redirect_url, with_query_param};
use crate::model::SearchIndex;
use crate::page::{Element, Page};
use crate::query::Query;
use crate::render::{render_results, results_view, title_label, ResultsView};
use crate::scoring::perform_search;
use crate::targets::{resolve_targets, Mode, Targets};

/// What a search execution did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; results and title were cleared.
    Cleared,
    /// Results were rendered for `query`.
    Rendered {
        /// Normalized query text.
        query: String,
        /// Number of result cards.
        hits: usize,
    },
}

/// Search engine bound to one page.
#[derive(Debug)]
pub struct SearchEngine<P: Page> {
    index: SearchIndex,
    page: P,
    config: SearchConfig,
    targets: Targets,
    debounce: Debounce,
}

impl<P: Page> SearchEngine<P> {
    /// Page start-up: loads the index, binds to the page, and runs the
    /// search carried in the URL, if any.
    pub async fn start<S: IndexSource>(source: &S, page: P, config: SearchConfig) -> Self {
        let index = load_index(source).await;
        let mut engine = Self::new(index, page, config);
        engine.search_from_location();
        tracing::info!(mode = ?engine.targets.mode, "search engine initialized");
        engine
    }

    /// Binds an already loaded index to `page`.
    pub fn new(index: SearchIndex, page: P, config: SearchConfig) -> Self {
        let targets = resolve_targets(&page);
        let debounce = Debounce::new(config.debounce());
        Self {
            index,
            page,
            config,
            targets,
            debounce,
        }
    }

    /// Surfaces bound at start-up.
    pub fn targets(&self) -> Targets {
        self.targets
    }

    /// The loaded index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// The engine configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The bound page.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable access to the bound page, e.g. to simulate typing.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Releases the page.
    pub fn into_page(self) -> P {
        self.page
    }

    /// Header form submitted: navigates to the results page.
    ///
    /// Returns the target URL, or `None` when there is no header surface or
    /// the input is blank.
    pub fn submit_header(&mut self) -> Option<String> {
        if !self.targets.header {
            return None;
        }
        let raw = self.page.value(Element::HeaderInput).unwrap_or_default();
        let query = raw.trim();
        if query.is_empty() {
            return None;
        }
        let url = redirect_url(&self.config.results_path, &self.config.keyword_param, query);
        tracing::debug!(%url, "redirecting to results page");
        self.page.navigate(&url);
        Some(url)
    }

    /// Results form submitted: searches immediately, dropping any pending
    /// keystroke search.
    pub fn submit_results(&mut self) -> Option<SearchOutcome> {
        if self.targets.mode != Mode::InPlace {
            return None;
        }
        self.debounce.cancel();
        self.handle_search()
    }

    /// Results input changed at `now`: (re)starts the debounce timer.
    ///
    /// Returns the schedule so a host with real timers can arm one and
    /// cancel the superseded one.
    pub fn input(&mut self, now: Duration) -> Option<Scheduled> {
        if self.targets.mode != Mode::InPlace {
            return None;
        }
        Some(self.debounce.schedule(now))
    }

    /// A host timer for `ticket` expired.
    pub fn fire(&mut self, ticket: Ticket) -> Option<SearchOutcome> {
        if self.debounce.fire(ticket) {
            self.handle_search()
        } else {
            None
        }
    }

    /// Runs the pending keystroke search if it is due at `now`.
    pub fn tick(&mut self, now: Duration) -> Option<SearchOutcome> {
        if self.debounce.poll(now) {
            self.handle_search()
        } else {
            None
        }
    }

    /// Seeds the input from the URL's query parameter and searches.
    pub fn search_from_location(&mut self) -> Option<SearchOutcome> {
        if self.targets.mode != Mode::InPlace {
            return None;
        }
        let keyword = query_param(&self.page.location(), &self.config.keyword_param)?;
        tracing::debug!(%keyword, "searching from URL");
        self.page.set_value(Element::ResultsInput, &keyword);
        self.handle_search()
    }

    /// Searches for the results input's current value and renders the
    /// outcome.
    pub fn handle_search(&mut self) -> Option<SearchOutcome> {
        if self.targets.mode != Mode::InPlace {
            return None;
        }
        let raw = self.page.value(Element::ResultsInput).unwrap_or_default();
        let query = Query::parse(&raw);
        if query.is_empty() {
            self.clear_results();
            return Some(SearchOutcome::Cleared);
        }

        let results = perform_search(&self.index, &query, self.config.max_results);
        let view = results_view(&results, &query, &self.config);
        self.display(&view);
        self.sync_location(&query);

        Some(SearchOutcome::Rendered {
            query: query.text().to_string(),
            hits: view.len(),
        })
    }

    fn display(&mut self, view: &ResultsView) {
        if self.targets.title {
            let template = self.page.title_template();
            let label = title_label(view.len(), template.as_deref(), &self.config.messages);
            self.page.set_text(Element::ResultsTitle, &label);
        }
        let html = render_results(view, &self.config.messages);
        self.page.set_inner_html(Element::ResultsList, &html);
    }

    fn clear_results(&mut self) {
        self.page.set_inner_html(Element::ResultsList, "");
        if self.targets.title {
            self.page.set_text(Element::ResultsTitle, "");
        }
    }

    fn sync_location(&mut self, query: &Query) {
        let location = self.page.location();
        if let Some(url) = with_query_param(&location, &self.config.keyword_param, query.text()) {
            self.page.replace_location(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Article;
    use crate::page::MemoryPage;

    fn index() -> SearchIndex {
        SearchIndex::new(vec![
            Article {
                title: "Rust Guide".to_string(),
                content: "Rust is great. Rust rocks.".to_string(),
                permalink: "/a".to_string(),
                date: "2024-01-01".to_string(),
                tags: vec!["rust".to_string()],
                categories: Vec::new(),
            },
            Article {
                title: "Go Notes".to_string(),
                content: "Go is simple.".to_string(),
                permalink: "/b".to_string(),
                date: "2024-02-01".to_string(),
                tags: vec!["go".to_string()],
                categories: Vec::new(),
            },
        ])
    }

    fn results_engine(location: &str) -> SearchEngine<MemoryPage> {
        SearchEngine::new(index(), MemoryPage::results_page(location), SearchConfig::default())
    }

    #[test]
    fn blank_query_clears_without_touching_url() {
        let mut engine = results_engine("https://example.com/search/");
        engine.page_mut().set_value(Element::ResultsInput, "rust");
        engine.handle_search();
        engine.page_mut().set_value(Element::ResultsInput, "   ");
        assert_eq!(engine.handle_search(), Some(SearchOutcome::Cleared));
        assert_eq!(engine.page().html(Element::ResultsList), Some(""));
        assert_eq!(engine.page().html(Element::ResultsTitle), Some(""));
        assert_eq!(engine.page().replacements().len(), 1);
    }

    #[test]
    fn submit_searches_and_updates_title() {
        let mut engine = results_engine("https://example.com/search/");
        engine.page_mut().set_value(Element::ResultsInput, " GO ");
        let outcome = engine.submit_results();
        assert_eq!(
            outcome,
            Some(SearchOutcome::Rendered {
                query: "go".to_string(),
                hits: 1
            })
        );
        assert_eq!(engine.page().html(Element::ResultsTitle), Some("1件の検索結果"));
        assert_eq!(engine.page().location(), "https://example.com/search/?keyword=go");
    }

    #[test]
    fn page_title_template_is_used() {
        let page =
            MemoryPage::results_page("https://example.com/search/").with_title_template("%d hits");
        let mut engine = SearchEngine::new(index(), page, SearchConfig::default());
        engine.page_mut().set_value(Element::ResultsInput, "zzz");
        engine.handle_search();
        assert_eq!(engine.page().html(Element::ResultsTitle), Some("0 hits"));
    }

    #[test]
    fn submit_cancels_pending_keystroke_search() {
        let mut engine = results_engine("https://example.com/search/");
        engine.page_mut().set_value(Element::ResultsInput, "rust");
        engine.input(Duration::ZERO);
        engine.submit_results();
        assert_eq!(engine.tick(Duration::from_secs(1)), None);
        assert_eq!(engine.page().replacements().len(), 1);
    }

    #[test]
    fn header_submit_redirects_with_raw_query() {
        let page = MemoryPage::header_page("https://example.com/posts/");
        let mut engine = SearchEngine::new(index(), page, SearchConfig::default());
        assert_eq!(engine.targets().mode, Mode::Redirect);

        engine.page_mut().set_value(Element::HeaderInput, "  Rust Async ");
        assert_eq!(engine.submit_header().as_deref(), Some("/search/?keyword=Rust+Async"));
        assert_eq!(engine.page().navigations(), ["/search/?keyword=Rust+Async"]);
    }

    #[test]
    fn blank_header_submit_does_not_navigate() {
        let mut engine = SearchEngine::new(
            index(),
            MemoryPage::header_page("https://example.com/"),
            SearchConfig::default(),
        );
        engine.page_mut().set_value(Element::HeaderInput, "  ");
        assert_eq!(engine.submit_header(), None);
        assert!(engine.page().navigations().is_empty());
    }

    #[test]
    fn redirect_mode_ignores_in_place_triggers() {
        let mut engine = SearchEngine::new(
            index(),
            MemoryPage::header_page("https://example.com/?keyword=rust"),
            SearchConfig::default(),
        );
        assert_eq!(engine.search_from_location(), None);
        assert_eq!(engine.input(Duration::ZERO), None);
        assert_eq!(engine.submit_results(), None);
        assert!(engine.page().replacements().is_empty());
    }

    #[test]
    fn inert_page_ignores_everything() {
        let mut engine = SearchEngine::new(
            index(),
            MemoryPage::new("https://example.com/"),
            SearchConfig::default(),
        );
        assert_eq!(engine.targets().mode, Mode::Inert);
        assert_eq!(engine.submit_header(), None);
        assert_eq!(engine.handle_search(), None);
    }
}
