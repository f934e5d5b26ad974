//! Client-side article search for static sites.
//!
//! Loads the site's `/index.json` article list once, scores every article
//! against a query with a weighted substring heuristic, and renders the top
//! results as highlighted HTML cards into the host page.
//!
//! # Entry Points
//!
//! ```
//! use site_search::{perform_search, Query, SearchIndex};
//!
//! let index = SearchIndex::from_json(r#"[{"title":"Rust Guide","content":"Rust rocks."}]"#)?;
//! let results = perform_search(&index, &Query::parse("rust"), 20);
//! assert_eq!(results[0].score, 10.5);
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! A page drives a [`SearchEngine`] through the [`Page`] trait; the browser
//! binding lives in `site-search-web`.
//!
//! # Generated Assets
//!
//! ```text
//! <out>/
//!   search/index.html              results page skeleton
//!   partials/header-search.html    header quick-search form
//!   js/ga4-tracking.js             analytics loader (with a measurement id)
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod analytics;
pub mod config;
pub mod dates;
pub mod debounce;
pub mod engine;
pub mod highlight;
pub mod loader;
pub mod location;
pub mod markup;
pub mod model;
pub mod page;
pub mod query;
pub mod render;
pub mod scoring;
pub mod snippet;
pub mod targets;
pub mod writer;

use std::path::Path;

pub use analytics::MeasurementId;
pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchOutcome};
pub use highlight::highlight_text;
#[cfg(not(target_arch = "wasm32"))]
pub use loader::HttpSource;
pub use loader::{load_index, FileSource, IndexSource, LoadError, StaticSource};
pub use model::{Article, ScoredResult, SearchIndex};
pub use page::{Element, MemoryPage, Page};
pub use query::Query;
pub use scoring::perform_search;
pub use snippet::highlighted_summary;
pub use targets::{Mode, Targets};
pub use writer::{AssetError, AssetStatus, WrittenAsset};

/// Writes the search page assets into `out_dir`.
///
/// Returns what happened to each asset, in write order. Files already
/// holding the generated content are left untouched.
///
/// # Errors
///
/// Returns an error if any file cannot be compared or written.
pub fn generate_assets(
    out_dir: &Path,
    config: &SearchConfig,
    measurement_id: Option<&MeasurementId>,
) -> Result<Vec<WrittenAsset>, AssetError> {
    let mut assets = vec![
        (
            out_dir.join("search").join("index.html"),
            markup::render_results_page("検索", config, markup::DEFAULT_BUNDLE),
        ),
        (
            out_dir.join("partials").join("header-search.html"),
            markup::render_header_search(config),
        ),
    ];
    if let Some(id) = measurement_id {
        assets.push((
            out_dir.join("js").join("ga4-tracking.js"),
            analytics::ga4_script(id),
        ));
    }

    assets
        .iter()
        .map(|(path, content)| writer::write_asset(path, content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_without_analytics() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate_assets(dir.path(), &SearchConfig::default(), None).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|w| w.status == AssetStatus::Created));
        assert!(dir.path().join("search/index.html").exists());
        assert!(!dir.path().join("js/ga4-tracking.js").exists());
    }

    #[test]
    fn assets_with_analytics() {
        let dir = tempfile::tempdir().unwrap();
        let id: MeasurementId = "G-ABC123".parse().unwrap();
        let written = generate_assets(dir.path(), &SearchConfig::default(), Some(&id)).unwrap();
        assert_eq!(written.len(), 3);
        let js = std::fs::read_to_string(dir.path().join("js/ga4-tracking.js")).unwrap();
        assert!(js.contains("G-ABC123"));
    }

    #[test]
    fn regeneration_skips_identical_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = SearchConfig::default();
        generate_assets(dir.path(), &config, None).unwrap();

        let again = generate_assets(dir.path(), &config, None).unwrap();
        assert!(again.iter().all(|w| w.status == AssetStatus::Unchanged));

        let renamed = SearchConfig {
            results_path: "/find/".to_string(),
            ..SearchConfig::default()
        };
        let changed = generate_assets(dir.path(), &renamed, None).unwrap();
        assert!(changed.iter().all(|w| w.status == AssetStatus::Updated));
        assert!(changed.iter().all(|w| w.bytes > 0));
    }
}
