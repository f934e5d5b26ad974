//! `site-search` — Runs site searches against an `index.json` outside the browser.
//!
//! **Outputs:**
//! - `query`: ranked results on stdout, or the results-list markup with `--html`
//! - `simulate`: the state of a results page after loading a URL and typing
//!   into its search box (title, location, history and list markup)
//!
//! **Usage:**
//! ```text
//! site-search query --index <path|url> [--config <file>] [--html] <query>...
//! site-search simulate --index <path|url> [--url <page-url>] [--config <file>]
//!                      [--input <text>]... [--submit] [--header <text>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use site_search::render::{render_results, results_view};
use site_search::{
    perform_search, Element, IndexSource, MemoryPage, Page, Query, SearchEngine, SearchIndex,
};
use site_search_clients::{init_tracing, load_config, IndexArg};

/// Gap between simulated keystrokes.
const KEYSTROKE: Duration = Duration::from_millis(100);

/// Query a site search index.
#[derive(Parser)]
#[command(name = "site-search", about = "Query a site search index")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score and rank articles for a query.
    Query {
        /// Index file path or `http(s)://` URL.
        #[arg(long)]
        index: String,

        /// Search configuration (TOML).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the results-list HTML instead of a ranked listing.
        #[arg(long)]
        html: bool,

        /// Query words.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Drive a results page the way a visitor would.
    Simulate {
        /// Index file path or `http(s)://` URL.
        #[arg(long)]
        index: String,

        /// URL the page is loaded at.
        #[arg(long, default_value = "http://localhost/search/")]
        url: String,

        /// Search configuration (TOML).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Successive values of the search box, one keystroke apart.
        #[arg(long)]
        input: Vec<String>,

        /// Submit the results form after typing instead of waiting out the debounce.
        #[arg(long)]
        submit: bool,

        /// Type this into the header quick search and submit it.
        #[arg(long)]
        header: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    match Args::parse().command {
        Command::Query {
            index,
            config,
            html,
            query,
        } => run_query(&index, config, html, &query),
        Command::Simulate {
            index,
            url,
            config,
            input,
            submit,
            header,
        } => run_simulation(&index, &url, config, &input, submit, header.as_deref()),
    }
}

fn run_query(index: &str, config: Option<PathBuf>, html: bool, words: &[String]) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let source = IndexArg::parse(index);
    let body = block_on(source.fetch())
        .with_context(|| format!("Failed to fetch index: {}", source.describe()))?;
    let index = SearchIndex::from_json(&body)
        .with_context(|| format!("Failed to parse index: {}", source.describe()))?;

    let query = Query::parse(&words.join(" "));
    if query.is_empty() {
        bail!("Query is blank");
    }

    let results = perform_search(&index, &query, config.max_results);
    if html {
        let view = results_view(&results, &query, &config);
        println!("{}", render_results(&view, &config.messages));
        return Ok(());
    }

    println!(
        "{} of {} articles match \"{}\"",
        results.len(),
        index.len(),
        query.text()
    );
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>3}. {:>5.1}  {}  {}",
            rank + 1,
            result.score,
            result.article.title,
            result.article.permalink
        );
    }
    Ok(())
}

fn run_simulation(
    index: &str,
    url: &str,
    config: Option<PathBuf>,
    inputs: &[String],
    submit: bool,
    header: Option<&str>,
) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let source = IndexArg::parse(index);
    let page = MemoryPage::results_page(url).with(&[Element::HeaderForm, Element::HeaderInput]);
    let mut engine = block_on(SearchEngine::start(&source, page, config));

    println!("Loaded {} articles", engine.index().len());
    println!("Mode: {:?}", engine.targets().mode);

    let mut now = Duration::ZERO;
    for text in inputs {
        engine.page_mut().set_value(Element::ResultsInput, text);
        engine.input(now);
        now += KEYSTROKE;
    }
    if !inputs.is_empty() {
        let outcome = if submit {
            engine.submit_results()
        } else {
            let quiet = engine.config().debounce();
            engine.tick(now - KEYSTROKE + quiet)
        };
        println!("Outcome: {outcome:?}");
    }

    if let Some(text) = header {
        engine.page_mut().set_value(Element::HeaderInput, text);
        match engine.submit_header() {
            Some(target) => println!("Header redirect: {target}"),
            None => println!("Header redirect: none"),
        }
    }

    let page = engine.into_page();
    println!("Location: {}", page.location());
    println!("History entries: {}", page.history_len());
    println!("Title: {}", page.html(Element::ResultsTitle).unwrap_or_default());
    println!("{}", page.html(Element::ResultsList).unwrap_or_default());
    Ok(())
}
