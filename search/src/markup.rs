//! Renders the page markup the engine binds to.
//!
//! The class names and ids here are exactly the selectors in
//! [`Element::selector`](crate::page::Element::selector).

use crate::config::SearchConfig;
use crate::highlight::escape_html;

/// Default location of the browser bundle's JavaScript loader.
pub const DEFAULT_BUNDLE: &str = "/js/site_search_web.js";

/// Renders the header quick-search form.
pub fn render_header_search(config: &SearchConfig) -> String {
    format!(
        r#"<div class="header-search">
<form class="search-form" action="{action}" method="get" role="search">
<input class="search-input" type="search" name="{param}" aria-label="サイト内検索" placeholder="検索">
</form>
</div>
"#,
        action = escape_html(&config.results_path),
        param = escape_html(&config.keyword_param),
    )
}

/// Renders the results page body: form, input, count label and list.
pub fn render_results_body(config: &SearchConfig) -> String {
    format!(
        r#"<section class="search-page">
<form class="search-form" action="{action}" method="get" role="search">
<input id="search-input" class="search-input" type="search" name="{param}"
  autocomplete="off" aria-label="サイト内検索">
<button type="submit">検索</button>
</form>
<h2 class="search-result--title"></h2>
<div class="search-result--list"></div>
</section>
"#,
        action = escape_html(&config.results_path),
        param = escape_html(&config.keyword_param),
    )
}

/// Renders a complete results page that loads the browser bundle.
pub fn render_results_page(title: &str, config: &SearchConfig, bundle: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
</head>
<body>
<header class="site-header">
{header}</header>
<main id="main-content">
{body}</main>
<script type="module">
import init from "{bundle}";
init();
</script>
</body>
</html>
"##,
        title = escape_html(title),
        header = render_header_search(config),
        body = render_results_body(config),
        bundle = escape_html(bundle),
    )
}
