//! HTML escaping and query-term highlighting.

use regex::{Captures, RegexBuilder};

/// Opening tag wrapped around each highlighted occurrence.
pub const MARK_OPEN: &str = r#"<mark class="search-highlight">"#;
/// Closing tag for [`MARK_OPEN`].
pub const MARK_CLOSE: &str = "</mark>";

/// Escapes HTML special characters in a string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Entities produced by [`escape_html`]; matched whole so a term never
/// splits one.
const ENTITY: &str = "&(?:amp|lt|gt|quot);";

/// Escapes `text` and wraps every case-insensitive occurrence of each term in
/// a `<mark>` element.
///
/// Terms are applied one after another over the accumulated output, so a
/// later term also matches inside markup inserted for an earlier one. Each
/// term is matched in its escaped form, so `<b>` finds `&lt;b&gt;`, but
/// never inside an entity: `amp` leaves `&amp;` intact.
pub fn highlight_text(text: &str, terms: &[String]) -> String {
    let mut html = escape_html(text);
    for term in terms.iter().filter(|t| !t.is_empty()) {
        let pattern = format!("({})|{ENTITY}", regex::escape(&escape_html(term)));
        let matcher = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(term = term.as_str(), "cannot highlight term: {e}");
                continue;
            }
        };
        html = matcher
            .replace_all(&html, |caps: &Captures| match caps.get(1) {
                Some(hit) => format!("{MARK_OPEN}{}{MARK_CLOSE}", hit.as_str()),
                None => caps[0].to_string(),
            })
            .into_owned();
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    /// Every `&` outside the mark tags must open a complete entity.
    fn assert_entities_intact(html: &str) {
        let stripped = html.replace(MARK_OPEN, "").replace(MARK_CLOSE, "");
        assert!(!stripped.contains('<'), "raw '<' in {stripped}");
        for (i, _) in stripped.match_indices('&') {
            let rest = &stripped[i..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;"]
                    .iter()
                    .any(|entity| rest.starts_with(entity)),
                "broken entity at {i} in {stripped}"
            );
        }
    }

    #[test]
    fn wraps_case_insensitive_matches_preserving_case() {
        let html = highlight_text("Rust is great. RUST rocks.", &terms(&["rust"]));
        assert_eq!(
            html,
            concat!(
                r#"<mark class="search-highlight">Rust</mark> is great. "#,
                r#"<mark class="search-highlight">RUST</mark> rocks."#
            )
        );
    }

    #[test]
    fn escapes_before_highlighting() {
        let html = highlight_text("<script>alert(1)</script> & rust", &terms(&["rust"]));
        assert!(html.starts_with("&lt;script&gt;alert(1)&lt;/script&gt; &amp; "));
        assert!(html.ends_with(r#"<mark class="search-highlight">rust</mark>"#));
    }

    #[test]
    fn no_raw_markup_outside_marks() {
        assert_entities_intact(&highlight_text("a < b && c > d", &terms(&["b", "c"])));
    }

    #[test]
    fn entity_names_are_not_highlighted() {
        assert_eq!(highlight_text("a & b", &terms(&["amp"])), "a &amp; b");
        assert_eq!(highlight_text("1 < 2", &terms(&["lt"])), "1 &lt; 2");
        assert_eq!(highlight_text("x > y", &terms(&["GT"])), "x &gt; y");
        assert_eq!(
            highlight_text(r#"say "hi""#, &terms(&["quot"])),
            "say &quot;hi&quot;"
        );
        for term in ["amp", "lt", "gt", "quot", "am", "t;", "&"] {
            assert_entities_intact(&highlight_text(r#"<a & "b">"#, &terms(&[term])));
        }
    }

    #[test]
    fn entity_names_still_match_plain_text() {
        let html = highlight_text("Tom & Jerry lt", &terms(&["lt", "amp"]));
        assert_eq!(html, r#"Tom &amp; Jerry <mark class="search-highlight">lt</mark>"#);
        let html = highlight_text("camp & lamp", &terms(&["amp"]));
        assert_eq!(
            html,
            concat!(
                r#"c<mark class="search-highlight">amp</mark> &amp; "#,
                r#"l<mark class="search-highlight">amp</mark>"#
            )
        );
        assert_entities_intact(&html);
    }

    #[test]
    fn ampersand_term_wraps_whole_entity() {
        let html = highlight_text("R&D", &terms(&["&"]));
        assert_eq!(html, r#"R<mark class="search-highlight">&amp;</mark>D"#);
    }

    #[test]
    fn markup_terms_match_escaped_text() {
        let html = highlight_text("use <b> tags", &terms(&["<b>"]));
        assert_eq!(
            html,
            r#"use <mark class="search-highlight">&lt;b&gt;</mark> tags"#
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let html = highlight_text("a.c abc", &terms(&["a.c"]));
        assert_eq!(html, r#"<mark class="search-highlight">a.c</mark> abc"#);
    }

    #[test]
    fn later_terms_rescan_earlier_marks() {
        // "mark" matches inside the tags inserted for "ru".
        let html = highlight_text("rust", &terms(&["ru", "mark"]));
        assert_eq!(
            html,
            concat!(
                r#"<<mark class="search-highlight">mark</mark> class="search-highlight">"#,
                r#"ru</<mark class="search-highlight">mark</mark>>st"#
            )
        );
    }

    #[test]
    fn no_terms_only_escapes() {
        assert_eq!(highlight_text("a & b", &[]), "a &amp; b");
    }
}
