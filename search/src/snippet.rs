//! Best-window snippet extraction.

use crate::highlight::highlight_text;
use crate::scoring::count_occurrences;

/// Marker added where a snippet cuts the content short.
pub const ELLIPSIS: &str = "...";

/// Window geometry for snippet extraction, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Snippet length.
    pub length: usize,
    /// Distance between candidate window starts.
    pub step: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self { length: 150, step: 50 }
    }
}

/// Condenses `content` to the window with the most term occurrences and
/// highlights it.
pub fn highlighted_summary(content: &str, terms: &[String], window: Window) -> String {
    highlight_text(&summary(content, terms, window), terms)
}

/// Picks the densest window of `content` and adds ellipses where it was cut.
///
/// Candidate windows start at every multiple of `window.step` strictly below
/// `len - window.length`. Only a strictly better count replaces the current
/// best, so ties keep the earliest window; with no matches the window starts
/// at zero.
pub fn summary(content: &str, terms: &[String], window: Window) -> String {
    let chars: Vec<char> = content.chars().collect();
    let start = best_start(&chars, terms, window);
    let end = (start + window.length).min(chars.len());

    let mut out = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if start + window.length < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

fn best_start(chars: &[char], terms: &[String], window: Window) -> usize {
    let step = window.step.max(1);
    let mut best = 0;
    let mut best_count = 0;
    let mut start = 0;
    while start + window.length < chars.len() {
        let text = chars[start..start + window.length]
            .iter()
            .collect::<String>()
            .to_lowercase();
        let count: usize = terms.iter().map(|t| count_occurrences(&text, t)).sum();
        if count > best_count {
            best_count = count;
            best = start;
        }
        start += step;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn short_content_is_whole_without_ellipses() {
        let snippet = highlighted_summary(
            "Rust is great. Rust rocks.",
            &terms(&["rust"]),
            Window::default(),
        );
        assert_eq!(
            snippet,
            concat!(
                r#"<mark class="search-highlight">Rust</mark> is great. "#,
                r#"<mark class="search-highlight">Rust</mark> rocks."#
            )
        );
    }

    #[test]
    fn picks_window_containing_the_match() {
        let content = format!("{}rust{}", "a ".repeat(160), "b ".repeat(40));
        let text = summary(&content, &terms(&["rust"]), Window::default());
        assert!(text.starts_with("...a a"), "got {text}");
        assert!(text.ends_with(ELLIPSIS), "got {text}");
        assert!(text.contains("rust"));
        assert_eq!(text.chars().count(), 150 + 2 * ELLIPSIS.len());
    }

    #[test]
    fn no_match_starts_at_zero() {
        let content = "x".repeat(400);
        let text = summary(&content, &terms(&["rust"]), Window::default());
        assert!(!text.starts_with(ELLIPSIS));
        assert!(text.ends_with(ELLIPSIS));
        assert_eq!(text.chars().count(), 150 + ELLIPSIS.len());
    }

    #[test]
    fn ties_keep_earliest_window() {
        // One match near the start and one near the end; each window sees one.
        let content = format!("rust{}rust{}", "-".repeat(296), "-".repeat(100));
        let text = summary(&content, &terms(&["rust"]), Window::default());
        assert!(text.starts_with("rust"), "got {text}");
    }

    #[test]
    fn denser_window_wins() {
        let content = format!("rust{}rust rust{}", "-".repeat(196), "-".repeat(200));
        let text = summary(&content, &terms(&["rust"]), Window::default());
        assert!(text.starts_with(ELLIPSIS), "got {text}");
        assert_eq!(text.matches("rust").count(), 2);
    }

    #[test]
    fn counts_across_all_terms() {
        let content = format!("{}go rust{}", "-".repeat(200), "-".repeat(200));
        let text = summary(&content, &terms(&["go", "rust"]), Window::default());
        assert!(text.contains("go rust"), "got {text}");
    }

    #[test]
    fn windows_are_measured_in_characters() {
        let content = "日本語".repeat(100);
        let text = summary(&content, &terms(&["rust"]), Window::default());
        assert_eq!(text.chars().count(), 150 + ELLIPSIS.len());
    }
}
