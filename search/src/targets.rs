//! Discovers which search surface the current page offers.

use crate::page::{Element, Page};

/// How queries are handled on this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Results are scored and rendered on this page.
    InPlace,
    /// Submissions navigate to the results page.
    Redirect,
    /// No search surface; every trigger is a no-op.
    Inert,
}

/// The surfaces bound at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    /// Primary query surface.
    pub mode: Mode,
    /// The header quick search is present and redirects on submit.
    pub header: bool,
    /// A results-count label is present.
    pub title: bool,
}

/// Resolves the page's surfaces.
///
/// A results page (form, input and list) takes precedence over the header
/// quick search. The header keeps redirecting either way.
pub fn resolve_targets<P: Page + ?Sized>(page: &P) -> Targets {
    for element in Element::ALL {
        tracing::debug!(selector = element.selector(), found = page.has(element), "element lookup");
    }

    let header = page.has(Element::HeaderForm) && page.has(Element::HeaderInput);
    let results = page.has(Element::ResultsForm)
        && page.has(Element::ResultsInput)
        && page.has(Element::ResultsList);

    let mode = if results {
        Mode::InPlace
    } else if header {
        Mode::Redirect
    } else {
        Mode::Inert
    };
    match mode {
        Mode::InPlace => tracing::debug!("using results page elements"),
        Mode::Redirect => tracing::debug!("using header search elements"),
        Mode::Inert => tracing::info!("no search elements found"),
    }

    Targets {
        mode,
        header,
        title: results && page.has(Element::ResultsTitle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;

    #[test]
    fn results_page_wins_over_header() {
        let page = MemoryPage::results_page("https://example.com/search/")
            .with(&[Element::HeaderForm, Element::HeaderInput]);
        let targets = resolve_targets(&page);
        assert_eq!(targets.mode, Mode::InPlace);
        assert!(targets.header);
        assert!(targets.title);
    }

    #[test]
    fn header_only_redirects() {
        let targets = resolve_targets(&MemoryPage::header_page("https://example.com/"));
        assert_eq!(targets.mode, Mode::Redirect);
        assert!(targets.header);
        assert!(!targets.title);
    }

    #[test]
    fn results_page_needs_a_list() {
        let page = MemoryPage::new("https://example.com/search/")
            .with(&[Element::ResultsForm, Element::ResultsInput]);
        assert_eq!(resolve_targets(&page).mode, Mode::Inert);
    }

    #[test]
    fn title_is_optional() {
        let page = MemoryPage::new("https://example.com/search/").with(&[
            Element::ResultsForm,
            Element::ResultsInput,
            Element::ResultsList,
        ]);
        let targets = resolve_targets(&page);
        assert_eq!(targets.mode, Mode::InPlace);
        assert!(!targets.title);
    }

    #[test]
    fn bare_page_is_inert() {
        assert_eq!(resolve_targets(&MemoryPage::new("https://example.com/")).mode, Mode::Inert);
    }
}
