//! The page surface the engine binds to.
//!
//! [`Page`] is the engine's only way to touch the host document. The browser
//! binding implements it over the DOM; [`MemoryPage`] implements it in memory
//! for tests and command-line simulation.

use std::collections::HashMap;

/// A DOM element the engine may bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Quick-search form in the site header.
    HeaderForm,
    /// Quick-search input in the site header.
    HeaderInput,
    /// Search form on the results page.
    ResultsForm,
    /// Search input on the results page.
    ResultsInput,
    /// Container the result cards are rendered into.
    ResultsList,
    /// Results-count label.
    ResultsTitle,
}

impl Element {
    /// All elements, in discovery order.
    pub const ALL: [Element; 6] = [
        Element::HeaderForm,
        Element::HeaderInput,
        Element::ResultsForm,
        Element::ResultsInput,
        Element::ResultsList,
        Element::ResultsTitle,
    ];

    /// CSS selector locating the element.
    pub fn selector(self) -> &'static str {
        match self {
            Element::HeaderForm => ".header-search .search-form",
            Element::HeaderInput => ".header-search .search-input",
            Element::ResultsForm => "form.search-form",
            Element::ResultsInput => "#search-input",
            Element::ResultsList => ".search-result--list",
            Element::ResultsTitle => ".search-result--title",
        }
    }
}

/// Capabilities the engine needs from the host page.
///
/// Operations on an absent element are no-ops.
pub trait Page {
    /// Returns true if the element exists on this page.
    fn has(&self, element: Element) -> bool;

    /// Current value of an input element.
    fn value(&self, element: Element) -> Option<String>;

    /// Sets the value of an input element.
    fn set_value(&mut self, element: Element, value: &str);

    /// Replaces an element's children with parsed HTML.
    fn set_inner_html(&mut self, element: Element, html: &str);

    /// Replaces an element's children with text.
    fn set_text(&mut self, element: Element, text: &str);

    /// The page's current absolute URL.
    fn location(&self) -> String;

    /// Replaces the current history entry's URL without navigating.
    fn replace_location(&mut self, url: &str);

    /// Navigates to another page.
    fn navigate(&mut self, url: &str);

    /// Page-provided results-count template, if the host set one.
    fn title_template(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    value: String,
    html: String,
}

/// An in-memory page.
///
/// Records every history replacement and navigation so callers can check
/// exactly what the engine did.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    nodes: HashMap<Element, Node>,
    location: String,
    history_len: usize,
    replacements: Vec<String>,
    navigations: Vec<String>,
    title_template: Option<String>,
}

impl MemoryPage {
    /// An empty page at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            history_len: 1,
            ..Self::default()
        }
    }

    /// A results page with the full results surface.
    pub fn results_page(location: impl Into<String>) -> Self {
        Self::new(location).with(&[
            Element::ResultsForm,
            Element::ResultsInput,
            Element::ResultsList,
            Element::ResultsTitle,
        ])
    }

    /// A content page with only the header quick search.
    pub fn header_page(location: impl Into<String>) -> Self {
        Self::new(location).with(&[Element::HeaderForm, Element::HeaderInput])
    }

    /// Adds elements to the page.
    pub fn with(mut self, elements: &[Element]) -> Self {
        for element in elements {
            self.nodes.entry(*element).or_default();
        }
        self
    }

    /// Sets the page-level results-count template.
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = Some(template.into());
        self
    }

    /// Inner HTML (or text) of an element.
    pub fn html(&self, element: Element) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.html.as_str())
    }

    /// URLs written by [`Page::replace_location`], oldest first.
    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    /// URLs passed to [`Page::navigate`], oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history_len
    }
}

impl Page for MemoryPage {
    fn has(&self, element: Element) -> bool {
        self.nodes.contains_key(&element)
    }

    fn value(&self, element: Element) -> Option<String> {
        self.nodes.get(&element).map(|n| n.value.clone())
    }

    fn set_value(&mut self, element: Element, value: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.value = value.to_string();
        }
    }

    fn set_inner_html(&mut self, element: Element, html: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.html = html.to_string();
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.html = crate::highlight::escape_html(text);
        }
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    fn replace_location(&mut self, url: &str) {
        self.location = url.to_string();
        self.replacements.push(url.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.location = url.to_string();
        self.history_len += 1;
        self.navigations.push(url.to_string());
    }

    fn title_template(&self) -> Option<String> {
        self.title_template.clone()
    }
}
