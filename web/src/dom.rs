//! `Page` over the live document.

use std::collections::HashMap;

use site_search::{Element, Page};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement, Window};

/// The browser page, with every search element found at start-up.
pub struct DomPage {
    window: Window,
    elements: HashMap<Element, web_sys::Element>,
}

impl DomPage {
    /// Looks up every search element in `window`'s document.
    pub fn discover(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let elements = Element::ALL
            .into_iter()
            .filter_map(|element| lookup(&document, element).map(|node| (element, node)))
            .collect();
        Ok(Self { window, elements })
    }

    /// A discovered element, for attaching listeners.
    pub fn element(&self, element: Element) -> Option<&web_sys::Element> {
        self.elements.get(&element)
    }
}

/// The results form is the one around `#search-input`, so a header form
/// earlier in the document is never mistaken for it.
fn lookup(document: &Document, element: Element) -> Option<web_sys::Element> {
    match element {
        Element::ResultsForm => document
            .get_element_by_id("search-input")?
            .closest(element.selector())
            .ok()
            .flatten(),
        _ => document.query_selector(element.selector()).ok().flatten(),
    }
}

impl Page for DomPage {
    fn has(&self, element: Element) -> bool {
        self.elements.contains_key(&element)
    }

    fn value(&self, element: Element) -> Option<String> {
        self.elements
            .get(&element)?
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
    }

    fn set_value(&mut self, element: Element, value: &str) {
        if let Some(input) = self
            .elements
            .get(&element)
            .and_then(|node| node.dyn_ref::<HtmlInputElement>())
        {
            input.set_value(value);
        }
    }

    fn set_inner_html(&mut self, element: Element, html: &str) {
        if let Some(node) = self.elements.get(&element) {
            node.set_inner_html(html);
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if let Some(node) = self.elements.get(&element) {
            node.set_text_content(Some(text));
        }
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn replace_location(&mut self, url: &str) {
        let replaced = self
            .window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = replaced {
            tracing::warn!(url, "history.replaceState failed: {e:?}");
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::error!(url, "navigation failed: {e:?}");
        }
    }

    fn title_template(&self) -> Option<String> {
        js_sys::Reflect::get(&self.window, &JsValue::from_str("searchResultTitleTemplate"))
            .ok()
            .and_then(|value| value.as_string())
    }
}
