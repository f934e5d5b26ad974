//! Browser binding for site search.
//!
//! Loads the article index, binds the engine to the page's search forms and
//! wires the DOM events:
//! - header form submit: redirect to the results page
//! - results form submit: search now
//! - results input: search after the debounce quiet period
//!
//! The host page may set `window.siteSearchConfig` (an object with
//! `SearchConfig` fields) and `window.searchResultTitleTemplate` before the
//! module runs. Module scripts execute after parsing, so every element is in
//! the document by the time [`start`] runs.
//!
//! This crate is WASM-only.

#![cfg(target_arch = "wasm32")]

mod dom;
mod fetch;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use site_search::{Element, Mode, SearchConfig, SearchEngine};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

pub use dom::DomPage;
pub use fetch::FetchSource;

type Engine = Rc<RefCell<SearchEngine<DomPage>>>;

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() {
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = boot().await {
            tracing::error!("search engine failed to start: {e:?}");
        }
    });
}

async fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let config = page_config(&window);
    let source = FetchSource::new(window.clone(), config.index_path.clone());
    let page = DomPage::discover(window.clone())?;

    let header_form = page.element(Element::HeaderForm).cloned();
    let results_form = page.element(Element::ResultsForm).cloned();
    let results_input = page.element(Element::ResultsInput).cloned();

    let engine = SearchEngine::start(&source, page, config).await;
    let targets = engine.targets();
    let engine: Engine = Rc::new(RefCell::new(engine));

    if targets.header {
        if let Some(form) = header_form {
            bind_header(&form, &engine)?;
        }
    }
    if targets.mode == Mode::InPlace {
        if let (Some(form), Some(input)) = (results_form, results_input) {
            bind_results(&window, &form, &input, &engine)?;
        }
    }
    Ok(())
}

/// Reads `window.siteSearchConfig`, falling back to the defaults.
fn page_config(window: &Window) -> SearchConfig {
    let value = match js_sys::Reflect::get(window, &JsValue::from_str("siteSearchConfig")) {
        Ok(value) if value.is_object() => value,
        _ => return SearchConfig::default(),
    };
    let parsed = js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|json| json.as_string())
        .map(|json| SearchConfig::from_json_str(&json));
    match parsed {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("ignoring siteSearchConfig: {e}");
            SearchConfig::default()
        }
        None => SearchConfig::default(),
    }
}

fn bind_header(form: &web_sys::Element, engine: &Engine) -> Result<(), JsValue> {
    let engine = engine.clone();
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        engine.borrow_mut().submit_header();
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn bind_results(
    window: &Window,
    form: &web_sys::Element,
    input: &web_sys::Element,
    engine: &Engine,
) -> Result<(), JsValue> {
    // Handle of the armed browser timer, if any.
    let timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let on_submit = {
        let engine = engine.clone();
        let timer = timer.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            if let Some(handle) = timer.take() {
                window.clear_timeout_with_handle(handle);
            }
            engine.borrow_mut().submit_results();
        }) as Box<dyn FnMut(Event)>)
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    let on_input = {
        let engine = engine.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            if let Some(handle) = timer.take() {
                window.clear_timeout_with_handle(handle);
            }
            let Some(scheduled) = engine.borrow_mut().input(now()) else {
                return;
            };

            let fire = {
                let engine = engine.clone();
                let timer = timer.clone();
                Closure::once_into_js(move || {
                    timer.set(None);
                    engine.borrow_mut().fire(scheduled.ticket);
                })
            };
            let delay = i32::try_from(scheduled.delay.as_millis()).unwrap_or(i32::MAX);
            let armed = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), delay);
            match armed {
                Ok(handle) => timer.set(Some(handle)),
                Err(e) => tracing::error!("setTimeout failed: {e:?}"),
            }
        }) as Box<dyn FnMut(Event)>)
    };
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(())
}

fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
}
