//! Post-render enhancement of the results page
//!
//! The page arrives fully server-rendered; the annotator augments it in
//! place. Toggle state stays in the DOM and is read fresh on every click,
//! never cached across events.

use clauselens_core::{highlight, summary};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

const TOGGLE_SELECTOR: &str = ".toggle-btn";
const RISK_LINE_SELECTOR: &str = ".risk-lines-list li";
const LINE_TEXT_SELECTOR: &str = ".line-text";
const TERMS_NODE_SELECTOR: &str = ".risk-terms";
const TERMS_ATTR: &str = "data-risk-terms";
const HIDDEN_CLASS: &str = "hidden";

const SHOW_LABEL: &str = "Show Full Text";
const HIDE_LABEL: &str = "Hide Full Text";

const TOTAL_SELECTOR: &str = ".stat:first-child p";
const LEVEL_SELECTORS: [&str; 3] = [".high-risk p", ".medium-risk p", ".low-risk p"];

pub struct ResultAnnotator;

impl ResultAnnotator {
    /// Run all three enhancements once, in sequence
    pub fn annotate(document: &Document) -> Result<(), JsValue> {
        Self::wire_toggles(document)?;
        Self::highlight_risk_terms(document)?;
        Self::annotate_summary_percentages(document)?;
        Ok(())
    }

    /// Attach a show/hide handler to every clause toggle control
    pub fn wire_toggles(document: &Document) -> Result<(), JsValue> {
        let buttons = document.query_selector_all(TOGGLE_SELECTOR)?;
        for index in 0..buttons.length() {
            let Some(button) = buttons
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let on_click = Closure::wrap(Box::new(move |event: Event| {
                toggle_full_text(&event);
            }) as Box<dyn FnMut(Event)>);
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }
        Ok(())
    }

    /// Wrap risk terms in `<mark>` inside every annotated line.
    /// Lines without a term annotation are left untouched.
    pub fn highlight_risk_terms(document: &Document) -> Result<(), JsValue> {
        let lines = document.query_selector_all(RISK_LINE_SELECTOR)?;
        for index in 0..lines.length() {
            let Some(line) = lines
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(terms) = risk_terms_for(&line) else {
                continue;
            };
            if terms.is_empty() {
                continue;
            }
            let Some(text_el) = line.query_selector(LINE_TEXT_SELECTOR)? else {
                continue;
            };
            let text = text_el.text_content().unwrap_or_default();
            text_el.set_inner_html(&highlight::highlight_line(&text, &terms));
        }
        Ok(())
    }

    /// Append each risk level's share of the total to its counter.
    /// An absent, unparseable, or zero total leaves every counter as
    /// rendered; a malformed level counter is skipped on its own.
    pub fn annotate_summary_percentages(document: &Document) -> Result<(), JsValue> {
        let Some(total_el) = document.query_selector(TOTAL_SELECTOR)? else {
            return Ok(());
        };
        let total = summary::parse_leading_count(&total_el.text_content().unwrap_or_default());
        let Some(total) = total else {
            return Ok(());
        };
        if total == 0 {
            return Ok(());
        }

        for selector in LEVEL_SELECTORS {
            let Some(counter) = document.query_selector(selector)? else {
                continue;
            };
            let text = counter.text_content().unwrap_or_default();
            let Some(count) = summary::parse_leading_count(&text) else {
                continue;
            };
            if let Some(markup) = summary::counter_markup(count, total) {
                counter.set_inner_html(&markup);
            }
        }
        Ok(())
    }
}

/// Flip the panel following the clicked control and match its label to
/// the new state. Panel state is read from the DOM at click time.
fn toggle_full_text(event: &Event) {
    let Some(button) = event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return;
    };
    let Some(panel) = button.next_element_sibling() else {
        return;
    };

    let was_hidden = panel.class_list().contains(HIDDEN_CLASS);
    if was_hidden {
        let _ = panel.class_list().remove_1(HIDDEN_CLASS);
    } else {
        let _ = panel.class_list().add_1(HIDDEN_CLASS);
    }
    button.set_text_content(Some(if was_hidden { HIDE_LABEL } else { SHOW_LABEL }));
}

/// Risk terms for a line: the structured attribute wins; the legacy
/// "Risk terms: ..." node is the fallback. None means nothing to
/// highlight.
fn risk_terms_for(line: &Element) -> Option<Vec<String>> {
    if let Some(raw) = line.get_attribute(TERMS_ATTR) {
        if let Some(terms) = highlight::parse_terms_attribute(&raw) {
            return Some(terms);
        }
    }
    let node = line.query_selector(TERMS_NODE_SELECTOR).ok().flatten()?;
    Some(highlight::parse_terms_annotation(
        &node.text_content().unwrap_or_default(),
    ))
}
