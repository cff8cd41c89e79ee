//! Risk-term highlighting over rendered clause lines
//!
//! Terms are matched case-insensitively as literal substrings. All match
//! spans are computed against the original line text, merged, and rendered
//! in a single pass, so the output does not depend on term order and a
//! term can never re-match inside markup inserted for another term.

use regex::Regex;
use serde_json::Value;

use crate::markup::escape_html;

/// Prefix of the legacy annotation node, e.g. "Risk terms: penalty, late fee"
const ANNOTATION_PREFIX: &str = "Risk terms: ";

/// Half-open byte range over the original line text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Parse the legacy annotation node text into an ordered term list.
/// Splitting on ", " means a term containing a comma arrives split; the
/// structured attribute transport avoids that.
pub fn parse_terms_annotation(annotation: &str) -> Vec<String> {
    let trimmed = annotation.trim();
    let rest = trimmed.strip_prefix(ANNOTATION_PREFIX).unwrap_or(trimmed);
    rest.split(", ")
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `data-risk-terms` attribute holding a JSON array of strings.
/// Returns None for any payload that is not a string array.
pub fn parse_terms_attribute(raw: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let items = value.as_array()?;
    let mut terms = Vec::with_capacity(items.len());
    for item in items {
        terms.push(item.as_str()?.to_string());
    }
    Some(terms.into_iter().filter(|term| !term.is_empty()).collect())
}

/// Every case-insensitive occurrence of `term` in `text`, as literal
/// characters: the term is regex-escaped before matching.
fn find_spans(text: &str, term: &str) -> Vec<Span> {
    if term.is_empty() {
        return Vec::new();
    }
    let pattern = format!("(?i){}", regex::escape(term));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    re.find_iter(text)
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Collapse overlapping or adjacent spans into one
fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by_key(|span| (span.start, span.end));
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Merged spans of every term occurrence in `text`, in text order
pub fn term_spans(text: &str, terms: &[String]) -> Vec<Span> {
    let mut spans = Vec::new();
    for term in terms {
        spans.extend(find_spans(text, term));
    }
    merge_spans(spans)
}

/// Render `text` with every merged term occurrence wrapped in
/// `<mark>…</mark>`. Text segments are HTML-escaped, so the result is safe
/// to assign to innerHTML.
pub fn highlight_line(text: &str, terms: &[String]) -> String {
    let spans = term_spans(text, terms);

    let mut out = String::with_capacity(text.len() + spans.len() * 13);
    let mut cursor = 0;
    for span in &spans {
        out.push_str(&escape_html(&text[cursor..span.start]));
        out.push_str("<mark>");
        out.push_str(&escape_html(&text[span.start..span.end]));
        out.push_str("</mark>");
        cursor = span.end;
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}
