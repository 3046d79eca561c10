// src/utils/html.rs

//! Positional accessors for the event pages.
//!
//! The event listing and detail pages carry no semantic markup, so fields
//! are located by row, cell and input order. Every such lookup lives here.

use scraper::{ElementRef, Html, Selector};

use crate::error::{GvpError, Result};

/// Parse a CSS selector.
pub fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| GvpError::selector(s, format!("{e:?}")))
}

/// Collect an element's text with whitespace collapsed.
pub fn text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All elements of the document matching `css`.
pub fn select_all<'a>(document: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).collect())
}

/// Direct `td` children of a table row, in order.
pub fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

/// The `n`-th element matching `css` inside `scope`.
pub fn nth<'a>(
    scope: ElementRef<'a>,
    css: &str,
    n: usize,
    context: &str,
) -> Result<ElementRef<'a>> {
    let sel = selector(css)?;
    scope.select(&sel).nth(n).ok_or_else(|| {
        GvpError::decoding(context, format!("missing element #{n} matching '{css}'"))
    })
}

/// An attribute that must be present.
pub fn attr<'a>(element: ElementRef<'a>, name: &str, context: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| GvpError::decoding(context, format!("missing attribute '{name}'")))
}

/// Value of the `n`-th text-like input in `scope`, trimmed. A missing
/// `value` attribute reads as empty.
pub fn input_value(scope: ElementRef<'_>, n: usize, context: &str) -> Result<String> {
    let input = nth(scope, "input:not([type=checkbox]):not([type=radio])", n, context)?;
    Ok(input.value().attr("value").unwrap_or("").trim().to_string())
}

/// Text content of the `n`-th textarea in `scope`, trimmed.
pub fn textarea_text(scope: ElementRef<'_>, n: usize, context: &str) -> Result<String> {
    let area = nth(scope, "textarea", n, context)?;
    let raw: String = area.text().collect();
    Ok(raw.trim().to_string())
}

/// Value of the selected `option` in `scope`.
pub fn selected_option(scope: ElementRef<'_>, context: &str) -> Result<String> {
    let option = nth(scope, "option[selected]", 0, context)?;
    attr(option, "value", context).map(|v| v.trim().to_string())
}

/// Value of the checked radio button in `scope`, if any.
pub fn checked_radio(scope: ElementRef<'_>, context: &str) -> Result<Option<String>> {
    let sel = selector("input[type=radio][checked]")?;
    scope
        .select(&sel)
        .next()
        .map(|input| attr(input, "value", context).map(|v| v.trim().to_string()))
        .transpose()
}

/// Whether the `n`-th checkbox in `scope` is checked.
pub fn checkbox_checked(scope: ElementRef<'_>, n: usize, context: &str) -> Result<bool> {
    let input = nth(scope, "input[type=checkbox]", n, context)?;
    Ok(input.value().attr("checked").is_some())
}

/// Split a comma separated list, dropping blank entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
