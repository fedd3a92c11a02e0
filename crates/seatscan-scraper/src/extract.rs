//! Fragment selection helpers shared by the vendor row extractors.
//!
//! Extraction runs over the serialized outer HTML of one listing element —
//! a snapshot, never the live DOM — so these helpers operate on a parsed
//! [`scraper::Html`] fragment. Every selection may come up empty; helpers
//! return `None` instead of failing, and the per-row extractors compose the
//! results into partial records.

use scraper::{Html, Selector};

use crate::normalize::non_empty;

/// Parses one serialized listing element.
pub(crate) fn parse_fragment(markup: &str) -> Html {
    Html::parse_fragment(markup)
}

/// Parses a `<tr>` listing element.
///
/// html5ever drops table-row elements parsed outside a table context, so
/// the fragment is rewrapped before parsing to keep `tr`/`td` selectable.
pub(crate) fn parse_table_row_fragment(markup: &str) -> Html {
    Html::parse_fragment(&format!("<table><tbody>{markup}</tbody></table>"))
}

/// Text content of the first element matching `selector`, trimmed;
/// `None` when nothing matches or the text trims to nothing.
pub(crate) fn select_text(fragment: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = fragment.select(&selector).next()?;
    non_empty(&element.text().collect::<String>())
}

/// Attribute value of the first element matching `selector`.
pub(crate) fn select_attr(fragment: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = fragment.select(&selector).next()?;
    element.value().attr(attr).and_then(non_empty)
}

/// Text content of the `index`-th element (document order, zero-based)
/// matching `selector`.
pub(crate) fn select_text_nth(fragment: &Html, selector: &str, index: usize) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = fragment.select(&selector).nth(index)?;
    non_empty(&element.text().collect::<String>())
}

/// Direct text nodes of the first element matching `selector`, excluding
/// text inside child elements. Used where a label wraps a decorative inner
/// element ahead of the text that matters.
pub(crate) fn select_own_text(fragment: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = fragment.select(&selector).next()?;
    let own: String = element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.text.to_string()))
        .collect();
    non_empty(&own)
}
