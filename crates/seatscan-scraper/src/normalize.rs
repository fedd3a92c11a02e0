//! Tolerant text normalization over loosely structured listing labels.
//!
//! Vendor pages render section, row, quantity, and price as display text
//! with decorative prefixes, unit words, and separator glyphs. These rules
//! are small, composable, and pure — each vendor's extractor picks the ones
//! its markup needs. None of them touch a DOM.

/// Unit words trailing a quantity, longest first so `"Ticket Packages"` is
/// consumed before `"Ticket"` would match inside it.
const QUANTITY_UNITS: &[&str] = &["Ticket Packages", "Tickets", "Ticket", "tickets", "ticket"];

/// Returns the trimmed input, or `None` when it trims to nothing.
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Strips a leading currency glyph and trims. String passthrough otherwise —
/// no numeric validation.
///
/// `"$125.00"` → `"125.00"`.
pub(crate) fn clean_price(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let without_glyph = trimmed.strip_prefix('$').unwrap_or(trimmed);
    non_empty(without_glyph)
}

/// Strips a literal prefix word (`"Section"`, `"Row"`) plus following
/// whitespace; inputs without the prefix pass through trimmed.
///
/// `"Section 114"` → `"114"`, `"Row 5"` → `"5"`, `"114"` → `"114"`.
pub(crate) fn strip_label_prefix(raw: &str, prefix: &str) -> Option<String> {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix(prefix)
        .map_or(trimmed, str::trim_start);
    non_empty(rest)
}

/// Splits a compound `section • row` label on the separator glyph.
///
/// `"114 • Row 5"` → (`Some("114")`, `Some("5")`). Labels without the glyph
/// are all section: `"General Admission"` → (`Some(..)`, `None`). The row
/// side has its literal `"Row"` prefix stripped.
pub(crate) fn split_compound_label(raw: &str) -> (Option<String>, Option<String>) {
    match raw.split_once('•') {
        Some((left, right)) => (non_empty(left), strip_label_prefix(right, "Row")),
        None => (non_empty(raw), None),
    }
}

/// Normalizes a quantity that may encode a single count, a bounded range
/// (`"1-2"`, `"2 or 4"`), or packages. Unit words are stripped; a range
/// keeps its upper-bound token.
///
/// `"2 or 4 Tickets"` → `"4"`, `"1-2 Ticket"` → `"2"`, `"3"` → `"3"`.
pub(crate) fn upper_bound_quantity(raw: &str) -> Option<String> {
    let mut text = raw.trim().to_owned();
    for unit in QUANTITY_UNITS {
        text = text.replace(unit, "");
    }
    let text = text.trim();

    let upper = if let Some((_, right)) = text.split_once(" or ") {
        right
    } else if let Some(split_at) = text.rfind(['-', '–']) {
        let sep_len = text[split_at..].chars().next().map_or(1, char::len_utf8);
        &text[split_at + sep_len..]
    } else {
        text
    };

    non_empty(upper)
}

/// Picks the section token out of a compound label whose leading tokens name
/// the section (`"Upper Level 114 • Row 5 • 2 Tickets"` → `"114"`).
///
/// Tokens are split on whitespace; everything from the first separator glyph
/// on is ignored, and the last remaining token (capped at four, matching the
/// widest observed label) is the section.
pub(crate) fn trailing_section_token(raw: &str) -> Option<String> {
    raw.split_whitespace()
        .take_while(|token| *token != "•")
        .take(4)
        .last()
        .and_then(non_empty)
}
