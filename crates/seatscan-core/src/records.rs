use serde::{Deserialize, Serialize};

/// One ticket offer scraped from a vendor listing page.
///
/// ## Observed shape from live vendor pages
///
/// All four fields are display text exactly as rendered; no numeric coercion
/// is applied anywhere in the pipeline.
///
/// - `section` is usually a short token (`"114"`, `"GA"`), already stripped
///   of any literal `"Section"` prefix by the vendor's extraction rules.
/// - `row` is absent for general-admission sections.
/// - `quantity` is normalized to the upper bound of whatever the page showed
///   (`"2 or 4 Tickets"` → `"4"`), but remains a string.
/// - `price` is a decimal-looking string with the currency glyph stripped
///   (`"$125.00"` → `"125.00"`). A record without a price is never a valid
///   terminal result; the session filters those before returning.
///
/// Two records are equal iff all four fields are equal as strings (`None`
/// included). That full-value equality is the deduplication identity: the
/// source markup carries no stable listing id, and repeated passes over a
/// virtualized list re-render previously seen rows verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingRecord {
    pub section: Option<String>,
    pub row: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl ListingRecord {
    /// Returns `true` when every field is absent.
    ///
    /// Fully-empty records can come out of a malformed listing element; they
    /// are admitted (so the accumulator stays a pure value set) but never
    /// survive the session's final filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section.is_none() && self.row.is_none() && self.quantity.is_none() && self.price.is_none()
    }

    /// Returns `true` when the record carries a price.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}
