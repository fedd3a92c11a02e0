//! TickPick adapter.
//!
//! Listings live in `#listingContainer` as its direct child cards while the
//! scrollable region is the sibling `#listings` element. The page keeps a
//! `#viewMoreListingsButton` control that must be clicked once scrolling
//! alone stops producing growth; the button disappears (or goes
//! `display: none`) at the true end of the listings.

use std::time::Duration;

use seatscan_core::ListingRecord;

use crate::extract::{parse_fragment, select_text};
use crate::normalize::{clean_price, split_compound_label, strip_label_prefix};

use super::{PaginationStrategy, VendorAdapter};

const TICKPICK_BASE: VendorAdapter = VendorAdapter {
    name: "tickpick",
    platform_id: 4,
    host: "tickpick.com",
    scroll_container: "#listings",
    listing_selector: "#listingContainer > div",
    strategy: PaginationStrategy::ScrollThenClickMore {
        button: "#viewMoreListingsButton",
    },
    await_container: false,
    initial_settle: Duration::from_secs(20),
    iteration_settle: Duration::from_secs(1),
    stall_settle: Duration::from_secs(1),
    stall_tolerance: 1,
    nav_timeout: Duration::from_secs(60),
    session_budget: Duration::from_secs(480),
    max_iterations: 200,
    stealth: false,
    extract: extract_listing,
};

pub static TICKPICK: VendorAdapter = TICKPICK_BASE;

/// Same site and markup, launched with the stealth browser profile. Kept as
/// a separate registry entry so the fallback can be selected explicitly
/// when the default profile starts getting blocked.
pub static TICKPICK_STEALTH: VendorAdapter = VendorAdapter {
    name: "tickpick-stealth",
    stealth: true,
    ..TICKPICK_BASE
};

/// Extracts one TickPick listing card.
///
/// The combined section/row label renders as `"Section 114 • Row 5"` (the
/// `Section` prefix and the row half are both optional); price is the bold
/// figure inside the card's label; quantity is the preselected option of
/// the card's quantity dropdown, passed through as-is.
fn extract_listing(markup: &str) -> ListingRecord {
    let fragment = parse_fragment(markup);

    let price = select_text(&fragment, "div > label > b:first-of-type")
        .as_deref()
        .and_then(clean_price);
    let quantity = select_text(
        &fragment,
        "div > div:nth-of-type(1) > select > option:first-of-type",
    );

    let combined = select_text(&fragment, "div > div:nth-of-type(2) > div:first-of-type > span");
    let (section, row) = combined
        .as_deref()
        .map_or((None, None), split_compound_label);
    let section = section
        .as_deref()
        .and_then(|s| strip_label_prefix(s, "Section"));

    ListingRecord {
        section,
        row,
        quantity,
        price,
    }
}
