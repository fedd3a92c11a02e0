//! TicketNetwork adapter.
//!
//! Listings render as table rows under `#content-area` inside the
//! fixed-height `#venue-ticket-list` panel. The panel does not grow on its
//! own: the driver walks it in 2000px steps and re-extracts every
//! iteration, finishing once the accumulated offset has covered the
//! measured height. The panel is required markup — a page where it never
//! appears is a broken scrape, not an empty one.

use std::time::Duration;

use seatscan_core::ListingRecord;

use crate::extract::{parse_table_row_fragment, select_own_text, select_text, select_text_nth};
use crate::normalize::{
    clean_price, strip_label_prefix, trailing_section_token, upper_bound_quantity,
};

use super::{PaginationStrategy, VendorAdapter};

pub static TICKETNETWORK: VendorAdapter = VendorAdapter {
    name: "ticketnetwork",
    platform_id: 3,
    host: "ticketnetwork.com",
    scroll_container: "#venue-ticket-list",
    listing_selector: "#content-area > tr",
    strategy: PaginationStrategy::ScrollByIncrement { step: 2000 },
    await_container: true,
    initial_settle: Duration::from_secs(10),
    iteration_settle: Duration::from_secs(5),
    stall_settle: Duration::from_secs(1),
    stall_tolerance: 0,
    nav_timeout: Duration::from_secs(60),
    session_budget: Duration::from_secs(480),
    max_iterations: 500,
    stealth: false,
    extract: extract_listing,
};

/// Extracts one TicketNetwork listing row.
///
/// The first cell opens with a compound label whose leading tokens name the
/// section (`"Upper Level 114 • ..."`); row is the third span of the cell's
/// detail block; quantity is the text trailing the icon span inside the
/// cell's fourth child.
fn extract_listing(markup: &str) -> ListingRecord {
    let fragment = parse_table_row_fragment(markup);

    let section = select_text(&fragment, "td:nth-child(1) span:nth-child(1)")
        .as_deref()
        .and_then(trailing_section_token);

    let row = select_text_nth(&fragment, "td div span", 2)
        .as_deref()
        .and_then(|t| strip_label_prefix(t, "Row"));

    let quantity = select_own_text(&fragment, "td:nth-child(1) span:nth-child(4)")
        .as_deref()
        .and_then(upper_bound_quantity);

    let price = select_text(&fragment, "td:nth-child(3) span:nth-child(2)")
        .as_deref()
        .and_then(clean_price);

    ListingRecord {
        section,
        row,
        quantity,
        price,
    }
}
