//! VividSeats adapter.
//!
//! The listings panel is a virtualized `[data-testid="listings-container"]`
//! region that keeps growing as it is scrolled to the bottom; there is no
//! "load more" control, so the first stalled height measurement is
//! terminal. Sessions are capped at eight minutes — some productions
//! render thousands of rows and never quite settle.

use std::time::Duration;

use seatscan_core::ListingRecord;

use crate::extract::{parse_fragment, select_attr, select_text};
use crate::normalize::{clean_price, strip_label_prefix, upper_bound_quantity};

use super::{PaginationStrategy, VendorAdapter};

pub static VIVIDSEATS: VendorAdapter = VendorAdapter {
    name: "vividseats",
    platform_id: 2,
    host: "vividseats.com",
    scroll_container: r#"[data-testid="listings-container"]"#,
    listing_selector: "#row-container",
    strategy: PaginationStrategy::ScrollToBottom,
    await_container: false,
    initial_settle: Duration::from_secs(5),
    iteration_settle: Duration::from_secs(5),
    stall_settle: Duration::from_secs(1),
    stall_tolerance: 0,
    nav_timeout: Duration::from_secs(60),
    session_budget: Duration::from_secs(480),
    max_iterations: 200,
    stealth: false,
    extract: extract_listing,
};

/// Extracts one VividSeats listing row.
///
/// Section comes from the seat-map button's `data-sectionid` attribute; the
/// first deep span renders `"Row 5 | 2 or 4 tickets"` and carries both row
/// and quantity around the pipe.
fn extract_listing(markup: &str) -> ListingRecord {
    let fragment = parse_fragment(markup);

    let section = select_attr(&fragment, "div[role='button']", "data-sectionid");

    let row_and_quantity = select_text(&fragment, "div div div div div span");
    let (row, quantity) = match row_and_quantity.as_deref().and_then(|t| t.split_once('|')) {
        Some((left, right)) => (
            strip_label_prefix(left, "Row"),
            upper_bound_quantity(right),
        ),
        None => (None, None),
    };

    let price = select_text(
        &fragment,
        "div > div:nth-child(3) > div > div:last-child > span",
    )
    .as_deref()
    .and_then(clean_price);

    ListingRecord {
        section,
        row,
        quantity,
        price,
    }
}
