//! Vendor adapter registry.
//!
//! One adapter per ticket site, binding that site's markup and pagination
//! quirks to the generic driver/snapshot/extractor pipeline. Adding a
//! vendor means adding one module with selectors and an extraction function
//! plus one registry entry — the scroll loop itself never changes.

mod ticketnetwork;
mod tickpick;
mod vividseats;

use std::time::Duration;

use seatscan_core::ListingRecord;

pub use ticketnetwork::TICKETNETWORK;
pub use tickpick::{TICKPICK, TICKPICK_STEALTH};
pub use vividseats::VIVIDSEATS;

/// How an adapter advances through a virtualized listing container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// Scroll the container to its own bottom each iteration; stop when the
    /// measured height stalls.
    ScrollToBottom,
    /// Like [`Self::ScrollToBottom`], but a stalled height consults a
    /// "load more" control: visible → click and keep going, absent or
    /// hidden → done.
    ScrollThenClickMore { button: &'static str },
    /// Scroll a fixed-height container by a pixel increment per iteration;
    /// stop when the accumulated offset reaches the measured height.
    ScrollByIncrement { step: i64 },
}

/// Immutable per-vendor configuration, created once at process start.
pub struct VendorAdapter {
    pub name: &'static str,
    /// Upstream platform id carried through from the multi-event service.
    pub platform_id: u16,
    /// Registrable host this adapter handles, without a `www.` prefix.
    pub host: &'static str,
    /// The scrollable or virtualized region holding listings.
    pub scroll_container: &'static str,
    /// Candidate listing elements enumerated on every snapshot pass.
    pub listing_selector: &'static str,
    pub strategy: PaginationStrategy,
    /// Whether the scroll container must appear before the loop starts.
    /// When set, a container that never appears is a fatal
    /// `SelectorNotFound`; when unset the loop tolerates its absence.
    pub await_container: bool,
    /// Wait after navigation for client-side rendering to settle.
    pub initial_settle: Duration,
    /// Wait after each scroll advance before re-measuring.
    pub iteration_settle: Duration,
    /// Short re-check delay consumed by each stall-tolerance retry.
    pub stall_settle: Duration,
    /// How many equal-extent measurements to re-check before concluding the
    /// container has stabilized. Site rendering latency differs; this is
    /// per-adapter, not universal.
    pub stall_tolerance: u32,
    pub nav_timeout: Duration,
    /// Wall-clock cutoff for one driver run. Exhaustion wins over continued
    /// growth: a pathologically long-loading page is cut off, not looped.
    pub session_budget: Duration,
    /// Iteration cutoff, guarding against a page whose measured extent
    /// never stops moving.
    pub max_iterations: u32,
    /// Launch the browser with the stealth profile for this vendor.
    pub stealth: bool,
    /// Pure extraction over one serialized listing element. Malformed
    /// markup yields absent fields, never a failure.
    pub extract: fn(&str) -> ListingRecord,
}

impl std::fmt::Debug for VendorAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorAdapter")
            .field("name", &self.name)
            .field("platform_id", &self.platform_id)
            .field("host", &self.host)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Registered adapters, in detection priority order.
static REGISTRY: [&VendorAdapter; 4] = [&TICKPICK, &TICKPICK_STEALTH, &VIVIDSEATS, &TICKETNETWORK];

/// Every registered adapter, in detection priority order.
#[must_use]
pub fn all() -> &'static [&'static VendorAdapter] {
    &REGISTRY
}

/// Looks an adapter up by its registry name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static VendorAdapter> {
    all().iter().find(|a| a.name == name).copied()
}

/// Detects the adapter for an event URL by host. The first matching entry
/// wins, so a site's default adapter is registered before its variants.
#[must_use]
pub fn for_event_url(event_url: &str) -> Option<&'static VendorAdapter> {
    let host = host_of(event_url)?;
    all()
        .iter()
        .find(|a| host == a.host || host.ends_with(&format!(".{}", a.host)))
        .copied()
}

/// Extracts the lowercased host from a URL, without scheme, port, path, or
/// a leading `www.`.
fn host_of(url: &str) -> Option<String> {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host_port = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(after_scheme);
    let host = host_port.split(':').next().unwrap_or(host_port);
    let host = host.strip_prefix("www.").unwrap_or(host).to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
