//! Engine-facing traits: the live page and the debug-artifact sink.
//!
//! The pipeline never talks to a browser directly. Everything it needs from
//! the rendering engine is expressed here, so the driver and session run
//! identically against chromiumoxide in production and scripted fakes in
//! tests.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::EngineError;

/// A live, rendered listing page.
///
/// All methods are read-or-command operations against the live DOM; none of
/// them parse markup. The single live-DOM-to-static-markup boundary crossing
/// is [`ListingPage::outer_html_all`], after which extraction is pure.
#[async_trait]
pub trait ListingPage: Send + Sync {
    /// Navigates to `url` and waits for the page's base load state.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), EngineError>;

    /// Waits until at least one element matches `selector`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), EngineError>;

    /// Measures the scroll extent of the container matched by `selector`.
    ///
    /// Returns `None` when the container is not currently in the DOM —
    /// expected mid-load, not an error.
    async fn scroll_extent(&self, selector: &str) -> Result<Option<i64>, EngineError>;

    /// Scrolls the container to its own bottom.
    async fn scroll_to_bottom(&self, selector: &str) -> Result<(), EngineError>;

    /// Scrolls the container to an absolute vertical offset.
    async fn scroll_to(&self, selector: &str, offset: i64) -> Result<(), EngineError>;

    /// Returns `true` when an element matches `selector` and is not
    /// `display: none`.
    async fn is_visible(&self, selector: &str) -> Result<bool, EngineError>;

    /// Clicks the first element matching `selector`.
    ///
    /// Fails when the element is gone or no longer interactable; the driver
    /// treats that as end-of-listings, not a session failure.
    async fn click(&self, selector: &str) -> Result<(), EngineError>;

    /// Serializes the outer HTML of every element matching `selector`,
    /// in document order.
    async fn outer_html_all(&self, selector: &str) -> Result<Vec<String>, EngineError>;

    /// Captures a full-page screenshot to `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), EngineError>;

    /// Releases the page. Invoked exactly once per session, on every exit
    /// path.
    async fn close(&self) -> Result<(), EngineError>;
}

/// Durable sink for failure screenshots.
///
/// Fire-and-forget: `store` returns the public URL on success and `None` on
/// any failure. It must never propagate an error — artifact upload problems
/// never mask the scrape failure being reported.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn store(&self, local_path: &Path) -> Option<String>;
}
