//! Session orchestration: navigate, settle, drive, validate, tear down.

use std::path::PathBuf;

use uuid::Uuid;

use seatscan_core::ListingRecord;

use crate::accumulator::ResultAccumulator;
use crate::driver::ScrollDriver;
use crate::error::ScrapeError;
use crate::page::{ArtifactSink, ListingPage};
use crate::vendors::VendorAdapter;

/// Collaborators and paths for one session.
pub struct SessionOptions<'a> {
    /// Failure screenshots are handed here when present.
    pub artifact_sink: Option<&'a dyn ArtifactSink>,
    /// Where failure screenshots land before upload.
    pub screenshot_dir: PathBuf,
}

impl Default for SessionOptions<'_> {
    fn default() -> Self {
        Self {
            artifact_sink: None,
            screenshot_dir: PathBuf::from("/tmp"),
        }
    }
}

/// Runs one complete scraping session against an already-acquired page.
///
/// Sequence: navigate with a bounded timeout, wait out the initial settle
/// delay, run the scroll driver to stabilization, filter price-less
/// records, and reject an empty result. The page is closed exactly once on
/// every exit path; teardown failures are logged and never mask the
/// primary outcome. On failure a best-effort screenshot is captured and
/// handed to the artifact sink before the error propagates.
///
/// All per-session state (accumulator, scroll bookkeeping) is constructed
/// inside this call — nothing leaks across sessions, concurrent or
/// sequential.
///
/// # Errors
///
/// - [`ScrapeError::NavigationTimeout`] — page never reached its load state.
/// - [`ScrapeError::SelectorNotFound`] — a required container never appeared.
/// - [`ScrapeError::EmptyResult`] — the session admitted no priced record.
/// - [`ScrapeError::Engine`] — a live-DOM operation failed.
pub async fn run_session<P>(
    page: &P,
    adapter: &VendorAdapter,
    event_url: &str,
    options: &SessionOptions<'_>,
) -> Result<Vec<ListingRecord>, ScrapeError>
where
    P: ListingPage + ?Sized,
{
    let session_id = Uuid::new_v4();

    let result = scrape(page, adapter, event_url, session_id).await;

    if let Err(error) = &result {
        tracing::error!(
            vendor = adapter.name,
            %session_id,
            error = %error,
            "scrape session failed"
        );
        capture_failure_artifact(page, adapter, options, session_id).await;
    }

    if let Err(teardown) = page.close().await {
        tracing::warn!(
            vendor = adapter.name,
            %session_id,
            error = %teardown,
            "page teardown failed"
        );
    }

    result
}

async fn scrape<P>(
    page: &P,
    adapter: &VendorAdapter,
    event_url: &str,
    session_id: Uuid,
) -> Result<Vec<ListingRecord>, ScrapeError>
where
    P: ListingPage + ?Sized,
{
    tracing::info!(
        vendor = adapter.name,
        %session_id,
        url = event_url,
        "starting scrape session"
    );

    page.navigate(event_url, adapter.nav_timeout)
        .await
        .map_err(|e| ScrapeError::from_navigation(e, event_url))?;
    tokio::time::sleep(adapter.initial_settle).await;

    let mut accumulator = ResultAccumulator::new();
    ScrollDriver::new(page, adapter).run(&mut accumulator).await?;

    let records: Vec<ListingRecord> = accumulator
        .flush_and_reset()
        .into_iter()
        .filter(ListingRecord::has_price)
        .collect();

    if records.is_empty() {
        return Err(ScrapeError::EmptyResult);
    }

    tracing::info!(
        vendor = adapter.name,
        %session_id,
        count = records.len(),
        "scrape session complete"
    );
    Ok(records)
}

/// Best-effort failure diagnostics; nothing here escalates.
async fn capture_failure_artifact<P>(
    page: &P,
    adapter: &VendorAdapter,
    options: &SessionOptions<'_>,
    session_id: Uuid,
) where
    P: ListingPage + ?Sized,
{
    let path = options
        .screenshot_dir
        .join(format!("{}-{session_id}.png", adapter.name));

    match page.screenshot(&path).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), "captured failure screenshot");
            if let Some(sink) = options.artifact_sink {
                match sink.store(&path).await {
                    Some(url) => tracing::info!(url = %url, "uploaded failure screenshot"),
                    None => tracing::warn!("failure screenshot upload did not complete"),
                }
            }
        }
        Err(error) => {
            tracing::warn!(error = %error, "failure screenshot could not be captured");
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
