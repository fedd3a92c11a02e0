//! Chromium-backed implementation of the scraping engine boundary.
//!
//! Everything the pipeline knows about a browser is the
//! [`seatscan_scraper::ListingPage`] trait; this crate provides the
//! chromiumoxide (CDP) implementation plus process lifecycle: executable
//! discovery, launch arguments, the handler pump task, remote-debugger
//! attach, and guaranteed close.

mod chrome;
mod config;
mod page;
mod stealth;

use seatscan_core::ListingRecord;
use seatscan_scraper::error::EngineError;
use seatscan_scraper::{run_session, ScrapeError, SessionOptions, VendorAdapter};

pub use chrome::{HeadlessBrowser, LaunchError};
pub use config::BrowserLaunchConfig;
pub use page::ChromePage;

/// Scrapes one event URL end to end: launch (or attach), open a page, run
/// the session, and release the browser on every exit path.
///
/// The browser process is a scoped resource of this call — it is closed
/// whether the session succeeds, the session fails, or the page cannot
/// even be opened. Launch failures surface as [`ScrapeError::Engine`] so
/// callers deal with a single error type.
///
/// # Errors
///
/// Any [`ScrapeError`] from the session, or an engine error when the
/// browser cannot be acquired.
pub async fn scrape_event(
    launch: &BrowserLaunchConfig,
    adapter: &VendorAdapter,
    event_url: &str,
    options: &SessionOptions<'_>,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let browser = HeadlessBrowser::launch(launch)
        .await
        .map_err(|e| ScrapeError::Engine(EngineError::Protocol(e.to_string())))?;

    let page = match browser.new_page(launch.stealth).await {
        Ok(page) => page,
        Err(error) => {
            browser.close().await;
            return Err(ScrapeError::Engine(EngineError::Protocol(error.to_string())));
        }
    };

    let result = run_session(&page, adapter, event_url, options).await;
    browser.close().await;
    result
}
