//! [`ListingPage`] implementation over a chromiumoxide page.
//!
//! Measurements, scrolling, and markup extraction all go through
//! `page.evaluate` — the rendered listing containers are ordinary DOM from
//! the protocol's point of view, and evaluating in page context keeps this
//! adapter independent of per-site element handles.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;

use seatscan_scraper::error::EngineError;
use seatscan_scraper::ListingPage;

use crate::stealth::STEALTH_SCRIPTS;

/// Polling interval while waiting for a selector to appear.
const SELECTOR_POLL: Duration = Duration::from_millis(500);

/// JavaScript promise resolving once the document is usable.
const WAIT_FOR_READY_SCRIPT: &str = r"
    new Promise((resolve) => {
        if (document.readyState === 'complete' || document.readyState === 'interactive') {
            resolve(document.readyState);
        } else {
            document.addEventListener('DOMContentLoaded', () => resolve(document.readyState));
            setTimeout(() => resolve('timeout'), 10000);
        }
    })
";

pub struct ChromePage {
    page: Page,
    stealth: bool,
}

impl ChromePage {
    #[must_use]
    pub fn new(page: Page, stealth: bool) -> Self {
        Self { page, stealth }
    }

    /// Runs an expression in page context and deserializes its value,
    /// falling back to `default` when the page returns nothing usable.
    async fn evaluate_value<T>(&self, expression: String, default: T) -> Result<T, EngineError>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(result.into_value().unwrap_or(default))
    }

    /// Applies the stealth scripts. Injection failures are expected on some
    /// pages and only logged.
    async fn apply_stealth(&self) {
        for script in STEALTH_SCRIPTS {
            if let Err(error) = self.page.evaluate((*script).to_string()).await {
                tracing::debug!(error = %error, "stealth script injection skipped");
            }
        }
    }
}

/// Escapes a selector into a JavaScript string literal.
fn js_string(selector: &str) -> String {
    serde_json::to_string(selector).unwrap_or_else(|_| String::from("\"\""))
}

#[async_trait]
impl ListingPage for ChromePage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), EngineError> {
        tracing::info!(url, "navigating");
        tokio::time::timeout(timeout, self.page.goto(url))
            .await
            .map_err(|_| EngineError::Timeout {
                what: "navigation".to_owned(),
                timeout_secs: timeout.as_secs(),
            })?
            .map_err(|e| EngineError::Protocol(e.to_string()))?;

        // Parity with the load state the selectors were tuned against:
        // DOMContentLoaded, not full load.
        match tokio::time::timeout(timeout, self.page.evaluate(WAIT_FOR_READY_SCRIPT.to_string()))
            .await
        {
            Ok(Ok(result)) => {
                let state: String = result.into_value().unwrap_or_else(|_| "unknown".to_owned());
                tracing::debug!(state, "page ready");
            }
            Ok(Err(error)) => {
                tracing::debug!(error = %error, "could not check ready state");
            }
            Err(_) => {
                tracing::warn!("timed out waiting for page ready state");
            }
        }

        if self.stealth {
            self.apply_stealth().await;
        }

        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(EngineError::Timeout {
                    what: selector.to_owned(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(SELECTOR_POLL).await;
        }
    }

    async fn scroll_extent(&self, selector: &str) -> Result<Option<i64>, EngineError> {
        let expression = format!(
            "document.querySelector({})?.scrollHeight ?? null",
            js_string(selector)
        );
        self.evaluate_value(expression, None).await
    }

    async fn scroll_to_bottom(&self, selector: &str) -> Result<(), EngineError> {
        let expression = format!(
            "(() => {{ const c = document.querySelector({}); if (c) {{ c.scrollTo(0, c.scrollHeight); }} }})()",
            js_string(selector)
        );
        self.page
            .evaluate(expression)
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn scroll_to(&self, selector: &str, offset: i64) -> Result<(), EngineError> {
        let expression = format!(
            "(() => {{ const c = document.querySelector({}); if (c) {{ c.scrollTo(0, {offset}); }} }})()",
            js_string(selector)
        );
        self.page
            .evaluate(expression)
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, EngineError> {
        let expression = format!(
            "(() => {{ const el = document.querySelector({}); \
             return !!el && window.getComputedStyle(el).getPropertyValue('display') !== 'none'; }})()",
            js_string(selector)
        );
        self.evaluate_value(expression, false).await
    }

    async fn click(&self, selector: &str) -> Result<(), EngineError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn outer_html_all(&self, selector: &str) -> Result<Vec<String>, EngineError> {
        let expression = format!(
            "Array.from(document.querySelectorAll({})).map((el) => el.outerHTML)",
            js_string(selector)
        );
        self.evaluate_value(expression, Vec::new()).await
    }

    async fn screenshot(&self, path: &Path) -> Result<(), EngineError> {
        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
                path,
            )
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| EngineError::Protocol(e.to_string()))?;
        Ok(())
    }
}
