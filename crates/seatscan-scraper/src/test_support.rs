//! Scripted fakes shared by the driver and session unit tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use seatscan_core::ListingRecord;

use crate::error::EngineError;
use crate::page::{ArtifactSink, ListingPage};
use crate::vendors::{PaginationStrategy, VendorAdapter};

/// Test extraction format: `"SECTION;ROW;QTY;PRICE"` with `-` for an absent
/// field. Anything else is a malformed row and yields an empty record.
fn extract_for_tests(markup: &str) -> ListingRecord {
    let parts: Vec<&str> = markup.split(';').collect();
    if parts.len() != 4 {
        return ListingRecord {
            section: None,
            row: None,
            quantity: None,
            price: None,
        };
    }
    let field = |raw: &str| {
        if raw == "-" {
            None
        } else {
            Some(raw.to_owned())
        }
    };
    ListingRecord {
        section: field(parts[0]),
        row: field(parts[1]),
        quantity: field(parts[2]),
        price: field(parts[3]),
    }
}

/// A zero-delay adapter driving the fake page. Field overrides per test.
pub(crate) fn adapter_for_tests() -> VendorAdapter {
    VendorAdapter {
        name: "fake",
        platform_id: 0,
        host: "fake.test",
        scroll_container: "#container",
        listing_selector: "#rows > div",
        strategy: PaginationStrategy::ScrollToBottom,
        await_container: false,
        initial_settle: Duration::ZERO,
        iteration_settle: Duration::ZERO,
        stall_settle: Duration::ZERO,
        stall_tolerance: 0,
        nav_timeout: Duration::from_secs(60),
        session_budget: Duration::from_secs(60),
        max_iterations: 50,
        stealth: false,
        extract: extract_for_tests,
    }
}

#[derive(Default)]
struct FakeState {
    /// Successive `scroll_extent` results; the last entry repeats.
    extents: VecDeque<i64>,
    /// Added to the previous extent on every measure when set, simulating a
    /// page that never stops growing.
    grow_forever_step: Option<i64>,
    last_extent: i64,
    /// Successive `outer_html_all` results; the last entry repeats.
    batches: VecDeque<Vec<String>>,
    current_batch: Vec<String>,
    button_visible: bool,
    click_fails: bool,
    /// Extents revealed by a successful click; the button hides afterwards.
    click_extents: Vec<i64>,
    navigate_times_out: bool,
    container_missing: bool,
}

/// Scripted [`ListingPage`] with call counters.
#[derive(Default)]
pub(crate) struct FakePage {
    state: Mutex<FakeState>,
    pub(crate) scroll_calls: AtomicUsize,
    pub(crate) click_calls: AtomicUsize,
    pub(crate) close_calls: AtomicUsize,
    pub(crate) screenshot_calls: AtomicUsize,
}

impl FakePage {
    pub(crate) fn builder() -> FakePageBuilder {
        FakePageBuilder::default()
    }
}

#[derive(Default)]
pub(crate) struct FakePageBuilder {
    state: FakeState,
}

impl FakePageBuilder {
    pub(crate) fn extents(mut self, extents: Vec<i64>) -> Self {
        self.state.extents = extents.into();
        self
    }

    pub(crate) fn growing_forever(mut self, step: i64) -> Self {
        self.state.grow_forever_step = Some(step);
        self
    }

    pub(crate) fn fragments(mut self, fragments: Vec<String>) -> Self {
        self.state.batches = VecDeque::from(vec![fragments]);
        self
    }

    pub(crate) fn batches(mut self, batches: Vec<Vec<String>>) -> Self {
        self.state.batches = batches.into();
        self
    }

    pub(crate) fn visible_button(mut self, click_extents: Vec<i64>) -> Self {
        self.state.button_visible = true;
        self.state.click_extents = click_extents;
        self
    }

    pub(crate) fn failing_button(mut self) -> Self {
        self.state.button_visible = true;
        self.state.click_fails = true;
        self
    }

    pub(crate) fn navigate_times_out(mut self) -> Self {
        self.state.navigate_times_out = true;
        self
    }

    pub(crate) fn container_missing(mut self) -> Self {
        self.state.container_missing = true;
        self
    }

    pub(crate) fn build(self) -> FakePage {
        FakePage {
            state: Mutex::new(self.state),
            ..FakePage::default()
        }
    }
}

#[async_trait]
impl ListingPage for FakePage {
    async fn navigate(&self, _url: &str, timeout: Duration) -> Result<(), EngineError> {
        let state = self.state.lock().expect("fake state");
        if state.navigate_times_out {
            return Err(EngineError::Timeout {
                what: "navigation".to_owned(),
                timeout_secs: timeout.as_secs(),
            });
        }
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError> {
        let state = self.state.lock().expect("fake state");
        if state.container_missing {
            return Err(EngineError::Timeout {
                what: selector.to_owned(),
                timeout_secs: timeout.as_secs(),
            });
        }
        Ok(())
    }

    async fn scroll_extent(&self, _selector: &str) -> Result<Option<i64>, EngineError> {
        let mut state = self.state.lock().expect("fake state");
        if let Some(step) = state.grow_forever_step {
            state.last_extent += step;
            return Ok(Some(state.last_extent));
        }
        let extent = if state.extents.len() > 1 {
            state.extents.pop_front().unwrap_or(0)
        } else {
            state.extents.front().copied().unwrap_or(0)
        };
        state.last_extent = extent;
        Ok(Some(extent))
    }

    async fn scroll_to_bottom(&self, _selector: &str) -> Result<(), EngineError> {
        self.scroll_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn scroll_to(&self, _selector: &str, _offset: i64) -> Result<(), EngineError> {
        self.scroll_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn is_visible(&self, _selector: &str) -> Result<bool, EngineError> {
        Ok(self.state.lock().expect("fake state").button_visible)
    }

    async fn click(&self, _selector: &str) -> Result<(), EngineError> {
        self.click_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().expect("fake state");
        if state.click_fails {
            return Err(EngineError::Protocol("node is detached".to_owned()));
        }
        let revealed: Vec<i64> = state.click_extents.drain(..).collect();
        state.extents = revealed.into();
        state.button_visible = false;
        Ok(())
    }

    async fn outer_html_all(&self, _selector: &str) -> Result<Vec<String>, EngineError> {
        let mut state = self.state.lock().expect("fake state");
        if state.batches.len() > 1 {
            if let Some(batch) = state.batches.pop_front() {
                state.current_batch = batch;
            }
        } else if let Some(batch) = state.batches.front() {
            state.current_batch = batch.clone();
        }
        Ok(state.current_batch.clone())
    }

    async fn screenshot(&self, _path: &Path) -> Result<(), EngineError> {
        self.screenshot_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records stored artifact paths and returns a canned URL.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) stored: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl ArtifactSink for RecordingSink {
    async fn store(&self, local_path: &Path) -> Option<String> {
        self.stored
            .lock()
            .expect("sink state")
            .push(local_path.to_path_buf());
        Some(format!(
            "https://seatscan-debug.s3.us-east-1.amazonaws.com/{}",
            local_path.file_name().and_then(|n| n.to_str()).unwrap_or("artifact.png")
        ))
    }
}
