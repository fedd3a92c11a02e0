//! Scroll stabilization loop.
//!
//! One generic driver, parameterized by the vendor adapter's pagination
//! strategy. The loop is inherently serial: every iteration's action
//! depends on the previous iteration's measured state.

use std::time::Instant;

use crate::accumulator::ResultAccumulator;
use crate::error::ScrapeError;
use crate::page::ListingPage;
use crate::snapshot::parse_snapshot;
use crate::vendors::{PaginationStrategy, VendorAdapter};

/// Per-session scroll bookkeeping, owned by one driver run and discarded
/// with it. `last_extent` is monotonically non-decreasing until termination:
/// a measurement that comes back equal *or lower* (extents transiently
/// shrink while a virtualized list re-renders) counts as a stall and never
/// overwrites the high-water mark.
struct ScrollState {
    last_extent: i64,
    iterations_since_growth: u32,
    started: Instant,
}

/// Drives one listing container to stabilization, feeding every snapshot
/// through the accumulator.
pub struct ScrollDriver<'a, P: ListingPage + ?Sized> {
    page: &'a P,
    adapter: &'a VendorAdapter,
}

impl<'a, P: ListingPage + ?Sized> ScrollDriver<'a, P> {
    pub fn new(page: &'a P, adapter: &'a VendorAdapter) -> Self {
        Self { page, adapter }
    }

    /// Runs the loop to completion.
    ///
    /// Terminates when growth stalls past the adapter's tolerance (and any
    /// "load more" control is exhausted), when an incremental walk covers
    /// the measured extent, or when the wall-clock or iteration budget runs
    /// out — budget exhaustion wins over continued growth.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::SelectorNotFound`] when a required container never
    ///   appears.
    /// - [`ScrapeError::Engine`] when a live-DOM operation fails.
    pub async fn run(&self, accumulator: &mut ResultAccumulator) -> Result<(), ScrapeError> {
        let adapter = self.adapter;

        if adapter.await_container {
            self.page
                .wait_for_selector(adapter.scroll_container, adapter.nav_timeout)
                .await
                .map_err(|e| ScrapeError::from_container_wait(e, adapter.scroll_container))?;
        }

        let mut state = ScrollState {
            last_extent: self.measure().await?,
            iterations_since_growth: 0,
            started: Instant::now(),
        };
        self.snapshot_into(accumulator).await?;

        let mut offset: i64 = 0;
        let mut iterations: u32 = 0;

        loop {
            if state.started.elapsed() >= adapter.session_budget {
                tracing::warn!(
                    vendor = adapter.name,
                    budget_secs = adapter.session_budget.as_secs(),
                    "session budget exhausted, cutting the loop off"
                );
                break;
            }
            if iterations >= adapter.max_iterations {
                tracing::warn!(
                    vendor = adapter.name,
                    iterations,
                    "iteration budget exhausted, cutting the loop off"
                );
                break;
            }
            iterations += 1;

            match adapter.strategy {
                PaginationStrategy::ScrollToBottom
                | PaginationStrategy::ScrollThenClickMore { .. } => {
                    self.page.scroll_to_bottom(adapter.scroll_container).await?;
                }
                PaginationStrategy::ScrollByIncrement { step } => {
                    offset = offset.saturating_add(step);
                    self.page.scroll_to(adapter.scroll_container, offset).await?;
                }
            }

            tokio::time::sleep(adapter.iteration_settle).await;

            let extent = self.measure().await?;
            let admitted = self.snapshot_into(accumulator).await?;
            tracing::debug!(
                vendor = adapter.name,
                iteration = iterations,
                extent,
                admitted,
                total = accumulator.len(),
                "scroll pass"
            );

            if let PaginationStrategy::ScrollByIncrement { .. } = adapter.strategy {
                // A fixed-height panel never grows; the walk is done once
                // the accumulated offset has covered the measured extent.
                if extent > state.last_extent {
                    state.last_extent = extent;
                }
                if offset >= state.last_extent {
                    tracing::debug!(vendor = adapter.name, offset, "walked the full container");
                    break;
                }
                continue;
            }

            if extent > state.last_extent {
                state.last_extent = extent;
                state.iterations_since_growth = 0;
                continue;
            }

            state.iterations_since_growth += 1;
            if state.iterations_since_growth <= adapter.stall_tolerance {
                tokio::time::sleep(adapter.stall_settle).await;
                continue;
            }

            match adapter.strategy {
                PaginationStrategy::ScrollThenClickMore { button } => {
                    if !self.page.is_visible(button).await? {
                        tracing::info!(vendor = adapter.name, "reached the end of the listings");
                        break;
                    }
                    match self.page.click(button).await {
                        Ok(()) => {
                            tracing::info!(vendor = adapter.name, "fetching more data");
                            state.iterations_since_growth = 0;
                        }
                        Err(error) => {
                            tracing::warn!(
                                vendor = adapter.name,
                                error = %error,
                                "load-more control no longer interactable"
                            );
                            break;
                        }
                    }
                }
                _ => {
                    tracing::info!(vendor = adapter.name, "reached the end of the listings");
                    break;
                }
            }
        }

        // One last pass catches anything rendered after the final scroll
        // settled.
        self.snapshot_into(accumulator).await?;
        Ok(())
    }

    async fn measure(&self) -> Result<i64, ScrapeError> {
        let extent = self
            .page
            .scroll_extent(self.adapter.scroll_container)
            .await?;
        Ok(extent.unwrap_or_else(|| {
            tracing::debug!(
                vendor = self.adapter.name,
                selector = self.adapter.scroll_container,
                "scroll container not present yet"
            );
            0
        }))
    }

    async fn snapshot_into(&self, accumulator: &mut ResultAccumulator) -> Result<usize, ScrapeError> {
        let batch = parse_snapshot(self.page, self.adapter).await?;
        Ok(accumulator.admit(batch))
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
