//! Session-scoped deduplicating result set.

use std::collections::HashSet;

use seatscan_core::ListingRecord;

/// Accumulates extracted records for one scraping session, deduplicating by
/// full value equality.
///
/// Repeated passes over a growing virtualized list re-extract previously
/// seen rows verbatim; structural equality is the only stable dedup key
/// since the source markup carries no unique listing id. Admission is
/// idempotent, and the set only grows — a record once admitted is never
/// removed.
///
/// One accumulator per session, constructor-injected. Concurrent sessions
/// must each build their own; nothing here is shared.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    seen: HashSet<ListingRecord>,
}

impl ResultAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a batch, returning how many records were newly added.
    /// Admitting the same batch twice changes nothing.
    pub fn admit<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        let before = self.seen.len();
        self.seen.extend(batch);
        self.seen.len() - before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Hands the accumulated records off (order unspecified) and clears the
    /// running set, so a reused accumulator starts the next session empty.
    pub fn flush_and_reset(&mut self) -> Vec<ListingRecord> {
        self.seen.drain().collect()
    }
}
