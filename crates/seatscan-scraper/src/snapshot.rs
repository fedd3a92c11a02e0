//! Snapshot pass: live DOM → static markup → records.

use seatscan_core::ListingRecord;

use crate::error::EngineError;
use crate::page::ListingPage;
use crate::vendors::VendorAdapter;

/// Enumerates the currently-rendered listing elements and extracts a record
/// from each.
///
/// Returns the full batch, duplicates included — deduplication is the
/// accumulator's job. Zero rendered elements is an empty batch, not an
/// error: absence of listings at a given scroll position is expected
/// mid-loop. Malformed elements yield records with absent fields and the
/// batch continues.
///
/// # Errors
///
/// Returns [`EngineError`] only when the live enumeration itself fails;
/// nothing in extraction can error.
pub async fn parse_snapshot<P>(
    page: &P,
    adapter: &VendorAdapter,
) -> Result<Vec<ListingRecord>, EngineError>
where
    P: ListingPage + ?Sized,
{
    let fragments = page.outer_html_all(adapter.listing_selector).await?;

    let mut batch = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.iter().enumerate() {
        let record = (adapter.extract)(fragment);
        if record.is_empty() {
            tracing::debug!(
                vendor = adapter.name,
                index,
                "listing element yielded no fields"
            );
        }
        batch.push(record);
    }

    Ok(batch)
}
