//! Substring scan over the precomputed lowercased names.
//!
//! The query is matched byte-for-byte against each record's lowercased name;
//! callers lowercase the query themselves. Scans read the buffer only, so
//! disjoint ranges of one buffer may be scanned from different threads.

use std::ops::Range;

use memchr::memmem;

use crate::error::{IndexScanError, Result};
use crate::record::{RecordIndex, RecordTable};

/// Writes the indices in `range` whose lowercased name contains `query` into
/// `out`, in ascending order, and returns how many were written.
///
/// An empty query matches every record. Fails with `CapacityExceeded` when
/// `out` cannot hold every match; an `out` at least `range.len()` long never
/// does.
pub fn scan_range(
    table: &RecordTable<'_>,
    range: Range<RecordIndex>,
    query: &[u8],
    out: &mut [RecordIndex],
) -> Result<usize> {
    check_range(table, &range)?;

    let finder = memmem::Finder::new(query);
    let mut matched = 0usize;

    for index in range.clone() {
        let lower_name = table.record(index)?.lower_name()?;
        if finder.find(lower_name).is_none() {
            continue;
        }

        let Some(slot) = out.get_mut(matched) else {
            return Err(IndexScanError::CapacityExceeded {
                capacity: out.len(),
                start: range.start as usize,
                end: range.end as usize,
            });
        };
        *slot = index;
        matched += 1;
    }

    Ok(matched)
}

/// Rejects inverted ranges and ranges whose last record is outside the buffer.
///
/// Record positions grow with the index, so the last record fitting means
/// every record of the range does. Callers sizing output to the range check
/// this before allocating.
pub(crate) fn check_range(table: &RecordTable<'_>, range: &Range<RecordIndex>) -> Result<()> {
    if range.start > range.end {
        return Err(IndexScanError::InvalidInput(format!(
            "scan range start {} is past its end {}",
            range.start, range.end
        )));
    }
    if range.start < range.end {
        table.record(range.end - 1)?;
    }
    Ok(())
}

/// Scans `range` into a freshly allocated vector sized to the range.
pub fn scan_to_vec(
    table: &RecordTable<'_>,
    range: Range<RecordIndex>,
    query: &[u8],
) -> Result<Vec<RecordIndex>> {
    check_range(table, &range)?;
    let mut out = vec![0; range.len()];
    let matched = scan_range(table, range, query, &mut out)?;
    out.truncate(matched);
    Ok(out)
}

impl RecordTable<'_> {
    /// See [`scan_range`].
    pub fn scan(
        &self,
        range: Range<RecordIndex>,
        query: &[u8],
        out: &mut [RecordIndex],
    ) -> Result<usize> {
        scan_range(self, range, query, out)
    }
}
