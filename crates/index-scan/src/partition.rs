//! Parallel fan-out of the scanner over disjoint partitions.
//!
//! The range is cut into partitions of `ScanOptions::partition_len` records.
//! Each partition scans into its own region of one pre-sized output buffer on
//! the rayon pool, and the regions are compacted in order afterwards, so the
//! result matches a single `scan_range` over the whole range. Cancellation is
//! observed between partitions only.

use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::error::{IndexScanError, Result};
use crate::record::{RecordIndex, RecordTable};
use crate::scan::{check_range, scan_range};

/// Records per partition unless configured otherwise.
pub const DEFAULT_PARTITION_LEN: usize = 0x10000; // 65,536

/// Tuning for [`scan_partitioned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    /// Number of records each partition scans. Must be non-zero.
    pub partition_len: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            partition_len: DEFAULT_PARTITION_LEN,
        }
    }
}

/// Scans `range` in parallel partitions.
///
/// Returns `Ok(None)` if `token` was cancelled before the scan finished. Any
/// partition error fails the whole scan.
pub fn scan_partitioned(
    table: &RecordTable<'_>,
    range: Range<RecordIndex>,
    query: &[u8],
    options: &ScanOptions,
    token: &CancellationToken,
) -> Result<Option<Vec<RecordIndex>>> {
    let partition_len = options.partition_len;
    if partition_len == 0 {
        return Err(IndexScanError::InvalidInput(
            "partition length must be non-zero".to_string(),
        ));
    }

    // Checked before the output buffer is sized to the range.
    check_range(table, &range)?;

    let total = range.len();
    let mut out: Vec<RecordIndex> = vec![0; total];

    let outcomes: Vec<Option<Result<usize>>> = out
        .par_chunks_mut(partition_len)
        .enumerate()
        .map(|(partition, region)| {
            token.is_cancelled()?;
            // Partitions never extend past `range.end`, so these fit in a RecordIndex.
            let start = range.start + (partition * partition_len) as RecordIndex;
            let end = start + region.len() as RecordIndex;
            Some(scan_range(table, start..end, query, region))
        })
        .collect();

    if token.is_cancelled().is_none() || outcomes.iter().any(Option::is_none) {
        log::debug!(
            "partitioned scan of {}..{} cancelled",
            range.start,
            range.end
        );
        return Ok(None);
    }

    let mut written = 0usize;
    for (partition, outcome) in outcomes.into_iter().enumerate() {
        let matched = match outcome {
            Some(Ok(matched)) => matched,
            Some(Err(error)) => {
                log::warn!(
                    "partitioned scan of {}..{} failed in partition {}: {}",
                    range.start,
                    range.end,
                    partition,
                    error
                );
                return Err(error);
            }
            None => return Ok(None),
        };
        let region_start = partition * partition_len;
        out.copy_within(region_start..region_start + matched, written);
        written += matched;
    }
    out.truncate(written);

    log::debug!(
        "partitioned scan matched {} of {} records in {} partitions",
        written,
        total,
        total.div_ceil(partition_len)
    );
    Ok(Some(out))
}

impl RecordTable<'_> {
    /// See [`scan_partitioned`].
    pub fn scan_partitioned(
        &self,
        range: Range<RecordIndex>,
        query: &[u8],
        options: &ScanOptions,
        token: &CancellationToken,
    ) -> Result<Option<Vec<RecordIndex>>> {
        scan_partitioned(self, range, query, options, token)
    }
}
