//! Scan, sort and lookup primitives over a flat file-index buffer.
//!
//! The indexer writes one fixed-stride record per filesystem item, followed by
//! the string payloads those records reference. This crate reads that buffer
//! without copying it:
//! - Bounds-checked record views (`RecordTable`, `Record`)
//! - Substring scan over precomputed lowercased names
//! - In-place sort of record indices by name, path, size or date
//! - Exact path lookup
//! - Partitioned parallel scans with cancellation, and memory-mapped index files

pub mod cancel;
pub mod error;
pub mod layout;
pub mod lookup;
pub mod mapped;
pub mod partition;
pub mod record;
pub mod scan;
pub mod sort;

#[cfg(test)]
mod fixture;

// Re-export main types
pub use cancel::{CancellationToken, SearchVersionTracker};
pub use error::{BoundsViolation, IndexScanError, Result};
pub use layout::{RecordLayout, StringField, MIN_RECORD_STRIDE};
pub use lookup::{lookup_path, lookup_path_sentinel, PATH_NOT_FOUND};
pub use mapped::MappedIndex;
pub use partition::{scan_partitioned, ScanOptions};
pub use record::{Record, RecordIndex, RecordTable};
pub use scan::{scan_range, scan_to_vec};
pub use sort::{sort_indices, Comparator, SortKey, SortOrder};
