//! Exact path lookup.
//!
//! Records are ordered by name, so a path can only be found with a full scan.
//! The stored path length is compared before any path bytes are read, which
//! keeps the common mismatch cheap.

use crate::error::Result;
use crate::layout::StringField;
use crate::record::{RecordIndex, RecordTable};

/// Integer sentinel for a path that is not in the index.
pub const PATH_NOT_FOUND: i64 = -1;

/// Returns the first record among `0..count` whose path equals `target`.
///
/// A path span is only bounds-checked when its length matches `target`;
/// records skipped by the length check are never dereferenced.
pub fn lookup_path(
    table: &RecordTable<'_>,
    count: RecordIndex,
    target: &[u8],
) -> Result<Option<RecordIndex>> {
    for index in 0..count {
        let record = table.record(index)?;
        if record.string_len(StringField::Path)? as usize != target.len() {
            continue;
        }
        if record.path()? == target {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// [`lookup_path`] with the result folded into an integer, `-1` when absent.
pub fn lookup_path_sentinel(
    table: &RecordTable<'_>,
    count: RecordIndex,
    target: &[u8],
) -> Result<i64> {
    Ok(lookup_path(table, count, target)?.map_or(PATH_NOT_FOUND, i64::from))
}

impl RecordTable<'_> {
    /// See [`lookup_path`].
    pub fn lookup_path(&self, count: RecordIndex, target: &[u8]) -> Result<Option<RecordIndex>> {
        lookup_path(self, count, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{self, FixtureBuilder};
    use crate::layout::PATH_OFFSET;

    #[test]
    fn finds_example_paths() {
        let fixture = fixture::example();
        let table = fixture.table();

        assert_eq!(lookup_path(&table, fixture.count, b"/a").expect("lookup"), Some(1));
        assert_eq!(lookup_path(&table, fixture.count, b"/g").expect("lookup"), Some(2));
        assert_eq!(lookup_path(&table, fixture.count, b"/z").expect("lookup"), None);
    }

    #[test]
    fn sentinel_form_uses_minus_one() {
        let fixture = fixture::example();
        let table = fixture.table();

        assert_eq!(lookup_path_sentinel(&table, fixture.count, b"/a").expect("lookup"), 1);
        assert_eq!(
            lookup_path_sentinel(&table, fixture.count, b"/z").expect("lookup"),
            PATH_NOT_FOUND
        );
    }

    #[test]
    fn returns_first_of_duplicate_paths() {
        let fixture = FixtureBuilder::new()
            .push("x", "/dup", 1, 1.0)
            .push("y", "/other", 2, 2.0)
            .push("z", "/dup", 3, 3.0)
            .build();
        let table = fixture.table();

        assert_eq!(table.lookup_path(fixture.count, b"/dup").expect("lookup"), Some(0));
        // Limiting the count hides later records.
        assert_eq!(table.lookup_path(1, b"/other").expect("lookup"), None);
    }

    #[test]
    fn match_requires_exact_bytes() {
        let fixture = FixtureBuilder::new()
            .push("a", "/tmp/a", 1, 1.0)
            .push("A", "/tmp/A", 1, 1.0)
            .push("ab", "/tmp/ab", 1, 1.0)
            .build();
        let table = fixture.table();

        assert_eq!(table.lookup_path(3, b"/tmp/A").expect("lookup"), Some(1));
        assert_eq!(table.lookup_path(3, b"/tmp/ab").expect("lookup"), Some(2));
        assert_eq!(table.lookup_path(3, b"/tmp/").expect("lookup"), None);
        assert_eq!(table.lookup_path(3, b"").expect("lookup"), None);
    }

    #[test]
    fn found_index_reads_back_the_target() {
        let fixture = FixtureBuilder::new()
            .push("main.rs", "/src/main.rs", 1, 1.0)
            .push("lib.rs", "/src/lib.rs", 1, 1.0)
            .build();
        let table = fixture.table();

        let index = table
            .lookup_path(fixture.count, b"/src/lib.rs")
            .expect("lookup")
            .expect("present");
        let path = table.record(index).and_then(|r| r.path()).expect("path");
        assert_eq!(path, b"/src/lib.rs");
    }

    #[test]
    fn zero_count_finds_nothing() {
        let fixture = fixture::example();
        assert_eq!(fixture.table().lookup_path(0, b"/a").expect("lookup"), None);
    }

    #[test]
    fn length_mismatch_skips_corrupt_span() {
        let mut fixture = fixture::example();
        // Record 0's path offset points past the buffer but its length differs from the target.
        fixture.set_u32(0, PATH_OFFSET, u32::MAX);
        let table = fixture.table();

        assert_eq!(table.lookup_path(fixture.count, b"/alpha").expect("lookup"), None);
        let error = table
            .lookup_path(fixture.count, b"/x")
            .expect_err("record 0 has a matching length and a corrupt span");
        assert!(error.is_out_of_bounds());
    }

    #[test]
    fn count_past_buffer_is_out_of_bounds() {
        let fixture = fixture::example();
        let error = fixture
            .table()
            .lookup_path(10, b"/missing")
            .expect_err("record 3 is past the buffer");
        assert!(error.is_out_of_bounds());
    }
}
