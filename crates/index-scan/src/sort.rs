//! In-place sorting of record indices by a record field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::StringField;
use crate::record::{RecordIndex, RecordTable};

/// Field that drives the ordering of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Raw display-name bytes, not the lowercased copy.
    Name,
    Path,
    Size,
    /// Modification time. Where NaN timestamps land is unspecified.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    #[inline]
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl From<bool> for SortOrder {
    fn from(ascending: bool) -> Self {
        Self::from_ascending(ascending)
    }
}

/// Compares two records by one key, ascending.
pub type Comparator = for<'t, 'a> fn(&'t RecordTable<'a>, RecordIndex, RecordIndex) -> Ordering;

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Path => "path",
            Self::Size => "size",
            Self::Date => "date",
        }
    }

    /// The ascending comparator for this key.
    ///
    /// Comparators assume both records were checked with [`SortKey::validate`];
    /// a record that fails to read compares equal.
    pub fn comparator(self) -> Comparator {
        match self {
            Self::Name => compare_names,
            Self::Path => compare_paths,
            Self::Size => compare_sizes,
            Self::Date => compare_dates,
        }
    }

    /// Checks that `index` and the field this key reads are inside the buffer.
    pub fn validate(self, table: &RecordTable<'_>, index: RecordIndex) -> Result<()> {
        let record = table.record(index)?;
        match self {
            Self::Name => record.name().map(drop),
            Self::Path => record.path().map(drop),
            Self::Size => record.size().map(drop),
            Self::Date => record.modified().map(drop),
        }
    }
}

/// Reorders `indices` in place by `key`.
///
/// Every index is validated before anything moves, so an `OutOfBounds` error
/// leaves `indices` untouched. An array already in `key`/`order` is left
/// exactly as it was. Otherwise the sort is unstable: records with equal keys
/// may end up in either relative order.
pub fn sort_indices(
    indices: &mut [RecordIndex],
    table: &RecordTable<'_>,
    key: SortKey,
    order: SortOrder,
) -> Result<()> {
    for &index in indices.iter() {
        key.validate(table, index)?;
    }

    let compare = key.comparator();
    let ordering =
        |left: RecordIndex, right: RecordIndex| order.apply(compare(table, left, right));
    if indices
        .windows(2)
        .all(|pair| ordering(pair[0], pair[1]) != Ordering::Greater)
    {
        return Ok(());
    }
    indices.sort_unstable_by(|&left, &right| ordering(left, right));
    Ok(())
}

impl RecordTable<'_> {
    /// See [`sort_indices`].
    pub fn sort(&self, indices: &mut [RecordIndex], key: SortKey, order: SortOrder) -> Result<()> {
        sort_indices(indices, self, key, order)
    }
}

/// Byte-wise comparison of a string field; a shorter common prefix sorts first.
#[inline]
fn compare_strings(
    table: &RecordTable<'_>,
    field: StringField,
    left: RecordIndex,
    right: RecordIndex,
) -> Ordering {
    let read = |index| table.record(index).and_then(|record| record.string_field(field));
    match (read(left), read(right)) {
        // Slice ordering is lexicographic with length as the tie-break.
        (Ok(left), Ok(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}

fn compare_names(table: &RecordTable<'_>, left: RecordIndex, right: RecordIndex) -> Ordering {
    compare_strings(table, StringField::Name, left, right)
}

fn compare_paths(table: &RecordTable<'_>, left: RecordIndex, right: RecordIndex) -> Ordering {
    compare_strings(table, StringField::Path, left, right)
}

fn compare_sizes(table: &RecordTable<'_>, left: RecordIndex, right: RecordIndex) -> Ordering {
    let read = |index| table.record(index).and_then(|record| record.size());
    match (read(left), read(right)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => Ordering::Equal,
    }
}

fn compare_dates(table: &RecordTable<'_>, left: RecordIndex, right: RecordIndex) -> Ordering {
    let read = |index| table.record(index).and_then(|record| record.modified());
    match (read(left), read(right)) {
        // total_cmp keeps the order total when a NaN slips into the index.
        (Ok(left), Ok(right)) => left.total_cmp(&right),
        _ => Ordering::Equal,
    }
}
