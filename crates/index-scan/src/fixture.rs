//! Test-only builder for index buffers in the indexer's record layout.

use crate::layout::{RecordLayout, StringField, MODIFIED_OFFSET, SIZE_OFFSET};
use crate::record::RecordTable;

struct FixtureRecord {
    name: String,
    path: String,
    lower_name: String,
    size: i64,
    modified: f64,
}

pub(crate) struct FixtureBuilder {
    item_base_offset: usize,
    record_stride: usize,
    records: Vec<FixtureRecord>,
}

impl FixtureBuilder {
    /// A 16 byte header followed by 48 byte records.
    pub(crate) fn new() -> Self {
        Self::with_layout(16, 48)
    }

    pub(crate) fn with_layout(item_base_offset: usize, record_stride: usize) -> Self {
        Self {
            item_base_offset,
            record_stride,
            records: Vec::new(),
        }
    }

    pub(crate) fn push(self, name: &str, path: &str, size: i64, modified: f64) -> Self {
        let lower_name = name.to_lowercase();
        self.push_raw(name, path, &lower_name, size, modified)
    }

    pub(crate) fn push_raw(
        mut self,
        name: &str,
        path: &str,
        lower_name: &str,
        size: i64,
        modified: f64,
    ) -> Self {
        self.records.push(FixtureRecord {
            name: name.to_string(),
            path: path.to_string(),
            lower_name: lower_name.to_string(),
            size,
            modified,
        });
        self
    }

    /// Lays out the records, then every string payload directly after them.
    pub(crate) fn build(self) -> IndexFixture {
        let layout = RecordLayout::new(self.item_base_offset, self.record_stride)
            .expect("fixture layout");
        let records_end = self.item_base_offset + self.records.len() * self.record_stride;
        let mut bytes = vec![0u8; records_end];

        for (index, record) in self.records.iter().enumerate() {
            let start = self.item_base_offset + index * self.record_stride;
            bytes[start + SIZE_OFFSET..start + SIZE_OFFSET + 8]
                .copy_from_slice(&record.size.to_le_bytes());
            bytes[start + MODIFIED_OFFSET..start + MODIFIED_OFFSET + 8]
                .copy_from_slice(&record.modified.to_le_bytes());

            for (field, value) in [
                (StringField::Name, &record.name),
                (StringField::Path, &record.path),
                (StringField::LowerName, &record.lower_name),
            ] {
                let offset = bytes.len() as u32;
                bytes.extend_from_slice(value.as_bytes());
                let at = start + field.byte_offset();
                bytes[at..at + 4].copy_from_slice(&offset.to_le_bytes());
                bytes[at + 4..at + 8].copy_from_slice(&(value.len() as u32).to_le_bytes());
            }
        }

        IndexFixture {
            bytes,
            layout,
            count: self.records.len() as u32,
        }
    }
}

pub(crate) struct IndexFixture {
    pub(crate) bytes: Vec<u8>,
    pub(crate) layout: RecordLayout,
    pub(crate) count: u32,
}

impl IndexFixture {
    pub(crate) fn table(&self) -> RecordTable<'_> {
        RecordTable::new(&self.bytes, self.layout)
    }

    fn field_at(&self, record: u32, byte_offset: usize) -> usize {
        self.layout.record_start(record as usize).expect("record start") + byte_offset
    }

    pub(crate) fn u32_at(&self, record: u32, byte_offset: usize) -> u32 {
        let at = self.field_at(record, byte_offset);
        u32::from_le_bytes(self.bytes[at..at + 4].try_into().expect("4 bytes"))
    }

    /// Overwrites a raw u32 word inside a record, for corrupting buffers.
    pub(crate) fn set_u32(&mut self, record: u32, byte_offset: usize, value: u32) {
        let at = self.field_at(record, byte_offset);
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn set_f64(&mut self, record: u32, byte_offset: usize, value: f64) {
        let at = self.field_at(record, byte_offset);
        self.bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
    }
}

/// The three-record index used throughout the tests.
///
/// | index | name | path | size | modified |
/// |---|---|---|---|---|
/// | 0 | Beta | /b | 300 | 3000.0 |
/// | 1 | alpha | /a | 100 | 2000.5 |
/// | 2 | Gamma | /g | 200 | 1000.25 |
pub(crate) fn example() -> IndexFixture {
    FixtureBuilder::new()
        .push("Beta", "/b", 300, 3_000.0)
        .push("alpha", "/a", 100, 2_000.5)
        .push("Gamma", "/g", 200, 1_000.25)
        .build()
}
