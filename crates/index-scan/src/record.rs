//! Bounds-checked record view over an index buffer.
//!
//! A `RecordTable` borrows the indexer's buffer together with its layout and
//! hands out `Record`s. Every accessor validates the bytes it touches, so a
//! corrupt buffer surfaces as `OutOfBounds` instead of an out-of-range read.
//! Nothing here copies record storage or string payloads.

use std::borrow::Cow;

use crate::error::{BoundsViolation, Result};
use crate::layout::{
    RecordLayout, StringField, MIN_RECORD_STRIDE, MODIFIED_OFFSET, SIZE_OFFSET,
};

/// Position of a record in the index buffer.
pub type RecordIndex = u32;

/// A read-only view of fixed-stride records inside a byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct RecordTable<'a> {
    bytes: &'a [u8],
    layout: RecordLayout,
}

impl<'a> RecordTable<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8], layout: RecordLayout) -> Self {
        Self { bytes, layout }
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Returns the record at `index` after checking its fields lie inside the buffer.
    #[inline]
    pub fn record(&self, index: RecordIndex) -> Result<Record<'a>> {
        let buffer_len = self.bytes.len();
        let start = self
            .layout
            .record_start(index as usize)
            .ok_or(BoundsViolation::RecordOverflow {
                index: u64::from(index),
                buffer_len,
            })?;
        let fields = start
            .checked_add(MIN_RECORD_STRIDE)
            .and_then(|end| self.bytes.get(start..end))
            .ok_or(BoundsViolation::Record {
                index: u64::from(index),
                start,
                buffer_len,
            })?;

        Ok(Record {
            buffer: self.bytes,
            fields,
            index,
        })
    }
}

/// One record of the index buffer.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    buffer: &'a [u8],
    /// The record's used bytes, exactly `MIN_RECORD_STRIDE` long.
    fields: &'a [u8],
    index: RecordIndex,
}

impl<'a> Record<'a> {
    #[inline]
    pub fn index(&self) -> RecordIndex {
        self.index
    }

    #[inline]
    fn read<const N: usize>(&self, byte_offset: usize) -> Result<[u8; N]> {
        byte_offset
            .checked_add(N)
            .and_then(|end| self.fields.get(byte_offset..end))
            .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
            .ok_or_else(|| {
                BoundsViolation::Field {
                    byte_offset,
                    width: N,
                    record_len: self.fields.len(),
                }
                .into()
            })
    }

    /// Reads a little-endian signed 64-bit integer at `byte_offset`.
    #[inline]
    pub fn i64_field(&self, byte_offset: usize) -> Result<i64> {
        self.read::<8>(byte_offset).map(i64::from_le_bytes)
    }

    /// Reads a little-endian IEEE-754 double at `byte_offset`.
    #[inline]
    pub fn f64_field(&self, byte_offset: usize) -> Result<f64> {
        self.read::<8>(byte_offset).map(f64::from_le_bytes)
    }

    #[inline]
    fn u32_field(&self, byte_offset: usize) -> Result<u32> {
        self.read::<4>(byte_offset).map(u32::from_le_bytes)
    }

    /// Length word of a string field, without touching its payload.
    #[inline]
    pub fn string_len(&self, field: StringField) -> Result<u32> {
        self.u32_field(field.byte_offset() + 4)
    }

    /// Borrows the bytes of a string field from the buffer.
    #[inline]
    pub fn string_field(&self, field: StringField) -> Result<&'a [u8]> {
        let offset = self.u32_field(field.byte_offset())?;
        let len = self.string_len(field)?;
        let start = offset as usize;

        start
            .checked_add(len as usize)
            .and_then(|end| self.buffer.get(start..end))
            .ok_or_else(|| {
                BoundsViolation::Span {
                    field: field.as_str(),
                    offset,
                    len,
                    buffer_len: self.buffer.len(),
                }
                .into()
            })
    }

    /// File size in bytes.
    pub fn size(&self) -> Result<i64> {
        self.i64_field(SIZE_OFFSET)
    }

    /// Modification time in seconds since the epoch.
    pub fn modified(&self) -> Result<f64> {
        self.f64_field(MODIFIED_OFFSET)
    }

    pub fn name(&self) -> Result<&'a [u8]> {
        self.string_field(StringField::Name)
    }

    pub fn path(&self) -> Result<&'a [u8]> {
        self.string_field(StringField::Path)
    }

    pub fn lower_name(&self) -> Result<&'a [u8]> {
        self.string_field(StringField::LowerName)
    }

    pub fn name_lossy(&self) -> Result<Cow<'a, str>> {
        self.name().map(String::from_utf8_lossy)
    }

    pub fn path_lossy(&self) -> Result<Cow<'a, str>> {
        self.path().map(String::from_utf8_lossy)
    }
}
