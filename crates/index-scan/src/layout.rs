//! Fixed record layout shared by every index generation.
//!
//! Each record is `record_stride` bytes apart starting at `item_base_offset`.
//! Only the first [`MIN_RECORD_STRIDE`] bytes of a record are read:
//!
//! | Offset | Width | Field |
//! |---|---|---|
//! | 0 | 8 | size (i64) |
//! | 8 | 8 | modified (f64 seconds since epoch) |
//! | 16 | 4 | reserved |
//! | 20 | 8 | name offset / length (u32, u32) |
//! | 28 | 8 | path offset / length (u32, u32) |
//! | 36 | 8 | lowercased name offset / length (u32, u32) |
//!
//! All integers are little-endian.

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};

use crate::error::{BoundsViolation, Result};

/// Byte offset of the signed 64-bit size field.
pub const SIZE_OFFSET: usize = 0;
/// Byte offset of the 64-bit float modification time field.
pub const MODIFIED_OFFSET: usize = 8;
/// Byte offset of the display name (offset, length) pair.
pub const NAME_OFFSET: usize = 20;
/// Byte offset of the full path (offset, length) pair.
pub const PATH_OFFSET: usize = 28;
/// Byte offset of the lowercased name (offset, length) pair.
pub const LOWER_NAME_OFFSET: usize = 36;

/// Smallest stride able to hold every field read from a record.
pub const MIN_RECORD_STRIDE: usize = 44;

/// A string field stored as an (offset, length) pair inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringField {
    Name,
    Path,
    LowerName,
}

impl StringField {
    /// Byte offset of the field's offset word; its length word follows it.
    pub fn byte_offset(self) -> usize {
        match self {
            Self::Name => NAME_OFFSET,
            Self::Path => PATH_OFFSET,
            Self::LowerName => LOWER_NAME_OFFSET,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Path => "path",
            Self::LowerName => "lower_name",
        }
    }
}

/// Where records start in the buffer and how far apart they are.
///
/// The stride is validated on construction, so every `RecordLayout` in
/// circulation can hold all record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLayout {
    item_base_offset: usize,
    record_stride: usize,
}

impl RecordLayout {
    /// Creates a layout, rejecting strides too small for the record fields.
    pub fn new(item_base_offset: usize, record_stride: usize) -> Result<Self> {
        if record_stride < MIN_RECORD_STRIDE {
            return Err(BoundsViolation::Stride {
                stride: record_stride,
                required: MIN_RECORD_STRIDE,
            }
            .into());
        }
        Ok(Self {
            item_base_offset,
            record_stride,
        })
    }

    #[inline]
    pub fn item_base_offset(&self) -> usize {
        self.item_base_offset
    }

    #[inline]
    pub fn record_stride(&self) -> usize {
        self.record_stride
    }

    /// Byte position of record `index`, or `None` on arithmetic overflow.
    #[inline]
    pub fn record_start(&self, index: usize) -> Option<usize> {
        index
            .checked_mul(self.record_stride)?
            .checked_add(self.item_base_offset)
    }
}

impl<'de> Deserialize<'de> for RecordLayout {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct RawLayout {
            item_base_offset: usize,
            record_stride: usize,
        }

        let raw = RawLayout::deserialize(deserializer)?;
        Self::new(raw.item_base_offset, raw.record_stride).map_err(D::Error::custom)
    }
}
