/// Describes which part of the record contract a buffer violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsViolation {
    /// The configured stride cannot hold every field of a record.
    #[error("record stride {stride} is smaller than the {required} byte record layout")]
    Stride { stride: usize, required: usize },

    /// The record's used bytes fall outside the buffer.
    #[error("record {index} starting at byte {start} exceeds buffer of {buffer_len} bytes")]
    Record {
        index: u64,
        start: usize,
        buffer_len: usize,
    },

    /// The record's start offset does not fit in `usize`.
    #[error("record {index} offset overflows (buffer is {buffer_len} bytes)")]
    RecordOverflow { index: u64, buffer_len: usize },

    /// A fixed-width field read past the record's used bytes.
    #[error("{width} byte field at offset {byte_offset} exceeds {record_len} byte record")]
    Field {
        byte_offset: usize,
        width: usize,
        record_len: usize,
    },

    /// A string span referenced by a record falls outside the buffer.
    #[error("{field} span {offset}+{len} exceeds buffer of {buffer_len} bytes")]
    Span {
        field: &'static str,
        offset: u32,
        len: u32,
        buffer_len: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum IndexScanError {
    #[error("Out of bounds: {0}")]
    OutOfBounds(#[from] BoundsViolation),

    #[error("Capacity exceeded: output holds {capacity} slots, range {start}..{end} matched more")]
    CapacityExceeded {
        capacity: usize,
        start: usize,
        end: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexScanError {
    /// Returns true if the buffer broke the record contract and needs re-indexing.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds(_))
    }
}

pub type Result<T> = std::result::Result<T, IndexScanError>;
