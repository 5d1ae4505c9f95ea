use thiserror::Error;

/// Typed buffer failures carried inside `eyre` reports.
///
/// Buffer operations return `eyre::Result`; when a caller needs to tell an
/// out-of-bounds access apart from an I/O failure it can recover this value
/// with `report.downcast_ref::<BufferError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("range [{index}, {index}+{len}) out of bounds (limit={limit})")]
    OutOfBounds { index: u64, len: u64, limit: u64 },

    #[error("buffer is read-only")]
    ReadOnly,

    #[error("invalid segment size {requested} (must be in 1..={max})")]
    InvalidSegmentSize { requested: u64, max: u64 },

    #[error("char U+{0:04X} does not fit a single UTF-16 code unit")]
    UnencodableChar(u32),

    #[error("UTF-16 code unit {0:#06x} is not a scalar value")]
    InvalidCodeUnit(u16),
}

/// Fails with `OutOfBounds` unless `[index, index + len)` lies within `limit`.
#[inline]
pub(crate) fn check_range(index: u64, len: u64, limit: u64) -> eyre::Result<()> {
    match index.checked_add(len) {
        Some(end) if end <= limit => Ok(()),
        _ => Err(BufferError::OutOfBounds { index, len, limit }.into()),
    }
}
