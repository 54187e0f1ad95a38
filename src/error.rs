//! Error type for [`ByteBuffer`](crate::ByteBuffer) operations.
//!
//! Every fallible operation checks its inputs before touching the buffer, so an `Err` always
//! means the buffer is exactly as it was before the call.

use thiserror::Error;

/// Errors returned by [`ByteBuffer`](crate::ByteBuffer) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ByteBufferError {
    /// An adopted size does not fit the adopted storage.
    ///
    /// `len` is 0 when no storage was supplied.
    #[error("illegal size: {size} (storage length {len})")]
    IllegalSize { size: usize, len: usize },

    /// A `[start, limit)` range does not lie within a slice of length `len`.
    #[error("illegal range {start}..{limit} for slice of length {len}")]
    IllegalRange {
        start: usize,
        limit: usize,
        len: usize,
    },

    /// A bounded source holds fewer bytes than were requested.
    #[error("requested {requested} bytes but only {remaining} remain in source")]
    Underflow { requested: usize, remaining: usize },

    /// Growing by `additional` bytes would exceed [`MAX_CAPACITY`](crate::constants::MAX_CAPACITY).
    #[error("capacity overflow: cannot grow size {size} by {additional} bytes")]
    CapacityOverflow { size: usize, additional: usize },

    /// More bytes were requested than the buffer holds.
    #[error("limit too long: requested {requested} bytes from buffer of size {size}")]
    ExceedsSize { requested: usize, size: usize },
}

/// Result alias used throughout the crate.
pub type Result<T, E = ByteBufferError> = std::result::Result<T, E>;
