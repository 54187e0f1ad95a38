//! Constants shared by the buffer and its debug rendering.
//!
//! # Invariant
//!
//! - `MAX_CAPACITY` equals the largest byte length a `Vec<u8>` can be allocated with
//!   (`isize::MAX`), so any capacity accepted by the buffer is also accepted by the allocator
//!   in principle.
//! - `HEX_SEPARATOR` is a single ASCII character, which keeps the rendered width of `n` bytes at
//!   exactly `3 * n - 1` characters.

/// Largest storage length the buffer will grow to.
///
/// `Vec<u8>` panics when asked for more than `isize::MAX` bytes, so appends that would cross this
/// line are rejected up front with
/// [`ByteBufferError::CapacityOverflow`](crate::ByteBufferError::CapacityOverflow).
pub const MAX_CAPACITY: usize = isize::MAX.unsigned_abs();

/// Separator placed between hex pairs in the debug rendering.
pub const HEX_SEPARATOR: &str = " ";
