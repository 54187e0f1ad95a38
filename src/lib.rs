//! A growable byte buffer with an explicit logical size, for use as an output parameter.
//!
//! A `Vec<u8>` ties its length to its initialised contents. [`ByteBuffer`] instead keeps fully
//! initialised storage and a separate logical size, so a routine can fill it piece by piece,
//! reuse storage across calls with [`set()`](ByteBuffer::set), and finally give the storage
//! back to the caller with [`release_bytes()`](ByteBuffer::release_bytes) without copying.
//!
//! # Quick start
//!
//! ```
//! use byte_wrapper::ByteBuffer;
//!
//! let mut buffer = ByteBuffer::new();
//!
//! // Fill incrementally; appends chain
//! buffer
//!     .append(&[0x01], 0, 1)
//!     .unwrap()
//!     .append(&[0x02, 0x03], 0, 2)
//!     .unwrap();
//! assert_eq!(buffer.bytes(), &[0x01, 0x02, 0x03]);
//! assert_eq!(buffer.to_string(), "01 02 03");
//!
//! // Overwrite with a slice of something else, keeping the storage
//! buffer.set(&[0xAA, 0xBB, 0xCC, 0xDD], 1, 3).unwrap();
//! assert_eq!(buffer.bytes(), &[0xBB, 0xCC]);
//! assert_eq!(buffer.capacity(), 3);
//!
//! // Take ownership of the storage
//! let storage = buffer.release_bytes().unwrap();
//! assert_eq!(&storage[..2], &[0xBB, 0xCC]);
//! assert!(buffer.is_empty());
//! ```
//!
//! # Adopting and copying storage
//!
//! ```
//! use byte_wrapper::{ByteBuffer, ByteBufferError};
//!
//! // Adopt a caller vector, only the first two bytes are valid
//! let buffer = ByteBuffer::adopt(Some(vec![9, 8, 7, 6]), 2).unwrap();
//! assert_eq!(buffer.bytes(), &[9, 8]);
//!
//! // The size must fit the storage
//! let err = ByteBuffer::adopt(Some(vec![1]), 2).unwrap_err();
//! assert_eq!(err, ByteBufferError::IllegalSize { size: 2, len: 1 });
//!
//! // Copy out of any `bytes::Buf`
//! let copied = ByteBuffer::from_buf_limited(&b"abcdef"[..], 3).unwrap();
//! assert_eq!(copied.bytes(), b"abc");
//! ```
//!
//! # Crate organisation
//!
//! - [`ByteBuffer`] — the buffer itself.
//! - [`ByteBufferError`] — errors for out of range sizes and slices, short sources and
//!   capacity overflow.
//! - [`constants`] — [`MAX_CAPACITY`](constants::MAX_CAPACITY) and the hex separator used by
//!   the `Display` rendering.
//!
//! Storage reallocation and release are logged through [`tracing`] at `trace` level.

pub mod buffer;
pub mod constants;
mod error;

pub use buffer::ByteBuffer;
pub use error::{ByteBufferError, Result};
