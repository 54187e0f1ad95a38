//! Growable byte buffer with a logical size distinct from its storage length.
//!
//! The [`ByteBuffer`] type is meant to be handed to a routine as an output parameter. The routine
//! appends into it, growing the storage as needed, and the caller finally takes the storage back
//! with [`release_bytes()`](ByteBuffer::release_bytes).
//!
//! # Example
//!
//! ```
//! use byte_wrapper::ByteBuffer;
//!
//! fn produce(out: &mut ByteBuffer) -> byte_wrapper::Result<()> {
//!     out.append_slice(b"\x01\x02")?;
//!     out.append_slice(b"\x03")?;
//!     Ok(())
//! }
//!
//! let mut buffer = ByteBuffer::new();
//! produce(&mut buffer).unwrap();
//! assert_eq!(buffer.to_string(), "01 02 03");
//!
//! // Take the storage; the buffer is empty again
//! let storage = buffer.release_bytes().unwrap();
//! assert_eq!(&storage[..3], &[0x01, 0x02, 0x03]);
//! assert!(buffer.storage().is_none());
//! ```

use crate::constants::{HEX_SEPARATOR, MAX_CAPACITY};
use crate::error::{ByteBufferError, Result};
use bytes::Buf;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;
use std::str;
use tracing::trace;

/// A growable byte buffer that tracks how much of its storage is in use.
///
/// The storage is a plain `Vec<u8>` whose full length is the buffer's
/// [`capacity()`](Self::capacity). Only the first [`len()`](Self::len) bytes are meaningful; the
/// rest is scratch space left over from earlier growth or from adopted storage.
///
/// # Capacity Management
///
/// Growth is exact: [`ensure_capacity()`](Self::ensure_capacity) allocates precisely the requested
/// number of bytes, copies the live prefix and drops the old storage. Appends grow to exactly
/// `len() + appended`. Callers that expect many small appends should reserve up front.
///
/// # Value Semantics
///
/// Equality, hashing and ordering look only at the logical content. Storage length is ignored,
/// with the single exception of the legacy [`hash_code()`](Self::hash_code).
///
/// # Invariants
///
/// `self.size <= self.bytes.len()` when storage is present, and `self.size == 0` when it is not.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    /// Backing storage, `None` until something is allocated or adopted, and after release.
    bytes: Option<Vec<u8>>,
    /// Number of valid bytes at the start of `bytes`.
    size: usize,
}

impl ByteBuffer {
    /// Creates a new buffer with no storage.
    ///
    /// Nothing is allocated until the first append or [`ensure_capacity()`](Self::ensure_capacity).
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::new();
    /// assert_eq!(buffer.len(), 0);
    /// assert!(buffer.storage().is_none());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            bytes: None,
            size: 0,
        }
    }

    /// Creates a buffer that takes ownership of `bytes`, of which the first `size` are valid.
    ///
    /// The storage is moved in, not copied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::adopt(Some(vec![1, 2, 3, 0, 0]), 3).unwrap();
    /// assert_eq!(buffer.bytes(), &[1, 2, 3]);
    /// assert_eq!(buffer.capacity(), 5);
    ///
    /// assert!(ByteBuffer::adopt(Some(vec![1, 2]), 3).is_err());
    /// assert!(ByteBuffer::adopt(None, 1).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::IllegalSize`] if `size` is larger than `bytes`, or if `bytes` is
    /// `None` and `size` is not 0.
    pub fn adopt(bytes: Option<Vec<u8>>, size: usize) -> Result<Self> {
        let len = bytes.as_ref().map_or(0, Vec::len);

        if size > len {
            return Err(ByteBufferError::IllegalSize { size, len });
        }

        Ok(Self { bytes, size })
    }

    /// Creates a buffer holding every remaining byte of `source`.
    ///
    /// The storage is sized exactly to the number of bytes read.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::from_buf(&b"\x0a\xff"[..]);
    /// assert_eq!(buffer.to_string(), "0A FF");
    /// assert_eq!(buffer.capacity(), 2);
    /// ```
    pub fn from_buf(mut source: impl Buf) -> Self {
        let size = source.remaining();
        let mut bytes = vec![0; size];
        source.copy_to_slice(&mut bytes);

        Self {
            bytes: Some(bytes),
            size,
        }
    }

    /// Creates a buffer holding the next `limit` bytes of `source`.
    ///
    /// The storage is sized exactly to `limit`. Bytes after the first `limit` are left in the
    /// source.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// use bytes::Buf;
    ///
    /// let mut source = &b"Hello, World!"[..];
    /// let buffer = ByteBuffer::from_buf_limited(&mut source, 5).unwrap();
    /// assert_eq!(buffer.bytes(), b"Hello");
    /// assert_eq!(source.remaining(), 8);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::Underflow`] if fewer than `limit` bytes remain in `source`.
    /// Nothing is consumed from the source in that case.
    pub fn from_buf_limited(mut source: impl Buf, limit: usize) -> Result<Self> {
        let remaining = source.remaining();

        if limit > remaining {
            return Err(ByteBufferError::Underflow {
                requested: limit,
                remaining,
            });
        }

        let mut bytes = vec![0; limit];
        source.copy_to_slice(&mut bytes);

        Ok(Self {
            bytes: Some(bytes),
            size: limit,
        })
    }

    /// Creates a buffer holding a copy of `src[start..limit]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::from_range(&[0xAA, 0xBB, 0xCC, 0xDD], 1, 3).unwrap();
    /// assert_eq!(buffer.bytes(), &[0xBB, 0xCC]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::IllegalRange`] if `start > limit` or `limit > src.len()`.
    pub fn from_range(src: &[u8], start: usize, limit: usize) -> Result<Self> {
        let chunk = checked_range(src, start, limit)?;

        Ok(Self {
            bytes: Some(chunk.to_vec()),
            size: chunk.len(),
        })
    }

    /// Returns the logical content, the first [`len()`](Self::len) bytes of the storage.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        match &self.bytes {
            Some(bytes) => &bytes[..self.size],
            None => &[],
        }
    }

    /// Returns the whole storage, including bytes past the logical size.
    ///
    /// `None` when the buffer has no storage (fresh, or after
    /// [`release_bytes()`](Self::release_bytes)).
    #[inline]
    pub fn storage(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Returns the number of valid bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the buffer holds no valid bytes.
    ///
    /// The buffer may still own storage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the storage length, or 0 if there is no storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.as_ref().map_or(0, Vec::len)
    }

    /// Ensures the storage is at least `capacity` bytes long.
    ///
    /// If there is no storage, or it is shorter than `capacity`, new storage of exactly `capacity`
    /// bytes is allocated and the first [`len()`](Self::len) bytes are copied over. Bytes past the
    /// logical size are not carried across. Otherwise nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let mut buffer = ByteBuffer::new();
    /// buffer.ensure_capacity(16);
    /// assert_eq!(buffer.capacity(), 16);
    ///
    /// // No-op when already large enough
    /// buffer.ensure_capacity(4).append_slice(b"abc").unwrap();
    /// assert_eq!(buffer.capacity(), 16);
    /// assert_eq!(buffer.bytes(), b"abc");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`], or if the allocation fails.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    pub fn ensure_capacity(&mut self, capacity: usize) -> &mut Self {
        let current = self.capacity();

        if self.bytes.is_none() || current < capacity {
            // size <= current < capacity, so the live prefix always fits.
            let mut grown = vec![0; capacity];
            grown[..self.size].copy_from_slice(self.bytes());

            trace!(
                from = current,
                to = capacity,
                size = self.size,
                "reallocating byte buffer storage"
            );
            self.bytes = Some(grown);
        }

        self
    }

    /// Replaces the logical content with `src[start..limit]`.
    ///
    /// The storage grows if needed but is never shrunk. Stale bytes past the new size are left in
    /// place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let mut buffer = ByteBuffer::from(vec![1, 2, 3, 4, 5]);
    /// buffer.set(&[0xAA, 0xBB, 0xCC, 0xDD], 1, 3).unwrap();
    /// assert_eq!(buffer.bytes(), &[0xBB, 0xCC]);
    /// assert_eq!(buffer.capacity(), 5);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::IllegalRange`] if `start > limit` or `limit > src.len()`. The
    /// buffer is left unchanged.
    pub fn set(&mut self, src: &[u8], start: usize, limit: usize) -> Result<&mut Self> {
        // Validate before resetting so a bad range can't truncate the buffer.
        checked_range(src, start, limit)?;

        self.size = 0;
        self.append(src, start, limit)
    }

    /// Appends `src[start..limit]` after the current content.
    ///
    /// The storage grows to exactly `len() + (limit - start)` bytes when it's too short.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let mut buffer = ByteBuffer::new();
    /// buffer
    ///     .append(&[0x01], 0, 1)
    ///     .unwrap()
    ///     .append(&[0x00, 0x02, 0x03], 1, 3)
    ///     .unwrap();
    /// assert_eq!(buffer.bytes(), &[0x01, 0x02, 0x03]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::IllegalRange`] if `start > limit` or `limit > src.len()`, and
    /// [`ByteBufferError::CapacityOverflow`] if the new size would exceed [`MAX_CAPACITY`]. The
    /// buffer is left unchanged in both cases.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    pub fn append(&mut self, src: &[u8], start: usize, limit: usize) -> Result<&mut Self> {
        let chunk = checked_range(src, start, limit)?;

        let size = self.size;
        let end = size
            .checked_add(chunk.len())
            .filter(|&end| end <= MAX_CAPACITY)
            .ok_or(ByteBufferError::CapacityOverflow {
                size,
                additional: chunk.len(),
            })?;

        self.ensure_capacity(end);
        if let Some(bytes) = self.bytes.as_mut() {
            bytes[size..end].copy_from_slice(chunk);
        }
        self.size = end;

        Ok(self)
    }

    /// Appends the whole of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::CapacityOverflow`] if the new size would exceed
    /// [`MAX_CAPACITY`].
    #[inline]
    pub fn append_slice(&mut self, src: &[u8]) -> Result<&mut Self> {
        self.append(src, 0, src.len())
    }

    /// Appends the logical content of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::CapacityOverflow`] if the new size would exceed
    /// [`MAX_CAPACITY`].
    #[inline]
    pub fn append_buffer(&mut self, other: &ByteBuffer) -> Result<&mut Self> {
        self.append_slice(other.bytes())
    }

    /// Copies the first `limit - start` bytes of the buffer into `target[start..limit]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::from(vec![7, 8, 9]);
    /// let mut target = [0u8; 4];
    /// buffer.copy_to(&mut target, 1, 3).unwrap();
    /// assert_eq!(target, [0, 7, 8, 0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ByteBufferError::IllegalRange`] if `start > limit` or `limit > target.len()`,
    /// and [`ByteBufferError::ExceedsSize`] if `limit - start` is larger than [`len()`](Self::len).
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    pub fn copy_to(&self, target: &mut [u8], start: usize, limit: usize) -> Result<()> {
        let len = checked_range(target, start, limit)?.len();

        if len > self.size {
            return Err(ByteBufferError::ExceedsSize {
                requested: len,
                size: self.size,
            });
        }

        target[start..limit].copy_from_slice(&self.bytes()[..len]);
        Ok(())
    }

    /// Hands the storage to the caller and resets the buffer to its empty state.
    ///
    /// No bytes are copied. The returned storage may be longer than the logical size that was in
    /// use; callers are expected to have read [`len()`](Self::len) beforehand.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let mut buffer = ByteBuffer::adopt(Some(vec![1, 2, 3, 4]), 2).unwrap();
    /// let storage = buffer.release_bytes();
    /// assert_eq!(storage, Some(vec![1, 2, 3, 4]));
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.release_bytes(), None);
    /// ```
    pub fn release_bytes(&mut self) -> Option<Vec<u8>> {
        trace!(
            capacity = self.capacity(),
            size = self.size,
            "releasing byte buffer storage"
        );

        self.size = 0;
        self.bytes.take()
    }

    /// Returns the legacy hash of the buffer.
    ///
    /// The hash is seeded with the storage length, then folds every valid byte in as
    /// `37 * hash + byte` using wrapping `i32` arithmetic. Bytes are read as unsigned.
    ///
    /// Because of the seed, two equal buffers with different capacities usually hash differently
    /// here. The [`Hash`] impl does not share that flaw and is what `HashMap` uses.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let buffer = ByteBuffer::from(vec![0x01, 0xFF]);
    /// assert_eq!(buffer.hash_code(), (2 * 37 + 0x01) * 37 + 0xFF);
    /// ```
    pub fn hash_code(&self) -> i32 {
        // Storage lengths past i32::MAX wrap, matching a 32-bit length field.
        let seed = self.capacity() as i32;

        self.bytes().iter().fold(seed, |hash, &byte| {
            hash.wrapping_mul(37).wrapping_add(i32::from(byte))
        })
    }

    /// Compares the logical content of two buffers, returning the signed distance.
    ///
    /// The first differing byte decides, as the difference of the two bytes read unsigned. If one
    /// buffer is a prefix of the other, the result is the difference in sizes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use byte_wrapper::ByteBuffer;
    /// let a = ByteBuffer::from(vec![0x01, 0x80]);
    /// let b = ByteBuffer::from(vec![0x01, 0x7F]);
    /// assert_eq!(a.compare_to(&b), 1);
    ///
    /// let c = ByteBuffer::from(vec![0x01]);
    /// assert_eq!(c.compare_to(&a), -1);
    /// assert_eq!(a.compare_to(&a), 0);
    /// ```
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    pub fn compare_to(&self, other: &ByteBuffer) -> isize {
        if ptr::eq(self, other) {
            return 0;
        }

        for (&a, &b) in self.bytes().iter().zip(other.bytes()) {
            if a != b {
                return isize::from(a) - isize::from(b);
            }
        }

        // Sizes never exceed MAX_CAPACITY, which is isize::MAX.
        self.size as isize - other.size as isize
    }
}

/// Returns `src[start..limit]`, or an error if the range is out of bounds.
fn checked_range(src: &[u8], start: usize, limit: usize) -> Result<&[u8]> {
    src.get(start..limit)
        .ok_or(ByteBufferError::IllegalRange {
            start,
            limit,
            len: src.len(),
        })
}

impl Clone for ByteBuffer {
    /// Copies the logical content into storage of exactly [`len()`](Self::len) bytes.
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.as_ref().map(|_| self.bytes().to_vec()),
            size: self.size,
        }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    /// Adopts the whole vector as valid content.
    fn from(bytes: Vec<u8>) -> Self {
        let size = bytes.len();

        Self {
            bytes: Some(bytes),
            size,
        }
    }
}

impl AsRef<[u8]> for ByteBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes()
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || self.bytes() == other.bytes()
    }
}

impl Eq for ByteBuffer {}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes().hash(state);
    }
}

impl PartialOrd for ByteBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

impl fmt::Display for ByteBuffer {
    /// Renders the valid bytes as space separated uppercase hex pairs, e.g. `0A FF`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pair = [0u8; 2];

        for (i, byte) in self.bytes().iter().enumerate() {
            if i != 0 {
                f.write_str(HEX_SEPARATOR)?;
            }

            hex::encode_to_slice([*byte], &mut pair).map_err(|_| fmt::Error)?;
            pair.make_ascii_uppercase();
            f.write_str(str::from_utf8(&pair).map_err(|_| fmt::Error)?)?;
        }

        Ok(())
    }
}
