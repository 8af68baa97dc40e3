//! The Buffer type - fixed-capacity scratch memory for codec sessions.

use bytes::Buf;
use std::fmt;

/// A fixed-capacity, mutable byte region handed out by the pool.
///
/// A `Buffer` is allocated zero-filled at exactly the pool's size class and
/// never grows. It tracks two cursors over its storage:
///
/// - the *filled length* - how many bytes the holder has written
/// - the *read position* - how many of those bytes have been consumed
///
/// Codecs either append with [`Buffer::write`], or write directly into
/// [`Buffer::as_mut_slice`] and record the produced length with
/// [`Buffer::set_filled`]. The filled region is drained through the
/// [`bytes::Buf`] implementation or read wholesale via [`Buffer::filled`].
///
/// Ownership is exclusive: a buffer is held either by a codec session or by
/// the pool's free list, never both.
///
/// # Example
///
/// ```
/// use recyclebuf::Buffer;
/// use bytes::Buf;
///
/// let mut buf = Buffer::with_capacity(16);
/// assert_eq!(buf.write(b"hello"), 5);
/// assert_eq!(buf.filled(), b"hello");
///
/// buf.advance(2);
/// assert_eq!(buf.chunk(), b"llo");
///
/// buf.clear();
/// assert!(buf.is_empty());
/// assert_eq!(buf.capacity(), 16);
/// ```
pub struct Buffer {
    data: Box<[u8]>,
    filled: usize,
    pos: usize,
}

impl Buffer {
    /// Allocates a new zero-filled buffer with exactly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            filled: 0,
            pos: 0,
        }
    }

    /// Returns the fixed capacity of the buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of bytes written so far.
    pub fn filled_len(&self) -> usize {
        self.filled
    }

    /// Returns the number of bytes that can still be written.
    pub fn remaining_capacity(&self) -> usize {
        self.data.len() - self.filled
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Appends bytes from `src`, truncating at the capacity ceiling.
    ///
    /// Returns the number of bytes actually copied, which is less than
    /// `src.len()` when the buffer runs out of room. The capacity never
    /// changes.
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::Buffer;
    ///
    /// let mut buf = Buffer::with_capacity(4);
    /// assert_eq!(buf.write(b"abcdef"), 4);
    /// assert_eq!(buf.filled(), b"abcd");
    /// ```
    pub fn write(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.remaining_capacity());
        self.data[self.filled..self.filled + n].copy_from_slice(&src[..n]);
        self.filled += n;
        n
    }

    /// Returns the written prefix of the buffer.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Returns a view of the full capacity, regardless of the filled length.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable view of the full capacity.
    ///
    /// Codecs that produce output directly into the storage should record
    /// how much they wrote with [`Buffer::set_filled`] afterwards.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Records that the first `filled` bytes of the storage now hold data.
    ///
    /// The read position is clamped so it never points past the filled
    /// region.
    ///
    /// # Panics
    ///
    /// Panics if `filled > capacity` - that is a caller bug, not a
    /// recoverable condition.
    pub fn set_filled(&mut self, filled: usize) {
        assert!(
            filled <= self.data.len(),
            "filled length {} exceeds capacity {}",
            filled,
            self.data.len()
        );
        self.filled = filled;
        self.pos = self.pos.min(filled);
    }

    /// Resets the logical content to empty without touching the storage.
    ///
    /// The capacity is unchanged; stale bytes beyond the cursors are simply
    /// overwritten by the next holder.
    pub fn clear(&mut self) {
        self.filled = 0;
        self.pos = 0;
    }
}

impl Buf for Buffer {
    fn remaining(&self) -> usize {
        self.filled - self.pos
    }

    fn chunk(&self) -> &[u8] {
        &self.data[self.pos..self.filled]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past the filled region"
        );
        self.pos += cnt;
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.capacity())
            .field("filled", &self.filled)
            .field("pos", &self.pos)
            .finish()
    }
}
