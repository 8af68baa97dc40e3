//! Reclaimable free-list entries.
//!
//! A [`PoolEntry`] is a handle to an idle buffer that the pool's trimming
//! machinery may invalidate while the handle still sits in the free list.
//! It is an implementation detail and not part of the public API.

use crate::buffer::Buffer;

/// A reclaimable reference to an idle buffer.
///
/// Two states: *live* (the buffer is present and reusable) and *reclaimed*
/// (the backing storage was taken back; only the husk remains). `get` skips
/// husks it encounters when scanning the free list.
#[derive(Debug)]
pub(crate) struct PoolEntry {
    buf: Option<Buffer>,
}

impl PoolEntry {
    /// Wraps a freshly released buffer in a live entry.
    pub(crate) fn new(buf: Buffer) -> Self {
        Self { buf: Some(buf) }
    }

    /// Consumes the entry's buffer. Yields `None` if it was reclaimed.
    pub(crate) fn take(&mut self) -> Option<Buffer> {
        self.buf.take()
    }

    /// Drops the backing buffer in place, leaving the husk.
    pub(crate) fn reclaim(&mut self) {
        self.buf = None;
    }

    /// Returns true if the backing buffer is still present.
    pub(crate) fn is_live(&self) -> bool {
        self.buf.is_some()
    }
}
