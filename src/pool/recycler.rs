//! Core pool implementation - BufferPool with get/release API.
//!
//! This module implements the recycling discipline:
//!
//! - [`BufferPool`] - Thread-safe, bounded pool of one buffer size class
//! - `get()` - Pop a warm buffer from the free list, or allocate fresh
//! - `release()` - Hand a buffer back for reuse
//! - `trim()` - Memory-pressure hook that reclaims idle buffers
//!
//! # Example
//!
//! ```
//! use recyclebuf::{BufferPool, PoolConfig};
//!
//! let pool = BufferPool::new(PoolConfig::new(8192, 4096, 4096)?)?;
//!
//! let buf = pool.get(4096)?;
//! assert_eq!(buf.capacity(), 8192); // always the full size class
//! pool.release(buf);
//!
//! assert_eq!(pool.idle_count(), 1);
//! # Ok::<(), recyclebuf::PoolError>(())
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::buffer::Buffer;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::pool::entry::PoolEntry;

/// A bounded, thread-safe recycling pool for fixed-capacity scratch buffers.
///
/// The pool serves exactly one size class: the maximum of the three staging
/// sizes in its [`PoolConfig`]. Every buffer it vends has that capacity,
/// even when the caller requests less; callers use only the prefix they
/// need. This keeps buffer identity stable across recycle cycles, which the
/// surrounding codec relies on.
///
/// # Recycling discipline
///
/// Released buffers are cleared and pushed to the *front* of the free list,
/// and `get` pops from the front: the most recently used buffer is the first
/// candidate for reuse (warm caches), while idle buffers age toward the back
/// where eviction and [`BufferPool::trim`] find them first.
///
/// # Bounded idleness
///
/// The free list retains at most `max_idle` entries; releasing beyond the
/// cap drops the coldest buffer instead of pooling it. Hosts under memory
/// pressure can additionally call [`BufferPool::trim`] to reclaim idle
/// buffers immediately.
///
/// # Sharing
///
/// `BufferPool` is `Clone`; clones share the same free list through an
/// inner `Arc`. Construct one per process (or per distinct size class in
/// tests) and pass handles to collaborators.
#[derive(Debug, Clone)]
pub struct BufferPool {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// The single fixed capacity of every buffer this pool vends.
    buffer_size: usize,
    /// Most idle entries the free list keeps before dropping excess.
    max_idle: usize,
    /// Free list: warm entries at the front, cold at the back.
    free: Mutex<VecDeque<PoolEntry>>,
    /// Total number of fresh buffer allocations performed.
    allocations: AtomicU64,
}

impl Inner {
    /// Locks the free list, recovering from poisoning.
    ///
    /// The guarded state is a plain deque of owned entries; a panicking
    /// holder cannot leave it logically torn.
    fn free(&self) -> MutexGuard<'_, VecDeque<PoolEntry>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BufferPool {
    /// Creates a new pool from the given configuration.
    ///
    /// The pool's fixed buffer capacity is [`PoolConfig::buffer_size`],
    /// computed once here and immutable thereafter.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration fails
    /// [`PoolConfig::validate`].
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                buffer_size: config.buffer_size(),
                max_idle: config.max_idle(),
                free: Mutex::new(VecDeque::new()),
                allocations: AtomicU64::new(0),
            }),
        })
    }

    /// Returns a buffer with capacity [`BufferPool::buffer_size`].
    ///
    /// The requested capacity only gates admission; the returned buffer is
    /// always the full size class and the caller is expected to use the
    /// prefix it needs. Reuses the warmest live free-list entry when one
    /// exists; otherwise allocates a fresh zero-filled buffer. Reclaimed
    /// husks encountered during the scan are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnsupportedSize`] if `capacity` exceeds the
    /// pool's size class. That signals a caller or configuration bug and is
    /// never retried internally.
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::{BufferPool, PoolConfig};
    ///
    /// let pool = BufferPool::new(PoolConfig::new(1024, 512, 512)?)?;
    ///
    /// let buf = pool.get(100)?;
    /// assert_eq!(buf.capacity(), 1024);
    ///
    /// assert!(pool.get(2048).is_err());
    /// # Ok::<(), recyclebuf::PoolError>(())
    /// ```
    pub fn get(&self, capacity: usize) -> Result<Buffer, PoolError> {
        if capacity > self.inner.buffer_size {
            return Err(PoolError::UnsupportedSize {
                requested: capacity,
                supported: self.inner.buffer_size,
            });
        }

        {
            let mut free = self.inner.free();
            while let Some(mut entry) = free.pop_front() {
                if let Some(buf) = entry.take() {
                    // Already cleared at release time; ready to use as-is.
                    return Ok(buf);
                }
                // Reclaimed husk: discard and keep scanning.
            }
        }

        // No live entry; allocate outside the lock.
        self.inner.allocations.fetch_add(1, Ordering::Relaxed);
        Ok(Buffer::with_capacity(self.inner.buffer_size))
    }

    /// Hands a buffer back to the pool for reuse.
    ///
    /// The buffer's logical content is reset to empty *before* it enters
    /// the free list, so pooled buffers hold no reference to previous
    /// contents and the next `get` has no clearing step on the hot path.
    ///
    /// Buffers smaller than the pool's size class are silently dropped
    /// rather than pooled - a guard against foreign or stale buffers. There
    /// is no failure path: releasing is best-effort hand-back, and callers
    /// releasing during their own cleanup should not have to handle a
    /// rejection.
    pub fn release(&self, mut buffer: Buffer) {
        if buffer.capacity() < self.inner.buffer_size {
            return;
        }
        buffer.clear();

        let mut free = self.inner.free();
        free.push_front(PoolEntry::new(buffer));

        // The cap evicts from the cold end, husks and all.
        while free.len() > self.inner.max_idle {
            free.pop_back();
        }
    }

    /// Reclaims idle buffers until at most `keep` live entries remain.
    ///
    /// Memory-pressure hook for the host: works from the cold end of the
    /// free list, dropping backing storage in place. The husks left behind
    /// are skipped by subsequent `get` calls. Buffers currently on loan are
    /// unaffected.
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::{BufferPool, PoolConfig};
    ///
    /// let pool = BufferPool::new(PoolConfig::new(1024, 512, 512)?)?;
    /// let (a, b) = (pool.get(1024)?, pool.get(1024)?);
    /// pool.release(a);
    /// pool.release(b);
    ///
    /// pool.trim(0);
    /// assert_eq!(pool.idle_count(), 0);
    /// # Ok::<(), recyclebuf::PoolError>(())
    /// ```
    pub fn trim(&self, keep: usize) {
        let mut free = self.inner.free();
        let mut live = free.iter().filter(|e| e.is_live()).count();
        for entry in free.iter_mut().rev() {
            if live <= keep {
                break;
            }
            if entry.is_live() {
                entry.reclaim();
                live -= 1;
            }
        }
    }

    /// Returns the single fixed capacity of every buffer this pool vends.
    pub fn buffer_size(&self) -> usize {
        self.inner.buffer_size
    }

    /// Returns the number of live buffers currently idle in the free list.
    pub fn idle_count(&self) -> usize {
        self.inner.free().iter().filter(|e| e.is_live()).count()
    }

    /// Returns the total number of fresh buffer allocations performed.
    ///
    /// Steady-state recycling keeps this flat; a growing count under a
    /// stable workload means buffers are not being released.
    pub fn allocation_count(&self) -> u64 {
        self.inner.allocations.load(Ordering::Relaxed)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        match Self::new(PoolConfig::default()) {
            Ok(pool) => pool,
            // The default configuration is statically valid.
            Err(_) => unreachable!(),
        }
    }
}
