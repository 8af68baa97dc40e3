//! The recycling buffer pool.
//!
//! - [`BufferPool`] - Thread-safe pool with `get()`/`release()` API

mod entry;
mod recycler;

pub use recycler::BufferPool;
