//! recyclebuf
//!
//! A bounded, thread-safe recycling pool for compression scratch buffers.
//!
//! `recyclebuf` supplies fixed-capacity staging buffers to a streaming
//! compression/decompression pipeline. Finished codec sessions hand their
//! buffers back for reuse, so steady-state operation performs no allocation,
//! while idle buffers are bounded and trimmable so the pool never pins
//! memory indefinitely.
//!
//! The crate intentionally:
//! - serves exactly ONE buffer size class (the largest the codec recommends)
//! - does NOT implement compression itself
//! - does NOT do stream framing or I/O
//! - does NOT act as a general-purpose object pool
//!
//! It only does one thing: **get a scratch buffer → give it back**
//!
//! # Example
//!
//! ```
//! use recyclebuf::{BufferPool, PoolConfig, PoolError};
//!
//! fn main() -> Result<(), PoolError> {
//!     let pool = BufferPool::new(PoolConfig::default())?;
//!
//!     let mut buf = pool.get(64 * 1024)?;
//!     let written = buf.write(b"staged output");
//!     assert_eq!(written, 13);
//!
//!     // Hand the buffer back; the next `get` reuses it without allocating.
//!     pool.release(buf);
//!     Ok(())
//! }
//! ```
//!
//! # Sharing across threads
//!
//! ```
//! use std::thread;
//! use recyclebuf::BufferPool;
//!
//! let pool = BufferPool::default();
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let pool = pool.clone();
//!         thread::spawn(move || {
//!             let buf = pool.get(1024).unwrap();
//!             pool.release(buf);
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod pool;

//
// Public surface (intentionally tiny)
//

pub use buffer::Buffer;
pub use config::PoolConfig;
pub use error::PoolError;
pub use pool::BufferPool;
