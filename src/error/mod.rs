//! Error types for recyclebuf.

use std::fmt;

/// Errors that can occur when configuring or using a buffer pool.
#[derive(Debug)]
pub enum PoolError {
    /// A `get` requested more capacity than the pool's fixed size class.
    UnsupportedSize {
        /// The capacity that was requested.
        requested: usize,
        /// The largest capacity the pool supports.
        supported: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::UnsupportedSize {
                requested,
                supported,
            } => {
                write!(
                    f,
                    "unsupported buffer size: {} (supported: {} or smaller)",
                    requested, supported
                )
            }
            PoolError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for PoolError {}
