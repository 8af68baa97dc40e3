//! Configuration for pool sizing behavior.
//!
//! This module provides [`PoolConfig`], which carries the three staging
//! buffer sizes recommended by the codec layer plus the idle-retention cap.
//! The pool's single fixed buffer capacity is the maximum of the three
//! recommended sizes.
//!
//! # Example
//!
//! ```
//! use recyclebuf::PoolConfig;
//!
//! // Custom staging sizes
//! let config = PoolConfig::new(256 * 1024, 128 * 1024, 128 * 1024)?;
//! assert_eq!(config.buffer_size(), 256 * 1024);
//!
//! // Tune idle retention
//! let config = PoolConfig::default().with_max_idle(16);
//!
//! # Ok::<(), recyclebuf::PoolError>(())
//! ```

use crate::error::PoolError;

/// Default recommended compression output staging size.
///
/// Worst-case compressed size of one 128 KiB block plus frame overhead,
/// matching zstd's streaming output recommendation.
pub const DEFAULT_COMPRESS_OUT_SIZE: usize = 131_591;

/// Default recommended decompression input staging size.
///
/// One 128 KiB block plus the 3-byte block header, matching zstd's
/// streaming input recommendation.
pub const DEFAULT_DECOMPRESS_IN_SIZE: usize = 131_075;

/// Default recommended decompression output staging size (one 128 KiB block).
pub const DEFAULT_DECOMPRESS_OUT_SIZE: usize = 131_072;

/// Default maximum number of idle buffers the free list retains.
pub const DEFAULT_MAX_IDLE: usize = 8;

/// Configuration for a [`BufferPool`](crate::BufferPool).
///
/// A pool vends buffers of exactly one capacity: the maximum of the three
/// staging sizes the codec layer recommends for compression output,
/// decompression input, and decompression output. `max_idle` bounds how many
/// idle buffers the free list keeps before excess releases are dropped, so
/// an idle pool never pins memory indefinitely.
///
/// # Constraints
///
/// All three sizes and `max_idle` must be non-zero.
///
/// # Example
///
/// ```
/// use recyclebuf::PoolConfig;
///
/// // Use default (zstd streaming) sizes
/// let config = PoolConfig::default();
///
/// // Custom configuration
/// let config = PoolConfig::new(8192, 4096, 4096)?;
///
/// // Builder pattern
/// let config = PoolConfig::default()
///     .with_compress_out_size(256 * 1024)
///     .with_max_idle(4);
/// # Ok::<(), recyclebuf::PoolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Recommended compression output staging size in bytes.
    compress_out_size: usize,

    /// Recommended decompression input staging size in bytes.
    decompress_in_size: usize,

    /// Recommended decompression output staging size in bytes.
    decompress_out_size: usize,

    /// Maximum number of idle buffers retained by the free list.
    max_idle: usize,
}

impl PoolConfig {
    /// Creates a new configuration from the three recommended staging sizes.
    ///
    /// `max_idle` starts at [`DEFAULT_MAX_IDLE`]; override it with
    /// [`PoolConfig::with_max_idle`].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if any size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::PoolConfig;
    ///
    /// let config = PoolConfig::new(8192, 4096, 4096)?;
    /// assert_eq!(config.buffer_size(), 8192);
    /// # Ok::<(), recyclebuf::PoolError>(())
    /// ```
    pub fn new(
        compress_out_size: usize,
        decompress_in_size: usize,
        decompress_out_size: usize,
    ) -> Result<Self, PoolError> {
        let config = Self {
            compress_out_size,
            decompress_in_size,
            decompress_out_size,
            max_idle: DEFAULT_MAX_IDLE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the recommended compression output staging size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check if the configuration is valid.
    pub fn with_compress_out_size(mut self, size: usize) -> Self {
        self.compress_out_size = size;
        self
    }

    /// Sets the recommended decompression input staging size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check if the configuration is valid.
    pub fn with_decompress_in_size(mut self, size: usize) -> Self {
        self.decompress_in_size = size;
        self
    }

    /// Sets the recommended decompression output staging size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check if the configuration is valid.
    pub fn with_decompress_out_size(mut self, size: usize) -> Self {
        self.decompress_out_size = size;
        self
    }

    /// Sets the maximum number of idle buffers the free list retains.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check if the configuration is valid.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Returns the recommended compression output staging size.
    pub fn compress_out_size(&self) -> usize {
        self.compress_out_size
    }

    /// Returns the recommended decompression input staging size.
    pub fn decompress_in_size(&self) -> usize {
        self.decompress_in_size
    }

    /// Returns the recommended decompression output staging size.
    pub fn decompress_out_size(&self) -> usize {
        self.decompress_out_size
    }

    /// Returns the maximum number of idle buffers the free list retains.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Returns the single fixed capacity the pool vends: the maximum of the
    /// three recommended staging sizes.
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::PoolConfig;
    ///
    /// let config = PoolConfig::new(8192, 16384, 4096)?;
    /// assert_eq!(config.buffer_size(), 16384);
    /// # Ok::<(), recyclebuf::PoolError>(())
    /// ```
    pub fn buffer_size(&self) -> usize {
        self.compress_out_size
            .max(self.decompress_in_size)
            .max(self.decompress_out_size)
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if any staging size is zero, or if `max_idle` is
    /// zero (a pool that can retain nothing would drop every release).
    ///
    /// # Example
    ///
    /// ```
    /// use recyclebuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_max_idle(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.compress_out_size == 0
            || self.decompress_in_size == 0
            || self.decompress_out_size == 0
        {
            return Err(PoolError::InvalidConfig {
                message: "staging sizes must be non-zero",
            });
        }

        if self.max_idle == 0 {
            return Err(PoolError::InvalidConfig {
                message: "max_idle must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            compress_out_size: DEFAULT_COMPRESS_OUT_SIZE,
            decompress_in_size: DEFAULT_DECOMPRESS_IN_SIZE,
            decompress_out_size: DEFAULT_DECOMPRESS_OUT_SIZE,
            max_idle: DEFAULT_MAX_IDLE,
        }
    }
}
