//! Configuration for inflater pools.
//!
//! - [`PoolConfig`] - Idle capacity and stream header mode
//!
//! # Example
//!
//! ```
//! use inflater_pool::PoolConfig;
//!
//! // Keep up to eight idle inflaters
//! let config = PoolConfig::new(8)?;
//!
//! // Raw deflate streams (no zlib header)
//! let config = PoolConfig::default().with_zlib_header(false);
//!
//! # Ok::<(), inflater_pool::InflateError>(())
//! ```

use crate::error::InflateError;

/// Default number of idle inflaters a pool retains.
pub const DEFAULT_CAPACITY: usize = 4;

/// Default size of the staging buffer used by streaming readers (8 KiB).
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration for an [`InflaterPool`](crate::InflaterPool).
///
/// `PoolConfig` controls how many idle handles the pool keeps and how fresh
/// handles are created.
///
/// # Capacity
///
/// The capacity bounds only the *idle* handles held by the pool. Any number
/// of handles may be in use at once; handles released while the pool is full
/// are ended immediately.
///
/// A capacity of zero is rejected by [`PoolConfig::new`] and
/// [`PoolConfig::validate`], but a pool built from such a configuration still
/// works: it simply retains nothing.
///
/// # Example
///
/// ```
/// use inflater_pool::PoolConfig;
///
/// let config = PoolConfig::default();
/// assert_eq!(config.capacity(), 4);
/// assert!(config.zlib_header());
///
/// let config = PoolConfig::default()
///     .with_capacity(16)
///     .with_zlib_header(false);
/// assert_eq!(config.capacity(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Maximum number of idle handles retained.
    capacity: usize,

    /// Whether fresh handles expect a zlib header.
    zlib_header: bool,
}

impl PoolConfig {
    /// Creates a new configuration with the given idle capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InflateError::InvalidConfig`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use inflater_pool::PoolConfig;
    ///
    /// let config = PoolConfig::new(2)?;
    /// assert_eq!(config.capacity(), 2);
    /// assert!(PoolConfig::new(0).is_err());
    /// # Ok::<(), inflater_pool::InflateError>(())
    /// ```
    pub fn new(capacity: usize) -> Result<Self, InflateError> {
        if capacity == 0 {
            return Err(InflateError::InvalidConfig {
                message: "pool capacity must be non-zero",
            });
        }

        Ok(Self {
            capacity,
            zlib_header: true,
        })
    }

    /// Sets the idle capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether fresh handles expect a zlib header.
    ///
    /// `false` selects raw deflate streams.
    pub fn with_zlib_header(mut self, zlib_header: bool) -> Self {
        self.zlib_header = zlib_header;
        self
    }

    /// Returns the idle capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether fresh handles expect a zlib header.
    pub fn zlib_header(&self) -> bool {
        self.zlib_header
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), InflateError> {
        Self::new(self.capacity).map(|_| ())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            zlib_header: true,
        }
    }
}
