//! Configuration for windowing behavior.
//!
//! [`WindowConfig`] controls how far the cursor advances per window
//! (`chunk_size`), how many bytes past that each window looks ahead
//! (`peek_size`), and how many windows a spawned producer may buffer ahead of
//! its consumer (`channel_capacity`).
//!
//! # Example
//!
//! ```
//! use scanwin::WindowConfig;
//!
//! // Explicit sizes, validated eagerly
//! let config = WindowConfig::new(4096, 512)?;
//! assert_eq!(config.total_size(), 4608);
//!
//! // Builder, validated on use
//! let config = WindowConfig::default()
//!     .with_chunk_size(64 * 1024)
//!     .with_channel_capacity(8);
//! config.validate()?;
//!
//! # Ok::<(), scanwin::WindowError>(())
//! ```

use crate::error::WindowError;

/// Default cursor advance per window (10 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024;

/// Default lookahead appended to each window (3 KiB).
pub const DEFAULT_PEEK_SIZE: usize = 3 * 1024;

/// Default number of windows a spawned producer buffers ahead of its consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for overlapping windows.
///
/// Every window covers up to `chunk_size + peek_size` bytes and the next
/// window starts `chunk_size` bytes later, so the last `peek_size` bytes of a
/// window are seen again at the front of the following one. A pattern no
/// longer than `peek_size + 1` bytes therefore always lies entirely inside
/// at least one window.
///
/// # Constraints
///
/// - `chunk_size` must be non-zero
/// - `peek_size` may be zero (plain non-overlapping windows)
/// - `chunk_size + peek_size` must fit in `usize`
/// - `channel_capacity` must be non-zero
///
/// # Example
///
/// ```
/// use scanwin::WindowConfig;
///
/// let config = WindowConfig::default().with_peek_size(0);
/// assert_eq!(config.total_size(), config.chunk_size());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowConfig {
    /// Cursor advance per window, in bytes.
    chunk_size: usize,

    /// Lookahead past `chunk_size`, in bytes.
    peek_size: usize,

    /// Bounded channel capacity for spawned producers.
    channel_capacity: usize,
}

impl WindowConfig {
    /// Creates a new configuration with the given sizes and the default
    /// channel capacity.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidConfig`] if `chunk_size` is zero or the
    /// total window size overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use scanwin::WindowConfig;
    ///
    /// assert!(WindowConfig::new(1024, 512).is_ok());
    /// assert!(WindowConfig::new(0, 512).is_err());
    /// ```
    pub fn new(chunk_size: usize, peek_size: usize) -> Result<Self, WindowError> {
        let config = Self {
            chunk_size,
            peek_size,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`WindowConfig::validate`] to check it, or let the reader reject it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the peek size.
    pub fn with_peek_size(mut self, size: usize) -> Self {
        self.peek_size = size;
        self
    }

    /// Sets the channel capacity used by [`WindowReader::spawn`](crate::WindowReader::spawn).
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the peek size.
    pub fn peek_size(&self) -> usize {
        self.peek_size
    }

    /// Returns the channel capacity.
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Returns the largest window this configuration can produce.
    ///
    /// Saturates on overflow; [`WindowConfig::validate`] rejects such
    /// configurations.
    pub fn total_size(&self) -> usize {
        self.chunk_size.saturating_add(self.peek_size)
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use scanwin::WindowConfig;
    ///
    /// let config = WindowConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.chunk_size == 0 {
            return Err(WindowError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        if self.chunk_size.checked_add(self.peek_size).is_none() {
            return Err(WindowError::InvalidConfig {
                message: "chunk_size + peek_size overflows usize",
            });
        }

        if self.channel_capacity == 0 {
            return Err(WindowError::InvalidConfig {
                message: "channel_capacity must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            peek_size: DEFAULT_PEEK_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
