//! Window segmenter for fully resident buffers.
//!
//! When a payload is already in memory there is no stream to peek into, so
//! [`Segmenter`] simply slices it into consecutive non-overlapping windows of
//! at most `chunk_size` bytes. Slicing is zero-copy: every window shares the
//! input's storage.
//!
//! # Example
//!
//! ```
//! use scanwin::{Segmenter, WindowConfig};
//!
//! let segmenter = Segmenter::new(WindowConfig::new(4, 0)?)?;
//! let parts: Vec<_> = segmenter
//!     .segment(&b"abcdefghij"[..])
//!     .map(|w| w.data)
//!     .collect();
//!
//! assert_eq!(parts, vec![&b"abcd"[..], &b"efgh"[..], &b"ij"[..]]);
//! # Ok::<(), scanwin::WindowError>(())
//! ```

use bytes::Bytes;

use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::window::Window;

/// Splits in-memory buffers into non-overlapping windows.
///
/// Only `chunk_size` from the configuration is used.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    chunk_size: usize,
}

impl Segmenter {
    /// Creates a new segmenter.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size(),
        })
    }

    /// Returns a lazy iterator over the windows of `data`.
    ///
    /// Concatenating the windows in order yields `data` exactly. An empty
    /// buffer yields no windows.
    pub fn segment(&self, data: impl Into<Bytes>) -> Segments {
        Segments {
            data: data.into(),
            pos: 0,
            chunk_size: self.chunk_size,
        }
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            chunk_size: WindowConfig::default().chunk_size(),
        }
    }
}

/// Iterator over the windows of an in-memory buffer.
#[derive(Debug, Clone)]
pub struct Segments {
    data: Bytes,
    pos: usize,
    chunk_size: usize,
}

impl Iterator for Segments {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.pos >= self.data.len() {
            return None;
        }
        let end = self.data.len().min(self.pos + self.chunk_size);
        let window = Window::new(self.data.slice(self.pos..end), self.pos as u64);
        self.pos = end;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.data.len() - self.pos).div_ceil(self.chunk_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments {}

impl std::iter::FusedIterator for Segments {}
