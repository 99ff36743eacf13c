//! Overlap engine - cursor-driven windowing with a push/finish API.
//!
//! [`OverlapWindower`] holds the whole windowing state machine and does no
//! I/O. Bytes are fed with `push()` in pieces of any size; `finish()` marks
//! end of stream and drains the tail. The sync iterator, the threaded
//! pipeline and the async stream all drive this engine, so they agree
//! window-for-window.
//!
//! # Example
//!
//! ```
//! use scanwin::{OverlapWindower, WindowConfig};
//!
//! let mut windower = OverlapWindower::new(WindowConfig::new(4, 2)?)?;
//!
//! let mut windows = windower.push(b"abcdefghij");
//! windows.extend(windower.finish());
//!
//! let data: Vec<&[u8]> = windows.iter().map(|w| &w.data[..]).collect();
//! assert_eq!(data, vec![&b"abcdef"[..], &b"efghij"[..], &b"ij"[..]]);
//! # Ok::<(), scanwin::WindowError>(())
//! ```

use bytes::{Buf, Bytes, BytesMut};
use tracing::trace;

use crate::buffer::DEFAULT_BUFFER_SIZE;
use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::window::Window;

/// Stateful overlapping-window engine.
///
/// The engine keeps the bytes from the cursor onwards that have been pushed
/// but not yet released. A window is released as soon as
/// `chunk_size + peek_size` bytes are pending; releasing copies the full
/// window out and drops only the first `chunk_size` bytes, so the peek region
/// stays pending and opens the next window.
///
/// # Determinism
///
/// The window sequence depends only on the concatenated input, never on how
/// it was split across `push()` calls.
#[derive(Debug)]
pub struct OverlapWindower {
    config: WindowConfig,
    pending: BytesMut,
    offset: u64,
}

impl OverlapWindower {
    /// Creates a new engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    /// Creates an engine from a configuration already known to be valid.
    ///
    /// The pending buffer grows with the data actually pushed, so a large
    /// window size costs nothing on a short stream.
    pub(crate) fn with_valid_config(config: WindowConfig) -> Self {
        Self {
            config,
            pending: BytesMut::with_capacity(config.total_size().min(DEFAULT_BUFFER_SIZE)),
            offset: 0,
        }
    }

    /// Pushes data into the engine and returns every complete window.
    ///
    /// A window is complete once `chunk_size + peek_size` bytes are available
    /// from the cursor. Shorter tail windows are only released by
    /// [`OverlapWindower::finish`].
    ///
    /// # Example
    ///
    /// ```
    /// use scanwin::{OverlapWindower, WindowConfig};
    ///
    /// let mut windower = OverlapWindower::new(WindowConfig::new(4, 2)?)?;
    ///
    /// assert!(windower.push(b"abc").is_empty());
    /// let windows = windower.push(b"def");
    /// assert_eq!(windows.len(), 1);
    /// assert_eq!(windows[0].offset, 0);
    /// assert_eq!(windower.pending_len(), 2);
    /// # Ok::<(), scanwin::WindowError>(())
    /// ```
    pub fn push(&mut self, data: &[u8]) -> Vec<Window> {
        self.extend(data);

        let mut windows = Vec::new();
        while let Some(window) = self.pop_full() {
            windows.push(window);
        }
        windows
    }

    /// Finalizes the stream and returns the remaining tail windows.
    ///
    /// The tail keeps stepping by `chunk_size` while each window is at least
    /// `chunk_size` long; the first shorter window is the last. No empty
    /// window is ever returned, including after a chunk-aligned advance that
    /// lands exactly on end of stream.
    ///
    /// After calling `finish()` the engine is reset and can be reused.
    pub fn finish(&mut self) -> Vec<Window> {
        let mut windows = Vec::new();
        while let Some(window) = self.pop_tail() {
            windows.push(window);
        }
        self.reset();
        windows
    }

    /// Resets the engine state for a new stream.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.offset = 0;
    }

    /// Returns the stream offset of the next window to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes held from the cursor onwards.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the configuration used by this engine.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Appends bytes without releasing windows.
    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
    }

    /// Number of bytes still missing before a full window can be released.
    pub(crate) fn missing(&self) -> usize {
        self.config.total_size().saturating_sub(self.pending.len())
    }

    /// Releases one full window, if available.
    pub(crate) fn pop_full(&mut self) -> Option<Window> {
        if self.pending.len() < self.config.total_size() {
            return None;
        }
        Some(self.release(self.config.total_size()))
    }

    /// Releases one tail window once the stream has ended.
    pub(crate) fn pop_tail(&mut self) -> Option<Window> {
        if self.pending.is_empty() {
            return None;
        }
        let len = self.pending.len().min(self.config.total_size());
        Some(self.release(len))
    }

    /// Releases whatever is in flight as the window carrying a read error.
    ///
    /// The result may be empty when the failure happened before any byte of
    /// this window was read.
    pub(crate) fn take_in_flight(&mut self) -> Window {
        let len = self.pending.len().min(self.config.total_size());
        let window = if len == 0 {
            Window::empty(self.offset)
        } else {
            Window::new(Bytes::copy_from_slice(&self.pending[..len]), self.offset)
        };
        self.pending.clear();
        window
    }

    /// Copies out `len` bytes from the cursor and advances.
    ///
    /// The cursor moves by `chunk_size`, never by `len`. A window shorter
    /// than `chunk_size` ends the stream, so all pending bytes are dropped.
    fn release(&mut self, len: usize) -> Window {
        let chunk_size = self.config.chunk_size();
        let window = Window::new(Bytes::copy_from_slice(&self.pending[..len]), self.offset);

        trace!(offset = self.offset, len, "window released");

        if len < chunk_size {
            self.offset += len as u64;
            self.pending.clear();
        } else {
            self.offset += chunk_size as u64;
            self.pending.advance(chunk_size);
        }

        window
    }
}
