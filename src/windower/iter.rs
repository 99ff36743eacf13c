//! Streaming overlap reader - WindowReader and WindowIter.
//!
//! - [`WindowReader`] - Validated configuration; entry point for every reader
//! - [`WindowIter`] - Iterator that yields windows from a [`std::io::Read`] source
//!
//! # Example
//!
//! ```no_run
//! use scanwin::{WindowConfig, WindowReader};
//! use std::fs::File;
//!
//! let file = File::open("blob.bin")?;
//! let reader = WindowReader::new(WindowConfig::default())?;
//!
//! for result in reader.windows(file) {
//!     let window = result.into_result()?;
//!     println!("window {:?}: {} bytes", window.range(), window.len());
//! }
//! # Ok::<(), scanwin::WindowError>(())
//! ```

use std::io::{ErrorKind, Read};

use tracing::{debug, warn};

use crate::buffer::{Buffer, DEFAULT_BUFFER_SIZE};
use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::pipeline::CancelToken;
use crate::window::WindowResult;

use super::OverlapWindower;

/// Produces overlapping windows from byte streams.
///
/// `WindowReader` holds a validated [`WindowConfig`]. Invalid configurations
/// are rejected here, before any stream is touched.
///
/// # Example
///
/// ```
/// use scanwin::{WindowConfig, WindowReader};
/// use std::io::Cursor;
///
/// let reader = WindowReader::new(WindowConfig::new(1024, 512)?)?;
/// let lengths: Vec<usize> = reader
///     .windows(Cursor::new(vec![b'a'; 1300]))
///     .map(|r| r.bytes().len())
///     .collect();
///
/// assert_eq!(lengths, vec![1300, 276]);
/// # Ok::<(), scanwin::WindowError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WindowReader {
    config: WindowConfig,
}

impl WindowReader {
    /// Creates a new reader with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a windowing iterator over a reader.
    ///
    /// The iterator reads lazily and never buffers more than
    /// `chunk_size + peek_size` bytes of the stream.
    pub fn windows<R: Read>(&self, reader: R) -> WindowIter<R> {
        WindowIter::new(reader, self.config)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl Default for WindowReader {
    fn default() -> Self {
        Self {
            config: WindowConfig::default(),
        }
    }
}

/// An iterator that yields overlapping windows from a reader.
///
/// Each item is a [`WindowResult`]. The sequence ends after the stream is
/// exhausted or after the first item carrying an error.
pub struct WindowIter<R> {
    reader: R,
    engine: OverlapWindower,
    scratch: Buffer,
    eof: bool,
    finished: bool,
    emitted: u64,
    cancel: Option<CancelToken>,
}

impl<R: Read> WindowIter<R> {
    fn new(reader: R, config: WindowConfig) -> Self {
        Self {
            reader,
            engine: OverlapWindower::with_valid_config(config),
            scratch: Buffer::take(config.total_size().min(DEFAULT_BUFFER_SIZE)),
            eof: false,
            finished: false,
            emitted: 0,
            cancel: None,
        }
    }

    /// Ends the sequence, without an error, before any read made after
    /// `cancel` fires.
    pub(crate) fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the stream offset of the next window.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes the iterator, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn done(&mut self) -> Option<WindowResult> {
        self.finished = true;
        debug!(
            windows = self.emitted,
            end = self.engine.offset(),
            "stream windowing finished"
        );
        None
    }

    fn emit(&mut self, result: WindowResult) -> Option<WindowResult> {
        self.emitted += 1;
        Some(result)
    }
}

impl<R: Read> Iterator for WindowIter<R> {
    type Item = WindowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(window) = self.engine.pop_full() {
                return self.emit(WindowResult::ok(window));
            }

            if self.eof {
                return match self.engine.pop_tail() {
                    Some(window) => self.emit(WindowResult::ok(window)),
                    None => self.done(),
                };
            }

            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                self.finished = true;
                debug!(offset = self.engine.offset(), "windowing cancelled before read");
                return None;
            }

            // Read only what the next window still lacks
            let want = self.engine.missing().min(self.scratch.len());
            match self.reader.read(&mut self.scratch[..want]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.engine.extend(&self.scratch[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    let window = self.engine.take_in_flight();
                    warn!(
                        offset = window.offset,
                        partial = window.len(),
                        error = %e,
                        "read failed; emitting partial window"
                    );
                    self.finished = true;
                    self.emitted += 1;
                    return Some(WindowResult::with_error(window, e));
                }
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for WindowIter<R> {}

impl<R> std::fmt::Debug for WindowIter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowIter")
            .field("engine", &self.engine)
            .field("eof", &self.eof)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
