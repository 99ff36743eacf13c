//! Async stream adapter for overlapping windows.
//!
//! This module provides asynchronous windowing using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and compatible
//! with tokio, async-std, smol, and other async runtimes. Windows are
//! produced by the same engine as the sync reader, so both yield identical
//! sequences for identical input.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use scanwin::{window_async, WindowConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), scanwin::WindowError> {
//!     let stream = window_async(reader, WindowConfig::default())?;
//!     futures_util::pin_mut!(stream);
//!
//!     while let Some(result) = stream.next().await {
//!         let window = result.into_result()?;
//!         println!("Window: {} bytes @ {}", window.len(), window.offset);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::{debug, warn};

use crate::buffer::DEFAULT_BUFFER_SIZE;
use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::window::WindowResult;
use crate::windower::OverlapWindower;

pin_project! {
    /// A stream that yields overlapping windows from an async reader.
    ///
    /// The reader does not need to be `Unpin`; pin the stream instead.
    pub struct WindowStream<R> {
        #[pin]
        reader: R,
        engine: OverlapWindower,
        buffer: Vec<u8>,
        eof: bool,
        finished: bool,
    }
}

impl<R> WindowStream<R> {
    /// Creates a new window stream from an async reader.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidConfig`] if the configuration is invalid.
    pub fn new(reader: R, config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self {
            reader,
            engine: OverlapWindower::with_valid_config(config),
            buffer: vec![0u8; config.total_size().min(DEFAULT_BUFFER_SIZE)],
            eof: false,
            finished: false,
        })
    }

    /// Returns the stream offset of the next window.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }
}

impl<R: AsyncRead> Stream for WindowStream<R> {
    type Item = WindowResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some(window) = this.engine.pop_full() {
                return Poll::Ready(Some(WindowResult::ok(window)));
            }

            if *this.eof {
                if let Some(window) = this.engine.pop_tail() {
                    return Poll::Ready(Some(WindowResult::ok(window)));
                }
                *this.finished = true;
                debug!(end = this.engine.offset(), "async stream windowing finished");
                return Poll::Ready(None);
            }

            let want = this.engine.missing().min(this.buffer.len());
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..want]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => *this.eof = true,
                Poll::Ready(Ok(n)) => this.engine.extend(&this.buffer[..n]),
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    let window = this.engine.take_in_flight();
                    warn!(
                        offset = window.offset,
                        partial = window.len(),
                        error = %e,
                        "async read failed; emitting partial window"
                    );
                    *this.finished = true;
                    return Poll::Ready(Some(WindowResult::with_error(window, e)));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<R> std::fmt::Debug for WindowStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStream")
            .field("engine", &self.engine)
            .field("eof", &self.eof)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Creates a window stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use scanwin::{window_async, WindowConfig};
///
/// let tokio_reader = tokio::fs::File::open("file").await?;
/// let stream = window_async(tokio_reader.compat(), WindowConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`WindowError::InvalidConfig`] if the configuration is invalid.
pub fn window_async<R: AsyncRead>(
    reader: R,
    config: WindowConfig,
) -> Result<WindowStream<R>, WindowError> {
    WindowStream::new(reader, config)
}
