//! scanwin
//!
//! Overlap-safe windowing of byte streams for pattern and secret scanning.
//!
//! `scanwin` turns a byte stream of unknown length into an ordered sequence
//! of fixed-size windows. Each window covers `chunk_size + peek_size` bytes,
//! the next one starts `chunk_size` bytes later, and the trailing `peek_size`
//! bytes are therefore seen twice. Any pattern of at most `peek_size + 1`
//! bytes lies whole inside some window, so detectors running on windows
//! independently never miss a match that straddles a boundary.
//!
//! The crate intentionally:
//! - does NOT match patterns or report findings
//! - does NOT open files, repositories or connections
//! - does NOT schedule scan jobs
//!
//! It only does one thing: **Read bytes → yield overlapping windows**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use scanwin::{WindowConfig, WindowError, WindowReader};
//!
//! fn main() -> Result<(), WindowError> {
//!     let file = File::open("blob.bin")?;
//!     let reader = WindowReader::new(WindowConfig::default())?;
//!
//!     for result in reader.windows(file) {
//!         let window = result.into_result()?;
//!         println!("window {:?}", window.range());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Background producer
//!
//! ```no_run
//! use std::fs::File;
//! use scanwin::{CancelToken, WindowConfig, WindowError, WindowReader};
//!
//! fn main() -> Result<(), WindowError> {
//!     let reader = WindowReader::new(WindowConfig::default())?;
//!     let cancel = CancelToken::new();
//!
//!     for result in reader.spawn(File::open("blob.bin")?, &cancel)? {
//!         println!("{}", result);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use scanwin::{window_async, WindowConfig};
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! async fn demo(file: tokio::fs::File) -> Result<(), scanwin::WindowError> {
//!     let mut stream = window_async(file.compat(), WindowConfig::default())?;
//!
//!     while let Some(result) = stream.next().await {
//!         let window = result.into_result()?;
//!         println!("window {}", window.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;
mod reread;
mod segment;
mod window;
mod windower;

mod buffer; // internal (thread-local reuse)

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use config::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_CHUNK_SIZE, DEFAULT_PEEK_SIZE, WindowConfig,
};
pub use error::WindowError;
pub use pipeline::{CancelToken, WindowReceiver};
pub use reread::{DEFAULT_MEMORY_THRESHOLD, ReReader, Rewind};
pub use segment::{Segmenter, Segments};
pub use window::{Window, WindowResult};
pub use windower::{OverlapWindower, WindowIter, WindowReader};

#[cfg(feature = "async-io")]
pub use async_stream::{WindowStream, window_async};
