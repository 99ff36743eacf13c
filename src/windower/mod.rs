//! Overlapping window production for byte streams.
//!
//! - [`OverlapWindower`] - Sans-I/O engine with `push()`/`finish()` API
//! - [`WindowReader`] - Validated entry point for stream readers
//! - [`WindowIter`] - Lazy iterator over a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::OverlapWindower;
pub use iter::{WindowIter, WindowReader};
