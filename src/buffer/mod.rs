//! Internal buffer management.
//!
//! This module provides a thread-local pool of scratch read buffers so the
//! readers do not allocate a fresh buffer per stream. It is an implementation
//! detail and not part of the public API.

mod pool;

pub(crate) use pool::{Buffer, DEFAULT_BUFFER_SIZE};

#[cfg(test)]
pub(crate) use pool::pooled;
