//! Thread-local buffer pool for scratch reads.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Default buffer size for pooled buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, zero-filled read buffer.
///
/// Dereferences to a byte slice of exactly the requested length. Returned
/// to the calling thread's pool on drop unless it grew past twice the
/// default size.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer of `len` bytes from the thread-local pool or creates a
    /// new one.
    pub fn take(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_else(|| Vec::with_capacity(DEFAULT_BUFFER_SIZE.max(len)));
        data.resize(len, 0);
        Self { data }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Return the buffer to the pool if it's not too large
        if self.data.capacity() <= DEFAULT_BUFFER_SIZE * 2 {
            self.data.clear();
            // The pool may already be gone during thread teardown.
            let _ = THREAD_BUFFER_POOL.try_with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.data.len())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

/// Number of buffers pooled on the calling thread.
#[cfg(test)]
pub(crate) fn pooled() -> usize {
    THREAD_BUFFER_POOL.with(|pool| pool.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let buf = Buffer::take(1024);
        assert_eq!(buf.len(), 1024);
        assert!(buf.data.capacity() >= DEFAULT_BUFFER_SIZE);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_reuse_is_zeroed() {
        {
            let mut buf = Buffer::take(9);
            buf.copy_from_slice(b"test data");
        }

        // The buffer comes back from the pool cleared
        let buf2 = Buffer::take(9);
        assert!(buf2.iter().all(|&b| b == 0));
        assert!(buf2.data.capacity() >= DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_oversized_buffer_is_not_pooled() {
        {
            let _big = Buffer::take(DEFAULT_BUFFER_SIZE * 4);
        }
        let buf = Buffer::take(8);
        assert!(buf.data.capacity() <= DEFAULT_BUFFER_SIZE * 2);
    }
}
