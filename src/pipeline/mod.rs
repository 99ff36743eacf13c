//! Background producer feeding windows through a bounded channel.
//!
//! [`WindowReader::spawn`] moves a reader onto a dedicated producer thread
//! that pushes [`WindowResult`]s into a bounded `crossbeam-channel`. The
//! producer blocks when the channel is full, so a slow consumer throttles
//! reading. Windows arrive in emission order; the receiver may be cloned to
//! fan out to several consumers.
//!
//! - [`CancelToken`] - Cooperative cancellation shared with the producer
//! - [`WindowReceiver`] - Consumer end; iterate it to drain windows
//!
//! # Example
//!
//! ```
//! use scanwin::{CancelToken, WindowConfig, WindowReader};
//! use std::io::Cursor;
//!
//! let reader = WindowReader::new(WindowConfig::new(1024, 512)?)?;
//! let cancel = CancelToken::new();
//!
//! let windows = reader.spawn(Cursor::new(vec![0u8; 4000]), &cancel)?;
//! let total: usize = windows.map(|r| r.bytes().len()).sum();
//! assert_eq!(total, 1536 + 1536 + 1536 + 928);
//! # Ok::<(), scanwin::WindowError>(())
//! ```

mod cancel;

use std::io::Read;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, select};
use tracing::debug;

use crate::error::WindowError;
use crate::window::WindowResult;
use crate::windower::{WindowIter, WindowReader};

pub use cancel::CancelToken;

const PRODUCER_THREAD_NAME: &str = "scanwin-producer";

impl WindowReader {
    /// Windows `reader` on a background thread.
    ///
    /// The returned [`WindowReceiver`] yields results in order and ends when
    /// the stream is exhausted, after the first error, or once `cancel` is
    /// triggered. The token is checked before every read of the source and
    /// while the producer waits on a full channel. Cancellation is a clean
    /// stop: no error is emitted for it, and a token cancelled before the
    /// first read produces no windows.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Spawn`] if the producer thread cannot start.
    pub fn spawn<R>(&self, reader: R, cancel: &CancelToken) -> Result<WindowReceiver, WindowError>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(self.config().channel_capacity());
        let windower = *self;
        let cancel = cancel.clone();

        // The iterator takes its scratch buffer from the producer's own pool
        let handle = thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.to_owned())
            .spawn(move || {
                let iter = windower.windows(reader).with_cancel(cancel.clone());
                produce(iter, tx, cancel)
            })
            .map_err(WindowError::Spawn)?;

        Ok(WindowReceiver {
            rx,
            handle: Some(handle),
        })
    }
}

fn produce<R: Read>(mut iter: WindowIter<R>, tx: Sender<WindowResult>, cancel: CancelToken) {
    loop {
        if cancel.is_cancelled() {
            debug!(offset = iter.offset(), "producer cancelled");
            return;
        }

        let Some(result) = iter.next() else {
            return;
        };
        let last = result.is_err();

        select! {
            send(tx, result) -> sent => {
                if sent.is_err() {
                    debug!(offset = iter.offset(), "receiver dropped; producer stopping");
                    return;
                }
            }
            recv(cancel.done()) -> _ => {
                debug!(offset = iter.offset(), "producer cancelled while blocked");
                return;
            }
        }

        if last {
            return;
        }
    }
}

/// Consumer end of a spawned window producer.
///
/// Iterating yields [`WindowResult`]s until the producer finishes. Dropping
/// the receiver (and every clone of [`WindowReceiver::receiver`]) makes the
/// producer stop at its next send.
#[derive(Debug)]
pub struct WindowReceiver {
    rx: Receiver<WindowResult>,
    handle: Option<JoinHandle<()>>,
}

impl WindowReceiver {
    /// Returns the underlying channel receiver.
    ///
    /// Clone it to drain the same stream from several consumers, or use it
    /// in a `select!` alongside other channels.
    pub fn receiver(&self) -> &Receiver<WindowResult> {
        &self.rx
    }

    /// Stops consuming and waits for the producer thread to exit.
    ///
    /// Windows still buffered in the channel are discarded. Returns `Err`
    /// with the panic payload if the producer panicked.
    pub fn join(mut self) -> thread::Result<()> {
        let handle = self.handle.take();
        drop(self);
        match handle {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

impl Iterator for WindowReceiver {
    type Item = WindowResult;

    fn next(&mut self) -> Option<WindowResult> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use std::io::{self, Cursor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, mpsc};
    use std::time::Duration;

    fn reader(chunk_size: usize, peek_size: usize, capacity: usize) -> WindowReader {
        let config = WindowConfig::new(chunk_size, peek_size)
            .unwrap()
            .with_channel_capacity(capacity);
        WindowReader::new(config).unwrap()
    }

    /// Endless reader that reports each read on a side channel.
    struct Endless {
        reads: mpsc::Sender<()>,
    }

    impl Read for Endless {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let _ = self.reads.send(());
            buf.fill(b'x');
            Ok(buf.len())
        }
    }

    #[test]
    fn test_matches_iterator() {
        let data: Vec<u8> = (0..20_000).map(|i| (i % 241) as u8).collect();
        let r = reader(1024, 256, 2);

        let expected: Vec<_> = r
            .windows(Cursor::new(data.clone()))
            .map(|res| res.into_result().unwrap())
            .collect();
        let actual: Vec<_> = r
            .spawn(Cursor::new(data), &CancelToken::new())
            .unwrap()
            .map(|res| res.into_result().unwrap())
            .collect();

        assert_eq!(expected, actual);
    }

    /// Serves one byte per read and cancels `cancel` on read number `cancel_at`.
    struct Dribble {
        reads: Arc<AtomicUsize>,
        cancel_at: usize,
        cancel: CancelToken,
    }

    impl Read for Dribble {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
            if n == self.cancel_at {
                self.cancel.cancel();
            }
            buf[0] = b'.';
            Ok(1)
        }
    }

    #[test]
    fn test_cancel_before_start_emits_nothing() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let (reads_tx, reads_rx) = mpsc::channel();
        let windows = reader(16, 4, 4)
            .spawn(Endless { reads: reads_tx }, &cancel)
            .unwrap();

        assert_eq!(windows.count(), 0);
        assert!(reads_rx.try_recv().is_err());
    }

    #[test]
    fn test_cancel_stops_endless_stream() {
        let cancel = CancelToken::new();
        let (reads_tx, _reads_rx) = mpsc::channel();
        let mut windows = reader(16, 4, 1)
            .spawn(Endless { reads: reads_tx }, &cancel)
            .unwrap();

        for _ in 0..3 {
            let result = windows.next().unwrap();
            assert_eq!(result.bytes().len(), 20);
        }

        cancel.cancel();
        // At most the window already buffered plus one in flight
        let rest = windows.by_ref().take(10).count();
        assert!(rest <= 2);
        assert!(windows.join().is_ok());
    }

    #[test]
    fn test_dropped_receiver_stops_producer() {
        let (reads_tx, reads_rx) = mpsc::channel();
        let windows = reader(16, 4, 1)
            .spawn(Endless { reads: reads_tx }, &CancelToken::new())
            .unwrap();

        assert!(windows.join().is_ok());

        // Producer has exited and released its reader
        while reads_rx.try_recv().is_ok() {}
        assert!(reads_rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_error_is_last() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let results: Vec<_> = reader(16, 4, 4)
            .spawn(Broken, &CancelToken::new())
            .unwrap()
            .collect();

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
        assert!(results[0].bytes().is_empty());
    }

    #[test]
    fn test_multiple_consumers_see_each_window_once() {
        let data = vec![1u8; 64 * 100];
        let windows = reader(64, 0, 8)
            .spawn(Cursor::new(data), &CancelToken::new())
            .unwrap();

        let rx = windows.receiver().clone();
        let other = thread::spawn(move || rx.iter().count());
        let mine = windows.count();

        assert_eq!(mine + other.join().unwrap(), 100);
    }

    #[test]
    fn test_full_channel_blocks_producer() {
        let cancel = CancelToken::new();
        let (reads_tx, reads_rx) = mpsc::channel();
        let windows = reader(16, 4, 2)
            .spawn(Endless { reads: reads_tx }, &cancel)
            .unwrap();

        // One read per window: two queued plus one waiting to be sent
        thread::sleep(Duration::from_millis(100));
        let early = reads_rx.try_iter().count();
        thread::sleep(Duration::from_millis(100));
        let late = reads_rx.try_iter().count();
        assert!(early + late <= 3, "producer read {} times", early + late);

        cancel.cancel();
        assert!(windows.join().is_ok());
    }

    #[test]
    fn test_cancel_stops_window_fill() {
        let cancel = CancelToken::new();
        let reads = Arc::new(AtomicUsize::new(0));
        let source = Dribble {
            reads: Arc::clone(&reads),
            cancel_at: 5,
            cancel: cancel.clone(),
        };

        // A window needs 64 one-byte reads; the fill stops right after the 5th
        let windows = reader(64, 0, 4).spawn(source, &cancel).unwrap();
        assert_eq!(windows.count(), 0);
        assert_eq!(reads.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_producer_uses_its_own_scratch_pool() {
        drop(crate::buffer::Buffer::take(64));
        let before = crate::buffer::pooled();
        assert!(before >= 1);

        let count = reader(16, 4, 4)
            .spawn(Cursor::new(vec![0u8; 100]), &CancelToken::new())
            .unwrap()
            .count();

        assert!(count > 0);
        assert_eq!(crate::buffer::pooled(), before);
    }
}
