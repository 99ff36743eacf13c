//! Memory/disk hybrid re-readable reader.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use super::Rewind;

/// Default number of recorded bytes kept in memory before spilling (16 MiB).
pub const DEFAULT_MEMORY_THRESHOLD: usize = 16 * 1024 * 1024;

#[derive(Debug)]
enum Storage {
    Memory(Vec<u8>),
    Disk(File),
    Released,
}

/// Records everything read from an inner reader so it can be replayed.
///
/// Recorded bytes stay in memory until they would exceed the memory
/// threshold; from then on they live in an anonymous temporary file that is
/// removed when the `ReReader` is dropped. After [`ReReader::reset`], reads
/// replay the recorded bytes and then continue from the inner reader,
/// recording as they go.
///
/// If recording fails (the spill file cannot be created or written), the
/// bytes just read are still returned, recording stops, and later calls to
/// [`ReReader::reset`] fail instead of replaying an incomplete stream.
///
/// # Example
///
/// ```
/// use scanwin::ReReader;
/// use std::io::Read;
///
/// let mut reader = ReReader::new(&b"read me twice"[..]);
///
/// let mut first = String::new();
/// reader.read_to_string(&mut first)?;
///
/// reader.reset()?;
/// let mut second = String::new();
/// reader.read_to_string(&mut second)?;
///
/// assert_eq!(first, second);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ReReader<R> {
    inner: R,
    storage: Storage,
    recorded: u64,
    position: u64,
    recording: bool,
    broken: bool,
    threshold: usize,
    spill_dir: Option<PathBuf>,
}

impl<R: Read> ReReader<R> {
    /// Wraps `inner` with the default memory threshold.
    pub fn new(inner: R) -> Self {
        Self::with_threshold(inner, DEFAULT_MEMORY_THRESHOLD)
    }

    /// Wraps `inner`, spilling to disk once more than `threshold` bytes are
    /// recorded.
    pub fn with_threshold(inner: R, threshold: usize) -> Self {
        Self {
            inner,
            storage: Storage::Memory(Vec::new()),
            recorded: 0,
            position: 0,
            recording: true,
            broken: false,
            threshold,
            spill_dir: None,
        }
    }

    /// Creates the spill file in `dir` instead of the system temp directory.
    pub fn with_spill_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spill_dir = Some(dir.into());
        self
    }

    /// Repositions the reader at offset 0.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Unsupported`] once [`ReReader::stop`] has been
    /// called, since later bytes were never recorded. Fails with
    /// [`ErrorKind::Other`] if recording broke down.
    pub fn reset(&mut self) -> io::Result<()> {
        if self.broken {
            return Err(io::Error::other("cannot reset a ReReader whose recording failed"));
        }
        if !self.recording {
            return Err(io::Error::new(
                ErrorKind::Unsupported,
                "cannot reset a ReReader after stop()",
            ));
        }
        self.position = 0;
        Ok(())
    }

    /// Stops recording.
    ///
    /// Bytes already recorded and not yet re-read are still replayed; the
    /// storage is released as soon as the replay is drained and reads pass
    /// straight through afterwards.
    pub fn stop(&mut self) {
        self.recording = false;
        self.release_if_drained();
    }

    /// Returns the number of bytes recorded so far.
    pub fn len_recorded(&self) -> u64 {
        self.recorded
    }

    /// Returns true if recorded bytes have moved to a temporary file.
    pub fn is_spilled(&self) -> bool {
        matches!(self.storage, Storage::Disk(_))
    }

    /// Returns the current read position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the `ReReader`, returning the inner reader.
    ///
    /// Recorded bytes are discarded.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_recorded(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = (self.recorded - self.position).min(buf.len() as u64) as usize;

        let n = match &mut self.storage {
            Storage::Memory(data) => {
                let start = self.position as usize;
                buf[..available].copy_from_slice(&data[start..start + available]);
                available
            }
            Storage::Disk(file) => {
                file.seek(SeekFrom::Start(self.position))?;
                file.read(&mut buf[..available])?
            }
            Storage::Released => 0,
        };

        self.position += n as u64;
        self.release_if_drained();
        Ok(n)
    }

    fn record(&mut self, data: &[u8]) -> io::Result<()> {
        match &mut self.storage {
            Storage::Memory(memory) if memory.len() + data.len() > self.threshold => {
                let mut file = match &self.spill_dir {
                    Some(dir) => tempfile::tempfile_in(dir)?,
                    None => tempfile::tempfile()?,
                };
                file.write_all(memory)?;
                file.write_all(data)?;
                debug!(
                    recorded = self.recorded + data.len() as u64,
                    threshold = self.threshold,
                    "re-reader spilled to disk"
                );
                self.storage = Storage::Disk(file);
            }
            Storage::Memory(memory) => memory.extend_from_slice(data),
            Storage::Disk(file) => {
                file.seek(SeekFrom::End(0))?;
                file.write_all(data)?;
            }
            Storage::Released => return Ok(()),
        }
        self.recorded += data.len() as u64;
        Ok(())
    }

    fn release_if_drained(&mut self) {
        if !self.recording && self.position >= self.recorded {
            self.storage = Storage::Released;
        }
    }
}

impl<R: Read> Read for ReReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.position < self.recorded && !matches!(self.storage, Storage::Released) {
            return self.read_recorded(buf);
        }

        let n = self.inner.read(buf)?;
        if self.recording && n > 0 {
            if let Err(e) = self.record(&buf[..n]) {
                warn!(
                    recorded = self.recorded,
                    error = %e,
                    "re-reader recording failed; replay disabled"
                );
                self.recording = false;
                self.broken = true;
                self.storage = Storage::Released;
            }
        }
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: Read> Rewind for ReReader<R> {
    fn rewind(&mut self) -> io::Result<()> {
        self.reset()
    }
}
