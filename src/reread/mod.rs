//! Re-readable sources.
//!
//! Overlap windowing reads a stream once, but callers often need a second
//! pass over the same artifact (sniffing a file type first, or windowing the
//! same blob with a different configuration). Sources that cannot seek are
//! wrapped in a [`ReReader`], which records what it reads and replays it
//! after a reset.
//!
//! - [`Rewind`] - Capability: reposition a reader at its first byte
//! - [`ReReader`] - Memory/disk hybrid recorder for any [`std::io::Read`]

mod reader;

use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom};

pub use reader::{DEFAULT_MEMORY_THRESHOLD, ReReader};

/// A reader that can be repositioned at its first byte.
///
/// After `rewind()`, reads must return exactly the bytes the earlier reads
/// returned at the same offsets.
pub trait Rewind {
    /// Repositions the reader at offset 0.
    fn rewind(&mut self) -> io::Result<()>;
}

impl<T: AsRef<[u8]>> Rewind for Cursor<T> {
    fn rewind(&mut self) -> io::Result<()> {
        self.set_position(0);
        Ok(())
    }
}

impl Rewind for File {
    fn rewind(&mut self) -> io::Result<()> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }
}

impl<R: Rewind + ?Sized> Rewind for &mut R {
    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    fn read_all(r: &mut impl Read) -> Vec<u8> {
        let mut out = Vec::new();
        r.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_cursor_rewind() {
        let mut cursor = Cursor::new(b"replay me".to_vec());
        let first = read_all(&mut cursor);
        Rewind::rewind(&mut cursor).unwrap();
        assert_eq!(read_all(&mut cursor), first);
    }

    #[test]
    fn test_file_rewind() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"on disk").unwrap();
        Rewind::rewind(&mut file).unwrap();
        assert_eq!(read_all(&mut file), b"on disk");
    }
}
