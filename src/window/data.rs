//! The Window type - a contiguous slice of a logical byte stream.

use bytes::Bytes;
use std::fmt;

/// A window of stream bytes with its position in the stream.
///
/// Windows own their bytes (`Bytes` is cheaply cloneable and may share
/// storage with the buffer it was sliced from). A window never changes after
/// it is emitted.
///
/// # Example
///
/// ```
/// use scanwin::Window;
/// use bytes::Bytes;
///
/// let window = Window::new(Bytes::from_static(b"hello world"), 100);
///
/// assert_eq!(window.len(), 11);
/// assert_eq!(window.range(), 100..111);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// The window data.
    pub data: Bytes,

    /// Offset of the first byte in the source stream.
    pub offset: u64,
}

impl Window {
    /// Creates a new window starting at `offset`.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Creates an empty window at `offset`.
    pub(crate) fn empty(offset: u64) -> Self {
        Self {
            data: Bytes::new(),
            offset,
        }
    }

    /// Returns the length of the window data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the window has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the window data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the window as a range over the stream.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the window and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Window {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window({} bytes @ {})", self.len(), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let window = Window::new(&b"hello"[..], 0);
        assert_eq!(window.len(), 5);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_empty() {
        let window = Window::empty(42);
        assert!(window.is_empty());
        assert_eq!(window.range(), 42..42);
    }

    #[test]
    fn test_start_end() {
        let window = Window::new(&b"hello"[..], 100);
        assert_eq!(window.start(), 100);
        assert_eq!(window.end(), 105);
        assert_eq!(window.range(), 100..105);
    }

    #[test]
    fn test_display() {
        let window = Window::new(&b"hello"[..], 100);
        let s = format!("{}", window);
        assert!(s.contains("5 bytes"));
        assert!(s.contains("@ 100"));
    }

    #[test]
    fn test_into_data() {
        let window = Window::new(Bytes::from_static(b"abc"), 7);
        assert_eq!(AsRef::<[u8]>::as_ref(&window), b"abc");
        assert_eq!(window.into_data(), Bytes::from_static(b"abc"));
    }
}
