//! The unit emitted by stream readers: a window plus an optional error.

use std::fmt;

use bytes::Bytes;

use super::Window;
use crate::error::WindowError;

/// A window paired with the terminal error observed while producing it.
///
/// Readers attach an I/O failure to the window that was in flight instead of
/// dropping it, so the bytes read before the failure still reach the
/// consumer. A result carrying an error is always the last one in its
/// sequence; its window may be empty.
///
/// # Example
///
/// ```
/// use scanwin::{WindowConfig, WindowReader};
/// use std::io::Cursor;
///
/// let reader = WindowReader::new(WindowConfig::new(4, 2)?)?;
///
/// for result in reader.windows(Cursor::new(b"abcdefgh")) {
///     if let Some(err) = result.error() {
///         eprintln!("stopped at offset {}: {err}", result.window().start());
///     }
///     println!("{:?}", result.bytes());
/// }
/// # Ok::<(), scanwin::WindowError>(())
/// ```
#[derive(Debug)]
pub struct WindowResult {
    window: Window,
    error: Option<WindowError>,
}

impl WindowResult {
    /// Creates a successful result.
    pub fn ok(window: Window) -> Self {
        Self {
            window,
            error: None,
        }
    }

    /// Creates a result carrying a terminal error.
    pub fn with_error(window: Window, error: impl Into<WindowError>) -> Self {
        Self {
            window,
            error: Some(error.into()),
        }
    }

    /// Returns the window bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.window.data
    }

    /// Returns the window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the terminal error, if any.
    pub fn error(&self) -> Option<&WindowError> {
        self.error.as_ref()
    }

    /// Returns true if this result carries an error.
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Splits the result into its window and error.
    pub fn into_parts(self) -> (Window, Option<WindowError>) {
        (self.window, self.error)
    }

    /// Converts into a `Result`, discarding the partial window on error.
    pub fn into_result(self) -> Result<Window, WindowError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.window),
        }
    }
}

impl From<Window> for WindowResult {
    fn from(window: Window) -> Self {
        Self::ok(window)
    }
}

impl fmt::Display for WindowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.window)?;
        if let Some(err) = &self.error {
            write!(f, " [error: {}]", err)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_ok() {
        let result = WindowResult::ok(Window::new(&b"data"[..], 8));
        assert!(!result.is_err());
        assert_eq!(&result.bytes()[..], b"data");
        assert_eq!(result.window().start(), 8);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_with_error_keeps_bytes() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let result = WindowResult::with_error(Window::new(&b"part"[..], 0), err);

        assert!(result.is_err());
        assert_eq!(&result.bytes()[..], b"part");

        let (window, error) = result.into_parts();
        assert_eq!(window.len(), 4);
        assert_eq!(
            error.and_then(|e| e.io_kind()),
            Some(io::ErrorKind::UnexpectedEof)
        );
    }

    #[test]
    fn test_display_with_error() {
        let result = WindowResult::with_error(Window::empty(3), io::Error::other("boom"));
        let s = result.to_string();
        assert!(s.contains("0 bytes @ 3"));
        assert!(s.contains("boom"));
    }
}
