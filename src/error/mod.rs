//! Error types for scanwin.

use thiserror::Error;

/// Errors that can occur while windowing a stream.
#[derive(Debug, Error)]
pub enum WindowError {
    /// An I/O error occurred while reading input data.
    ///
    /// When emitted by a reader, this is attached to the window that was in
    /// flight; the bytes read before the failure travel with it.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The producer thread could not be started.
    #[error("failed to spawn window producer: {0}")]
    Spawn(#[source] std::io::Error),
}

impl WindowError {
    /// Returns the underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            WindowError::Io(e) | WindowError::Spawn(e) => Some(e.kind()),
            WindowError::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: WindowError = io_err.into();
        assert!(matches!(err, WindowError::Io(_)));
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_display() {
        let err = WindowError::InvalidConfig {
            message: "chunk_size must be non-zero",
        };
        assert_eq!(err.to_string(), "invalid config: chunk_size must be non-zero");
        assert!(err.io_kind().is_none());
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = WindowError::Spawn(std::io::Error::other("no threads"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("no threads"));
    }
}
