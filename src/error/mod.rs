//! Error types for inflater-pool.

use std::fmt;

/// Errors that can occur while inflating through a pooled handle.
#[derive(Debug)]
pub enum InflateError {
    /// The compressed input is malformed.
    ///
    /// Carries the engine's own error unmodified.
    Corrupt(flate2::DecompressError),

    /// The handle's native state has already been released.
    Ended,

    /// The input ran out before the compressed stream ended.
    Truncated {
        /// Bytes produced before the input ran out.
        produced: usize,
    },

    /// The stream inflated to a different length than expected.
    SizeMismatch {
        /// The length the caller asked for.
        expected: usize,
        /// The length actually observed (a lower bound when the stream
        /// carried more data than expected).
        actual: usize,
    },

    /// An I/O error occurred while reading compressed input.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflateError::Corrupt(e) => write!(f, "corrupt deflate stream: {}", e),
            InflateError::Ended => write!(f, "inflater has already been ended"),
            InflateError::Truncated { produced } => {
                write!(f, "truncated deflate stream after {} bytes", produced)
            }
            InflateError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "inflated size mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            InflateError::Io(e) => write!(f, "io error: {}", e),
            InflateError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for InflateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InflateError::Corrupt(e) => Some(e),
            InflateError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InflateError {
    fn from(e: std::io::Error) -> Self {
        InflateError::Io(e)
    }
}

impl From<flate2::DecompressError> for InflateError {
    fn from(e: flate2::DecompressError) -> Self {
        InflateError::Corrupt(e)
    }
}

impl From<InflateError> for std::io::Error {
    fn from(e: InflateError) -> Self {
        use std::io::ErrorKind;

        match e {
            InflateError::Io(e) => e,
            InflateError::Truncated { .. } => std::io::Error::new(ErrorKind::UnexpectedEof, e),
            InflateError::Corrupt(_) | InflateError::SizeMismatch { .. } => {
                std::io::Error::new(ErrorKind::InvalidData, e)
            }
            InflateError::Ended | InflateError::InvalidConfig { .. } => {
                std::io::Error::other(e)
            }
        }
    }
}
