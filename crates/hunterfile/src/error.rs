use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("Malformed entry at index {index}: {message}")]
    MalformedEntry { index: usize, message: String },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Size constraint violated: {0}")]
    SizeConstraintViolation(String),

    #[error("{field} must be between 0 and {max} (got {value})")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("Unexpected end of data at offset {offset:#x} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Whether the error means the input is not a file this crate can read at all,
    /// as opposed to a readable file with a bad entry or a misused API.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::FormatMismatch(_) | Error::UnsupportedVersion(_) | Error::UnexpectedEof { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_is_format_error() {
        assert!(Error::FormatMismatch("bad magic".into()).is_format_error());
        assert!(Error::UnsupportedVersion("legacy".into()).is_format_error());
        assert!(Error::UnexpectedEof { offset: 4, needed: 8 }.is_format_error());
        assert!(!Error::KeyNotFound("KEY".into()).is_format_error());
    }

    #[test]
    fn test_value_out_of_range_message() {
        let err = Error::ValueOutOfRange {
            field: "HunterRank",
            value: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "HunterRank must be between 0 and 999 (got 1000)");
    }
}
