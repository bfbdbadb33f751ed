//! Error types for the DXF codec

use std::io;
use thiserror::Error;

/// Main error type for codec operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading or writing a stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed tag text
    #[error("Parse error at line {line}: group code {code} cannot hold '{text}'")]
    Parse {
        /// Group code of the offending pair
        code: i32,
        /// Line number of the value line
        line: usize,
        /// Raw value text
        text: String,
    },

    /// A group code line that is not an integer
    #[error("Invalid DXF code at line {line}: '{text}'")]
    InvalidCode { line: usize, text: String },

    /// Field value outside its documented domain
    #[error("Range error: {field} = {value} is outside {min}..={max}")]
    Range {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Entity-level constraint violated on write
    #[error("Validation error in {entity}: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },

    /// The stream ended in the middle of a pair
    #[error("Unexpected end of file after group code {code} at line {line}")]
    UnexpectedEof { code: i32, line: usize },

    /// Unsupported or unrecognized $ACADVER string
    #[error("Unsupported CAD version: {0:?}")]
    UnsupportedVersion(String),

    /// Invalid entity type
    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl DxfError {
    /// Build a range error for a bounded field.
    pub fn range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        DxfError::Range {
            field,
            value,
            min,
            max,
        }
    }

    /// Range error for a real-valued field with only a lower bound. The
    /// value is rounded down so that it lands outside the domain as well.
    pub fn range_below(field: &'static str, value: f64, min: i64) -> Self {
        let value = if value.is_nan() { i64::MIN } else { value.floor() as i64 };
        DxfError::range(field, value, min, i64::MAX)
    }

    /// Build a validation error for an entity kind.
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        DxfError::Validation {
            entity,
            message: message.into(),
        }
    }

    /// Errors a reader recovers from locally: the offending pair is skipped
    /// and reading continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DxfError::Parse { .. } | DxfError::Range { .. })
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = DxfError::Parse {
            code: 10,
            line: 42,
            text: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error at line 42: group code 10 cannot hold 'abc'"
        );
    }

    #[test]
    fn test_range_error() {
        let err = DxfError::range("creation_flag", 5, 0, 3);
        assert!(err.to_string().contains("creation_flag = 5"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validation_is_fatal() {
        let err = DxfError::validation("LINE", "start and end points coincide");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Validation error in LINE: start and end points coincide"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let dxf_err: DxfError = io_err.into();
        assert!(matches!(dxf_err, DxfError::Io(_)));
    }
}
