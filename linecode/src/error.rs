/*!
Common error types for the line-encoding library.
*/

use thiserror::Error;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, LineCodeError>;

/// Error type for all library operations
#[derive(Error, Debug)]
pub enum LineCodeError {
    /// Bit string validation errors
    #[error("Bit sequence error: {0}")]
    Bits(#[from] crate::bits::BitError),

    /// I/O errors (SVG export, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LineCodeError {
    /// Create a new export error
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitError;

    #[test]
    fn test_bit_error_conversion() {
        let err: LineCodeError = BitError::Empty.into();
        assert!(matches!(err, LineCodeError::Bits(BitError::Empty)));
        assert_eq!(err.to_string(), "Bit sequence error: Please enter a binary string");
    }

    #[test]
    fn test_export_constructor() {
        let err = LineCodeError::export("no surface");
        assert_eq!(err.to_string(), "Export error: no surface");
    }
}
