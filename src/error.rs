//! Error types for WebBundle
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundle operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Main error type for bundle operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset content could not be decoded as text
    #[error("asset {file} is not valid UTF-8 text")]
    AssetNotUtf8 { file: PathBuf },

    /// Two filenames sanitize to the same constant name
    #[error("constant name '{identifier}' derived from both '{first}' and '{second}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// Asset contains the sequence that would terminate its raw literal
    #[error("asset {file} contains the raw literal terminator '){delimiter}\"' and cannot be embedded verbatim")]
    DelimiterCollision { file: PathBuf, delimiter: String },

    /// Invalid config file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_duplicate_identifier() {
        let err = BundleError::DuplicateIdentifier {
            identifier: "A_B_HTML".to_string(),
            first: "a-b.html".to_string(),
            second: "a b.html".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "constant name 'A_B_HTML' derived from both 'a-b.html' and 'a b.html'"
        );
    }

    #[test]
    fn test_error_display_delimiter_collision() {
        let err = BundleError::DelimiterCollision {
            file: PathBuf::from("web/index.html"),
            delimiter: "INDEXHTMLDL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "asset web/index.html contains the raw literal terminator ')INDEXHTMLDL\"' and cannot be embedded verbatim"
        );
    }

    #[test]
    fn test_error_display_not_utf8() {
        let err = BundleError::AssetNotUtf8 {
            file: PathBuf::from("web/logo.html"),
        };
        assert_eq!(err.to_string(), "asset web/logo.html is not valid UTF-8 text");
    }
}
