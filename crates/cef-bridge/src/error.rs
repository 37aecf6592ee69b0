//! Bridge errors

use cef_config::ConfigError;
use cef_sys::LoadError;
use std::string::FromUtf16Error;
use thiserror::Error;

/// Errors surfaced by host-initiated bridge operations
///
/// Callbacks arriving from the library cannot return these; they log the
/// error and answer with their neutral default instead.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed URL from the library: {0}")]
    MalformedUrl(#[from] url::ParseError),

    #[error("Invalid UTF-16 from the library: {0}")]
    InvalidUtf16(#[from] FromUtf16Error),

    #[error("Invalid time from the library: {0}")]
    InvalidTime(String),

    #[error("Library call '{0}' failed")]
    CallFailed(&'static str),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_converts() {
        let err: BridgeError = url::Url::parse("").unwrap_err().into();
        assert!(matches!(err, BridgeError::MalformedUrl(_)));
        assert!(err.to_string().starts_with("Malformed URL"));
    }

    #[test]
    fn test_utf16_error_converts() {
        let err: BridgeError = String::from_utf16(&[0xD800]).unwrap_err().into();
        assert!(matches!(err, BridgeError::InvalidUtf16(_)));
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err: BridgeError = LoadError::LibraryNotFound("cef".to_string()).into();
        assert_eq!(err.to_string(), "Library not found: cef");
    }
}
