//! Error types for the TVmaze client
//!
//! This module defines all error types used throughout the library.
//! TvMazeError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for TVmaze operations
#[derive(Error, Debug)]
pub enum TvMazeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Requested resource was not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Invalid show ID provided
    #[error("Invalid show ID: {0}")]
    InvalidId(u32),

    /// Local cache could not be read or written
    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<serde_json::Error> for TvMazeError {
    fn from(err: serde_json::Error) -> Self {
        TvMazeError::ParseError(err.to_string())
    }
}

/// Serialize TvMazeError as a string for Tauri compatibility
impl Serialize for TvMazeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for TVmaze operations
pub type Result<T> = std::result::Result<T, TvMazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let error = TvMazeError::ParseError("expected value at line 1".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to parse response: expected value at line 1"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let error = TvMazeError::NotFound("/shows/999999".to_string());
        assert_eq!(error.to_string(), "Not found: /shows/999999");
    }

    #[test]
    fn test_error_display_rate_limited() {
        let error = TvMazeError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_error_display_invalid_id() {
        let error = TvMazeError::InvalidId(0);
        assert_eq!(error.to_string(), "Invalid show ID: 0");
    }

    #[test]
    fn test_error_from_serde_json() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: TvMazeError = err.into();
        assert!(matches!(error, TvMazeError::ParseError(_)));
    }

    #[test]
    fn test_error_serialize() {
        let error = TvMazeError::Cache("disk full".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Cache error: disk full\"");
    }

    #[test]
    fn test_error_serialize_rate_limited() {
        let error = TvMazeError::RateLimited;
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Rate limited - too many requests\"");
    }
}
