//! Error types for siteconf operations.
//!
//! This module defines the main error type [`SiteconfError`]. Parsing a
//! config's text never fails; errors only come from the filesystem, from
//! decoding file bytes, and from URL lookups against loaded configs.
//!
//! # Example
//!
//! ```rust
//! use siteconf_core::{SiteconfError, Result};
//! use std::path::PathBuf;
//!
//! fn require_dir(path: PathBuf) -> Result<PathBuf> {
//!     if !path.is_dir() {
//!         return Err(SiteconfError::DirectoryNotFound(path));
//!     }
//!     Ok(path)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading site configs.
#[derive(Error, Debug)]
pub enum SiteconfError {
    /// Config directory missing or not a directory.
    ///
    /// Fatal for a whole directory load; no partial mapping is returned.
    #[error("Config directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Single config file not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A config file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid UTF-8 and lossy decoding was not requested.
    #[error("Invalid character encoding in {0}")]
    InvalidEncoding(PathBuf),

    /// Invalid URL provided to a registry lookup.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Other I/O errors, such as a failed directory listing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SiteconfError.
pub type Result<T> = std::result::Result<T, SiteconfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SiteconfError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_directory_not_found_display() {
        let err = SiteconfError::DirectoryNotFound(PathBuf::from("/missing/sites"));
        assert!(err.to_string().contains("/missing/sites"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        let err = SiteconfError::ReadError {
            path: PathBuf::from("example.com.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("example.com.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
