//! Error types for lookup, indexing and extraction.
//!
//! These never cross the resolver boundary: [`crate::resolve`] turns them
//! into [`crate::resolve::Resolution`] variants.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading packs or extracting a single page.
#[derive(Debug, Error)]
pub enum DocError {
    /// IO error while reading an archive, a page or a cache file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted cache file could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A member listed in the index is no longer in the archive.
    #[error("Missing archive member: {0}")]
    MissingMember(String),

    /// A persisted cache file is larger than the read ceiling.
    #[error("Cache file {} exceeds {limit} bytes", path.display())]
    CacheTooLarge { path: PathBuf, limit: u64 },

    /// A structured page failed to parse.
    #[error("Malformed documentation for '{symbol}': {message}")]
    MalformedContent { symbol: String, message: String },
}

impl DocError {
    /// Create a malformed-content error for `symbol`.
    pub fn malformed(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedContent {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}
