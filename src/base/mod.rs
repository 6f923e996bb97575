//! Foundation types for the manual lookup core.
//!
//! This module provides the vocabulary shared by every other layer:
//! - [`LanguagePack`], [`ArchiveKind`] - one localized copy of the manual
//! - [`FormatProfile`] - per-archive-format resolution and cleanup tables
//! - [`CachePaths`] - the on-disk cache layout shared by indexing and acquisition
//! - [`normalize_symbol`], [`extract_word_at_cursor`] - symbol text handling
//! - Domain constants (URL templates, cache file names, size ceilings)
//!
//! This module has NO dependencies on other docphp modules.

pub mod constants;
mod language;
mod paths;
mod symbol;

pub use language::{ArchiveKind, FormatProfile, LanguagePack};
pub use paths::CachePaths;
pub use symbol::{extract_word_at_cursor, find_word_boundaries, is_word_character, normalize_symbol};

#[cfg(test)]
mod tests;
