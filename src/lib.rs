//! # docphp
//!
//! Core library for looking up PHP manual entries from locally cached
//! language packs and rendering them for an editor popup or output panel.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! host      → Editor boundary: commands, popup navigation, debounce
//!   ↓
//! session   → DocSession: one context object per editor instance
//!   ↓
//! resolve   → Symbol → (key, language, content), with prefixes and fallback
//!   ↓
//! packs     → Loaded packs, definition caches, background acquisition
//!   ↓
//! extract   → Entry extraction from chunked HTML or DocBook XML
//! markup    → Popup rewriting and plain-text panel rendering
//!   ↓
//! index     → Symbol key → locator, archive handle pool
//! entities  → Named character references, documentation entities
//!   ↓
//! config    → Settings, language catalog
//! base      → Primitives (LanguagePack, CachePaths, symbol normalization)
//! ```

// ============================================================================
// MODULES (dependency order: base → config → index/entities → extract/markup
// → packs → resolve → session → host)
// ============================================================================

/// Foundation types: LanguagePack, CachePaths, symbol normalization
pub mod base;

/// Settings file and the language catalog
pub mod config;

/// Character and documentation entity tables
pub mod entities;

/// Error type shared by the lookup layers
pub mod error;

/// Symbol index and archive access
pub mod index;

/// Content extraction from tarball pages and XML sources
pub mod extract;

/// Popup and panel rendering
pub mod markup;

/// Language pack registry and acquisition
pub mod packs;

/// Symbol resolution
pub mod resolve;

/// Lookup session
pub mod session;

/// Editor-facing commands
pub mod host;

mod persist;

#[cfg(test)]
mod test_support;

// Re-export commonly needed items
pub use base::{ArchiveKind, CachePaths, LanguagePack, normalize_symbol};
pub use config::{Settings, SettingsStore};
pub use error::DocError;
pub use host::{Commands, CursorContext, Display, Notice};
pub use resolve::Resolution;
pub use session::DocSession;
