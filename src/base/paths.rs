//! On-disk cache layout.
//!
//! ```text
//! <root>/language/
//! ├── php_manual_en.tar.gz     # tarball pack
//! └── en/
//!     ├── symbols.json         # persisted SymbolIndex
//!     ├── entities.json        # persisted documentation entities
//!     └── tree/                # checkout for tree packs
//! ```

use std::path::{Path, PathBuf};

use super::constants::{ENTITY_CACHE_FILE, LANGUAGE_DIR, SYMBOL_CACHE_FILE, TREE_DIR};
use super::language::{ArchiveKind, LanguagePack};

/// Deterministic paths derived from a cache root and a language code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachePaths {
    root: PathBuf,
}

impl CachePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language_dir(&self) -> PathBuf {
        self.root.join(LANGUAGE_DIR)
    }

    pub fn tarball(&self, code: &str) -> PathBuf {
        self.language_dir().join(format!("php_manual_{code}.tar.gz"))
    }

    /// Temporary download target; only renamed to [`Self::tarball`] once complete.
    pub fn partial_tarball(&self, code: &str) -> PathBuf {
        self.language_dir().join(format!("php_manual_{code}.tar.gz.part"))
    }

    pub fn pack_cache_dir(&self, code: &str) -> PathBuf {
        self.language_dir().join(code)
    }

    pub fn tree(&self, code: &str) -> PathBuf {
        self.pack_cache_dir(code).join(TREE_DIR)
    }

    /// Temporary checkout target; only renamed to [`Self::tree`] on success.
    pub fn partial_tree(&self, code: &str) -> PathBuf {
        self.pack_cache_dir(code).join(format!("{TREE_DIR}.part"))
    }

    pub fn symbol_cache(&self, code: &str) -> PathBuf {
        self.pack_cache_dir(code).join(SYMBOL_CACHE_FILE)
    }

    pub fn entity_cache(&self, code: &str) -> PathBuf {
        self.pack_cache_dir(code).join(ENTITY_CACHE_FILE)
    }

    /// Build the pack descriptor for a configured language.
    pub fn pack(&self, code: &str, kind: ArchiveKind) -> LanguagePack {
        let root = match kind {
            ArchiveKind::Tarball => self.tarball(code),
            ArchiveKind::VcsTree => self.tree(code),
        };
        LanguagePack::new(code, kind, root)
    }
}
