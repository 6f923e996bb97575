//! Archive Index.
//!
//! Maps normalized symbol keys to resource locators for one language pack:
//! tar member names for tarball packs, paths relative to the checkout for
//! tree packs. Built once per pack (or loaded from `symbols.json`), then
//! treated as immutable until the pack is invalidated.

mod archive;

pub use archive::{ArchiveHandle, ArchivePool};

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::base::constants::TREE_REFERENCE_DIR;
use crate::base::{ArchiveKind, CachePaths, LanguagePack, normalize_symbol};
use crate::error::DocError;
use crate::persist;

static CHUNKED_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^php-chunked-xhtml/(.*)\.html$").expect("chunked page pattern is valid")
});

/// Normalized symbol key → locator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolIndex {
    entries: FxHashMap<String, String>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key → locator`. The key is normalized; a later insert wins.
    pub fn insert(&mut self, key: &str, locator: impl Into<String>) {
        self.entries.insert(normalize_symbol(key), locator.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Canonical key for a normalized `symbol`.
    ///
    /// Prefixed forms are tried first, in order; the bare symbol is the last resort.
    pub fn find_key(&self, symbol: &str, prefixes: &[&str]) -> Option<String> {
        prefixes
            .iter()
            .map(|prefix| format!("{prefix}{symbol}"))
            .find(|key| self.contains(key))
            .or_else(|| self.contains(symbol).then(|| symbol.to_string()))
    }

    /// Index tar member names matching the chunked HTML layout.
    pub fn from_member_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            let name = name.as_ref();
            if let Some(caps) = CHUNKED_PAGE.captures(name) {
                index.insert(&caps[1], name);
            }
        }
        index
    }

    /// Index the XML pages of a checkout.
    ///
    /// Older checkouts keep every page below `reference/`; when that
    /// directory exists the walk is limited to it, otherwise the whole tree
    /// is indexed. Locators are relative to `root` with `/` separators.
    pub fn from_tree(root: &Path) -> Self {
        let reference = root.join(TREE_REFERENCE_DIR);
        let walk_root = if reference.is_dir() { reference } else { root.to_path_buf() };

        let mut index = Self::new();
        let mut files: Vec<_> = WalkDir::new(&walk_root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "xml"))
            .collect();
        // Deterministic "last writer wins" across platforms.
        files.sort();

        for path in files {
            let (Some(stem), Ok(relative)) = (path.file_stem(), path.strip_prefix(root)) else {
                continue;
            };
            let locator = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            index.insert(&stem.to_string_lossy(), locator);
        }
        index
    }

    /// Load the persisted index for `pack`, or build and persist it.
    ///
    /// Returns `Ok(None)` when the pack's archive or checkout is missing.
    /// A persisted index is trusted as-is.
    pub fn build_or_load(
        pack: &LanguagePack,
        paths: &CachePaths,
        pool: &mut ArchivePool,
    ) -> Result<Option<Self>, DocError> {
        if !pack.is_present() {
            tracing::debug!("Language pack '{}' not found at {}", pack.code, pack.root.display());
            return Ok(None);
        }

        let cache = paths.symbol_cache(&pack.code);
        if cache.exists() {
            tracing::debug!("Loading symbol index from {}", cache.display());
            return persist::read_json(&cache).map(Some);
        }

        let index = match pack.kind {
            ArchiveKind::Tarball => {
                let names = pool.handle(&pack.root)?.member_names()?;
                Self::from_member_names(names)
            }
            ArchiveKind::VcsTree => Self::from_tree(&pack.root),
        };
        tracing::info!("Indexed {} symbols for '{}'", index.len(), pack.code);

        persist::write_json(&cache, &index)?;
        Ok(Some(index))
    }
}
