//! Language pack availability, invalidation and acquisition.
//!
//! [`PackRegistry`] owns everything that is per pack and in memory: the
//! loaded [`SymbolIndex`], the definition cache, the documentation entity
//! table and the shared [`ArchivePool`]. Acquisition lives in
//! [`PackAcquirer`] and talks to the registry only through
//! [`PackRegistry::invalidate`] and the settings store.

mod acquire;
mod checkout;
mod download;

pub use acquire::{AcquireError, AcquireOptions, LogProgress, PackAcquirer, ProgressSink};
pub use checkout::{Checkout, GitCheckout, checkout_tree};
#[cfg(feature = "acquire")]
pub use download::HttpFetcher;
pub use download::{Fetch, FetchResponse, download_archive};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::base::{ArchiveKind, CachePaths, LanguagePack};
use crate::config::SettingsStore;
use crate::entities::EntityTable;
use crate::error::DocError;
use crate::index::{ArchivePool, SymbolIndex};

/// A pack whose index is in memory, plus its definition cache.
#[derive(Debug)]
pub struct LoadedPack {
    pack: LanguagePack,
    index: SymbolIndex,
    definitions: Mutex<FxHashMap<String, Arc<str>>>,
    entities: Mutex<Option<Arc<EntityTable>>>,
}

impl LoadedPack {
    pub fn new(pack: LanguagePack, index: SymbolIndex) -> Self {
        Self {
            pack,
            index,
            definitions: Mutex::new(FxHashMap::default()),
            entities: Mutex::new(None),
        }
    }

    pub fn pack(&self) -> &LanguagePack {
        &self.pack
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn cached(&self, key: &str) -> Option<Arc<str>> {
        self.definitions.lock().get(key).cloned()
    }

    /// Store extracted content. An existing entry is kept and returned.
    pub fn store(&self, key: &str, content: Arc<str>) -> Arc<str> {
        self.definitions
            .lock()
            .entry(key.to_string())
            .or_insert(content)
            .clone()
    }

    pub fn cached_count(&self) -> usize {
        self.definitions.lock().len()
    }

    /// Documentation entities for tree packs, built or loaded on first use.
    pub fn entities(&self, paths: &CachePaths) -> Result<Arc<EntityTable>, DocError> {
        let mut slot = self.entities.lock();
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(EntityTable::build_or_load(&self.pack, paths)?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }
}

/// In-memory pack state for one session.
#[derive(Debug)]
pub struct PackRegistry {
    settings: SettingsStore,
    paths: CachePaths,
    loaded: Mutex<FxHashMap<String, Arc<LoadedPack>>>,
    pool: Mutex<ArchivePool>,
}

impl PackRegistry {
    pub fn new(settings: SettingsStore, paths: CachePaths) -> Self {
        Self {
            settings,
            paths,
            loaded: Mutex::new(FxHashMap::default()),
            pool: Mutex::new(ArchivePool::new()),
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    pub fn active_language(&self) -> String {
        self.settings.with(|s| s.language.clone())
    }

    /// Fallback for `language`, if one is configured and differs from it.
    pub fn fallback_language(&self, language: &str) -> Option<String> {
        self.settings.with(|s| s.fallback_for(language).map(str::to_string))
    }

    /// Pack descriptor for `code`. Unconfigured languages are looked up as tarballs.
    pub fn descriptor(&self, code: &str) -> LanguagePack {
        let kind = self
            .settings
            .with(|s| s.pack_kind(code))
            .unwrap_or(ArchiveKind::Tarball);
        self.paths.pack(code, kind)
    }

    /// The loaded pack for `code`, loading it on first access.
    ///
    /// `Ok(None)` means the pack is not installed.
    pub fn pack(&self, code: &str) -> Result<Option<Arc<LoadedPack>>, DocError> {
        if let Some(loaded) = self.loaded.lock().get(code) {
            return Ok(Some(Arc::clone(loaded)));
        }

        let pack = self.descriptor(code);
        let index = {
            let mut pool = self.pool.lock();
            SymbolIndex::build_or_load(&pack, &self.paths, &mut pool)?
        };
        let Some(index) = index else {
            return Ok(None);
        };

        tracing::debug!("Loaded language pack '{}' ({} symbols)", code, index.len());
        let fresh = Arc::new(LoadedPack::new(pack, index));
        let mut loaded = self.loaded.lock();
        let entry = loaded.entry(code.to_string()).or_insert(fresh);
        Ok(Some(Arc::clone(entry)))
    }

    /// Whether `loaded` is still the live pack for its language.
    pub fn is_live(&self, loaded: &Arc<LoadedPack>) -> bool {
        self.loaded
            .lock()
            .get(&loaded.pack.code)
            .is_some_and(|live| Arc::ptr_eq(live, loaded))
    }

    /// Drop every in-memory cache for `code` and close its archive handle.
    pub fn invalidate(&self, code: &str) {
        let removed = self.loaded.lock().remove(code);
        let mut pool = self.pool.lock();
        let released = match &removed {
            Some(loaded) => pool.release(&loaded.pack.root),
            None => pool.release(&self.paths.tarball(code)),
        };
        tracing::debug!(
            "Invalidated language pack '{}' (loaded: {}, handle released: {})",
            code,
            removed.is_some(),
            released
        );
    }

    /// Codes of every pack currently in memory, sorted.
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.loaded.lock().keys().cloned().collect();
        codes.sort();
        codes
    }

    pub fn is_loaded(&self, code: &str) -> bool {
        self.loaded.lock().contains_key(code)
    }

    /// Run `f` with exclusive access to the archive pool.
    pub fn with_pool<R>(&self, f: impl FnOnce(&mut ArchivePool) -> R) -> R {
        f(&mut self.pool.lock())
    }

    /// Drop all loaded packs and close every archive handle.
    pub fn close(&self) -> usize {
        self.loaded.lock().clear();
        self.pool.lock().close_all()
    }
}
