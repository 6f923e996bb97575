//! The lookup session: one context object instead of process globals.
//!
//! A [`DocSession`] owns the settings store, the cache layout, the loaded
//! packs with their definition caches, the archive pool and the extractor.
//! Hosts create one per editor instance and share it behind an `Arc`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::base::CachePaths;
use crate::config::SettingsStore;
use crate::extract::{Extractor, ManualExtractor};
use crate::packs::PackRegistry;
use crate::resolve::{Resolution, Resolver};

pub struct DocSession {
    registry: Arc<PackRegistry>,
    extractor: Arc<dyn Extractor>,
}

impl std::fmt::Debug for DocSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocSession")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl DocSession {
    /// Session over the cache directory `cache_root`.
    pub fn new(settings: SettingsStore, cache_root: impl Into<PathBuf>) -> Self {
        let paths = CachePaths::new(cache_root);
        Self {
            registry: Arc::new(PackRegistry::new(settings, paths)),
            extractor: Arc::new(ManualExtractor),
        }
    }

    /// Replace the content extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn registry(&self) -> &Arc<PackRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &SettingsStore {
        self.registry.settings()
    }

    pub fn paths(&self) -> &CachePaths {
        self.registry.paths()
    }

    pub fn active_language(&self) -> String {
        self.registry.active_language()
    }

    pub fn fallback_language(&self) -> Option<String> {
        self.registry.fallback_language(&self.active_language())
    }

    /// Resolve `symbol` in `language`, or in the active language when `None`.
    pub fn resolve(&self, symbol: &str, language: Option<&str>) -> Resolution {
        let language = match language {
            Some(language) => language.to_string(),
            None => self.active_language(),
        };
        let resolution = Resolver::new(&self.registry, self.extractor.as_ref()).resolve(symbol, &language);
        tracing::debug!("Resolved '{}' in '{}': {}", symbol, language, outcome_name(&resolution));
        resolution
    }

    /// Whether `symbol` exists in the installed pack for `code`, prefixes included.
    pub fn is_locatable(&self, code: &str, symbol: &str) -> bool {
        match self.registry.pack(code) {
            Ok(Some(loaded)) => {
                let symbol = crate::base::normalize_symbol(symbol);
                loaded
                    .index()
                    .find_key(&symbol, loaded.pack().kind.profile().prefixes)
                    .is_some()
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to load language pack '{}': {}", code, e);
                false
            }
        }
    }

    /// Drop the in-memory state of one pack.
    pub fn invalidate(&self, code: &str) {
        self.registry.invalidate(code);
    }

    /// Release every pack and archive handle.
    pub fn close(&self) {
        let closed = self.registry.close();
        tracing::debug!("Session closed ({} archive handle(s))", closed);
    }
}

fn outcome_name(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Found { .. } => "found",
        Resolution::NotFound => "not found",
        Resolution::PackUnavailable { .. } => "pack unavailable",
        Resolution::Broken { .. } => "broken",
    }
}
