//! Symbol Resolver.
//!
//! ```text
//! symbol ─ normalize ─▶ primary pack ─ prefixes ─▶ key? ─ cached? ─▶ Found
//!                            │                      │         └─ extract ─ Latin-1 decode ─ store
//!                            │                      └─ no ─▶ fallback pack (once, no prefixes)
//!                            └─ not installed ─▶ PackUnavailable
//! ```
//!
//! Failures never escape as errors: every outcome is a [`Resolution`].

use std::sync::Arc;

use crate::base::{ArchiveKind, normalize_symbol};
use crate::entities::{GenericTable, decode};
use crate::error::DocError;
use crate::extract::{ExtractRequest, Extractor};
use crate::packs::{LoadedPack, PackRegistry};

/// Outcome of a lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found {
        /// Canonical (normalized, possibly prefixed) key.
        key: String,
        /// Language the content came from; differs from the request after a fallback.
        language: String,
        content: Arc<str>,
    },
    /// Absent from the requested pack and from the fallback.
    NotFound,
    /// The pack is not installed.
    PackUnavailable {
        language: String,
        /// Whether this was the fallback pack.
        fallback: bool,
    },
    /// The entry exists but could not be extracted. Nothing was cached.
    Broken { key: String, message: String },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Found { content, .. } => Some(&**content),
            _ => None,
        }
    }
}

/// Which lookup in the chain this is. A fallback never falls back again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    Primary,
    Fallback,
}

/// Resolves symbols against the packs of one registry.
pub struct Resolver<'a> {
    registry: &'a PackRegistry,
    extractor: &'a dyn Extractor,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a PackRegistry, extractor: &'a dyn Extractor) -> Self {
        Self { registry, extractor }
    }

    /// Resolve `symbol` in `language`, consulting the fallback language at most once.
    pub fn resolve(&self, symbol: &str, language: &str) -> Resolution {
        self.resolve_in(&normalize_symbol(symbol), language, Attempt::Primary)
    }

    fn resolve_in(&self, symbol: &str, language: &str, attempt: Attempt) -> Resolution {
        let loaded = match self.registry.pack(language) {
            Ok(Some(loaded)) => loaded,
            Ok(None) => {
                return Resolution::PackUnavailable {
                    language: language.to_string(),
                    fallback: attempt == Attempt::Fallback,
                };
            }
            Err(e) => {
                tracing::warn!("Failed to load language pack '{}': {}", language, e);
                return Resolution::PackUnavailable {
                    language: language.to_string(),
                    fallback: attempt == Attempt::Fallback,
                };
            }
        };

        let prefixes = match attempt {
            Attempt::Primary => loaded.pack().kind.profile().prefixes,
            Attempt::Fallback => &[],
        };
        let Some(key) = loaded.index().find_key(symbol, prefixes) else {
            return match (attempt, self.registry.fallback_language(language)) {
                (Attempt::Primary, Some(fallback)) => {
                    tracing::debug!("'{}' not in '{}', trying fallback '{}'", symbol, language, fallback);
                    self.resolve_in(symbol, &fallback, Attempt::Fallback)
                }
                _ => Resolution::NotFound,
            };
        };

        if let Some(content) = loaded.cached(&key) {
            return Resolution::Found {
                key,
                language: language.to_string(),
                content,
            };
        }

        match self.extract(&loaded, &key) {
            Ok(raw) => {
                let content: Arc<str> = Arc::from(decode(&raw, GenericTable::Latin1).as_ref());
                let content = if self.registry.is_live(&loaded) {
                    loaded.store(&key, content)
                } else {
                    tracing::debug!("Pack '{}' was invalidated during lookup; not caching '{}'", language, key);
                    content
                };
                Resolution::Found {
                    key,
                    language: language.to_string(),
                    content,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to extract '{}' from '{}': {}", key, language, e);
                Resolution::Broken {
                    message: e.to_string(),
                    key,
                }
            }
        }
    }

    fn extract(&self, loaded: &LoadedPack, key: &str) -> Result<String, DocError> {
        let locator = loaded
            .index()
            .get(key)
            .ok_or_else(|| DocError::MissingMember(key.to_string()))?;
        let entities = match loaded.pack().kind {
            ArchiveKind::VcsTree => Some(loaded.entities(self.registry.paths())?),
            ArchiveKind::Tarball => None,
        };
        let request = ExtractRequest {
            pack: loaded.pack(),
            key,
            locator,
            entities: entities.as_deref(),
        };
        self.registry.with_pool(|pool| self.extractor.extract(&request, pool))
    }
}
