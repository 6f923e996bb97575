//! Background acquisition of language packs.
//!
//! A tarball download is tried first; when no tarball is published (HTTP 404)
//! the DocBook sources are checked out instead. At most one acquisition runs
//! per process; a second request is rejected with [`AcquireError::Busy`].

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;

use super::PackRegistry;
use super::checkout::{Checkout, checkout_tree};
use super::download::{Fetch, download_archive};
use crate::base::constants::{TARBALL_URL_TEMPLATE, TREE_URL_TEMPLATE, fill_template};
use crate::base::{ArchiveKind, LanguagePack};
use crate::config::lookup_language;
use crate::error::DocError;
use crate::persist;

/// Errors raised while acquiring a language pack.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Another acquisition is already running.
    #[error("Another checkout is in progress for '{language}'. Please try again later.")]
    Busy { language: String },

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    /// The server answered with a non-success status.
    #[error("HTTP error {status} fetching {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    /// The body was shorter or longer than its declared length.
    #[error("Download size mismatch: expected {expected} bytes, received {found}")]
    SizeMismatch { expected: u64, found: u64 },

    /// The checkout command exited unsuccessfully.
    #[error("Checkout failed with exit status {status:?}")]
    Checkout { status: Option<i32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stale caches could not be cleared after installation.
    #[error("Cache error: {0}")]
    Cache(#[from] DocError),
}

impl AcquireError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Whether the server reported the archive as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}

/// Receives coarse acquisition progress.
pub trait ProgressSink: Send + Sync {
    /// `received` bytes so far; `total` when the size is known.
    fn progress(&self, language: &str, received: u64, total: Option<u64>);

    /// Called once per acquisition with its outcome.
    fn finished(&self, language: &str, outcome: &Result<LanguagePack, AcquireError>) {
        match outcome {
            Ok(pack) => tracing::info!("Language {} is checked out ({})", language, pack.kind.as_str()),
            Err(e) => tracing::warn!("Language {} checkout failed: {}", language, e),
        }
    }
}

/// Progress sink that writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn progress(&self, language: &str, received: u64, total: Option<u64>) {
        match total {
            Some(total) if total > 0 => {
                tracing::info!("{}% checking out {}", received * 100 / total, language)
            }
            _ => tracing::info!("{} KB checking out {}", received / 1024, language),
        }
    }
}

/// Options for one acquisition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AcquireOptions {
    /// Register the pack as the fallback language instead of the active one.
    pub set_fallback: bool,
}

type Slot = Arc<Mutex<Option<String>>>;

/// Releases the acquisition slot when dropped, including on panic.
struct SlotGuard {
    slot: Slot,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

/// Downloads or checks out language packs and installs them.
#[derive(Clone)]
pub struct PackAcquirer {
    registry: Arc<PackRegistry>,
    fetch: Arc<dyn Fetch>,
    checkout: Arc<dyn Checkout>,
    progress: Arc<dyn ProgressSink>,
    slot: Slot,
}

impl std::fmt::Debug for PackAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackAcquirer")
            .field("busy", &*self.slot.lock())
            .finish_non_exhaustive()
    }
}

impl PackAcquirer {
    pub fn new(registry: Arc<PackRegistry>, fetch: Arc<dyn Fetch>, checkout: Arc<dyn Checkout>) -> Self {
        Self {
            registry,
            fetch,
            checkout,
            progress: Arc::new(LogProgress),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// HTTP download with a `git` fallback.
    #[cfg(feature = "acquire")]
    pub fn with_defaults(registry: Arc<PackRegistry>) -> Result<Self, AcquireError> {
        Ok(Self::new(
            registry,
            Arc::new(super::download::HttpFetcher::new()?),
            Arc::new(super::checkout::GitCheckout::default()),
        ))
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Language currently being acquired, if any.
    pub fn busy_language(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    /// Acquire `code` on a background thread.
    pub fn start(
        &self,
        code: &str,
        options: AcquireOptions,
    ) -> Result<JoinHandle<Result<LanguagePack, AcquireError>>, AcquireError> {
        self.start_with(code, options, |_| {})
    }

    /// Like [`start`](Self::start), calling `on_finish` on the worker thread
    /// with the outcome before the slot is released.
    pub fn start_with<F>(
        &self,
        code: &str,
        options: AcquireOptions,
        on_finish: F,
    ) -> Result<JoinHandle<Result<LanguagePack, AcquireError>>, AcquireError>
    where
        F: FnOnce(&Result<LanguagePack, AcquireError>) + Send + 'static,
    {
        validate(code)?;
        let guard = self.claim(code)?;
        let this = self.clone();
        let code = code.to_string();
        let handle = std::thread::Builder::new()
            .name(format!("docphp-checkout-{code}"))
            .spawn(move || {
                let _guard = guard;
                let outcome = this.acquire(&code, options);
                on_finish(&outcome);
                outcome
            })?;
        Ok(handle)
    }

    /// Acquire `code` on the calling thread.
    pub fn run(&self, code: &str, options: AcquireOptions) -> Result<LanguagePack, AcquireError> {
        validate(code)?;
        let _guard = self.claim(code)?;
        self.acquire(code, options)
    }

    fn claim(&self, code: &str) -> Result<SlotGuard, AcquireError> {
        let mut slot = self.slot.lock();
        if let Some(language) = slot.as_ref() {
            return Err(AcquireError::Busy {
                language: language.clone(),
            });
        }
        *slot = Some(code.to_string());
        Ok(SlotGuard {
            slot: Arc::clone(&self.slot),
        })
    }

    fn acquire(&self, code: &str, options: AcquireOptions) -> Result<LanguagePack, AcquireError> {
        let outcome = self.fetch_pack(code).and_then(|kind| self.install(code, kind, options));
        self.progress.finished(code, &outcome);
        outcome
    }

    fn fetch_pack(&self, code: &str) -> Result<ArchiveKind, AcquireError> {
        let paths = self.registry.paths();
        let url = fill_template(TARBALL_URL_TEMPLATE, code, "");
        let downloaded = download_archive(
            self.fetch.as_ref(),
            &url,
            &paths.partial_tarball(code),
            &paths.tarball(code),
            self.progress.as_ref(),
            code,
        );
        match downloaded {
            Ok(_) => Ok(ArchiveKind::Tarball),
            Err(e) if e.is_not_found() => {
                tracing::info!("No tarball published for '{}', checking out sources", code);
                let url = fill_template(TREE_URL_TEMPLATE, code, "");
                checkout_tree(
                    self.checkout.as_ref(),
                    &url,
                    &paths.partial_tree(code),
                    &paths.tree(code),
                    self.progress.as_ref(),
                    code,
                )?;
                Ok(ArchiveKind::VcsTree)
            }
            Err(e) => Err(e),
        }
    }

    /// Clear stale caches, register the pack and drop its in-memory state.
    fn install(&self, code: &str, kind: ArchiveKind, options: AcquireOptions) -> Result<LanguagePack, AcquireError> {
        let paths = self.registry.paths();
        persist::remove(&paths.symbol_cache(code))?;
        persist::remove(&paths.entity_cache(code))?;

        self.registry.settings().update(|settings| {
            settings.languages.insert(code.to_string(), kind);
            if options.set_fallback {
                settings.language_fallback = Some(code.to_string());
            } else {
                settings.language = code.to_string();
            }
        });
        self.registry.invalidate(code);
        Ok(paths.pack(code, kind))
    }
}

fn validate(code: &str) -> Result<(), AcquireError> {
    match lookup_language(code) {
        Some(_) => Ok(()),
        None => Err(AcquireError::UnknownLanguage(code.to_string())),
    }
}
