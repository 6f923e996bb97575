//! User commands: show definition, manual index, search, language selection
//! and checkout.

use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;

use super::navigation::PopupSession;
use super::{CursorContext, Display, Notice};
use crate::base::LanguagePack;
use crate::base::constants::MANUAL_INDEX_SYMBOL;
use crate::config::{LanguageChoices, language_choices};
use crate::markup::to_panel_text;
use crate::packs::{AcquireError, AcquireOptions, PackAcquirer};
use crate::resolve::Resolution;
use crate::session::DocSession;

/// Errors from commands that change configuration.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Language '{0}' is not installed")]
    NotInstalled(String),

    #[error("Language pack checkout is not available in this build")]
    NoAcquirer,

    #[error(transparent)]
    Acquire(#[from] AcquireError),
}

/// Where a definition ended up.
#[derive(Debug)]
pub enum Shown {
    Popup(PopupSession),
    Panel { key: String },
    /// Nothing was shown; a notice may have been raised.
    Nothing,
}

/// Command entry points for one editor.
#[derive(Debug, Clone)]
pub struct Commands {
    session: Arc<DocSession>,
    acquirer: Option<PackAcquirer>,
}

impl Commands {
    pub fn new(session: Arc<DocSession>) -> Self {
        Self {
            session,
            acquirer: None,
        }
    }

    pub fn with_acquirer(mut self, acquirer: PackAcquirer) -> Self {
        self.acquirer = Some(acquirer);
        self
    }

    pub fn session(&self) -> &Arc<DocSession> {
        &self.session
    }

    /// Look up `symbol` (or the word at the caret) and show it.
    ///
    /// Without `force`, nothing happens outside PHP source. Alternate
    /// candidates from the cursor context are tried in order when the word is not found.
    pub fn show_definition(
        &self,
        cursor: &dyn CursorContext,
        display: &dyn Display,
        symbol: Option<&str>,
        force: bool,
    ) -> Shown {
        if !force && !cursor.in_source_scope() {
            return Shown::Nothing;
        }
        let candidates = match symbol {
            Some(symbol) => vec![symbol.to_string()],
            None => match cursor.symbol_at_cursor() {
                Some(at_cursor) => std::iter::once(at_cursor.word)
                    .chain(at_cursor.alternates)
                    .collect(),
                None => return Shown::Nothing,
            },
        };

        let mut resolution = Resolution::NotFound;
        for candidate in &candidates {
            resolution = self.session.resolve(candidate, None);
            if !matches!(resolution, Resolution::NotFound) {
                break;
            }
        }

        let settings = self.session.settings().get();
        match resolution {
            Resolution::Found {
                key,
                language,
                content,
            } => {
                if settings.use_panel {
                    display.append_panel(&format!("{}\n", to_panel_text(&content)));
                    return Shown::Panel { key };
                }
                let mut popup = PopupSession::new(Arc::clone(&self.session), key, language);
                let html = popup.render(&content);
                display.show_popup(&html, settings.popup_max_width, settings.popup_max_height);
                Shown::Popup(popup)
            }
            Resolution::NotFound => {
                if settings.prompt_when_not_found {
                    let symbol = candidates.into_iter().next().unwrap_or_default();
                    display.notify(&Notice::NotFound { symbol });
                }
                Shown::Nothing
            }
            Resolution::PackUnavailable { language, fallback } => {
                display.notify(&Notice::PackUnavailable { language, fallback });
                Shown::Nothing
            }
            Resolution::Broken { key, message } => {
                display.notify(&Notice::Broken { key, message });
                Shown::Nothing
            }
        }
    }

    /// Show the manual's front page.
    pub fn open_manual_index(&self, cursor: &dyn CursorContext, display: &dyn Display) -> Shown {
        self.show_definition(cursor, display, Some(MANUAL_INDEX_SYMBOL), true)
    }

    /// Every entry of the active pack, as editor-style identifiers, sorted.
    pub fn search_symbols(&self) -> Vec<String> {
        let language = self.session.active_language();
        let loaded = match self.session.registry().pack(&language) {
            Ok(Some(loaded)) => loaded,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load language pack '{}': {}", language, e);
                return Vec::new();
            }
        };
        let mut symbols: Vec<String> = loaded.index().keys().map(|key| key.replace('-', "_")).collect();
        symbols.sort();
        symbols
    }

    /// Quick-pick entries for the installed packs, with the active one selected.
    pub fn installed_languages(&self) -> LanguageChoices {
        let (codes, active) = self
            .session
            .settings()
            .with(|s| (s.languages.keys().cloned().collect::<Vec<_>>(), s.language.clone()));
        language_choices(Some(codes.as_slice()), Some(active.as_str()))
    }

    /// Quick-pick entries for every known language.
    pub fn checkout_choices(&self) -> LanguageChoices {
        language_choices(None, None)
    }

    /// Make an installed pack the active one.
    ///
    /// Every other pack is dropped from memory, except the configured fallback.
    pub fn select_language(&self, code: &str) -> Result<(), HostError> {
        if !self.session.settings().with(|s| s.languages.contains_key(code)) {
            return Err(HostError::NotInstalled(code.to_string()));
        }
        let previous = self.session.active_language();
        self.session.settings().update(|s| s.language = code.to_string());

        let fallback = self.session.fallback_language();
        let mut stale = self.session.registry().loaded_languages();
        stale.push(previous);
        stale.sort();
        stale.dedup();
        for language in stale
            .iter()
            .filter(|language| *language != code && Some(*language) != fallback.as_ref())
        {
            self.session.invalidate(language);
        }
        tracing::info!("Active language is now '{}'", code);
        Ok(())
    }

    /// Start acquiring a pack in the background.
    ///
    /// A request that cannot start is reported at once. Otherwise the worker
    /// reports [`Notice::CheckedOut`] or [`Notice::AcquireFailed`] to `display`
    /// when it finishes.
    pub fn checkout_language(
        &self,
        code: &str,
        set_fallback: bool,
        display: Arc<dyn Display + Send + Sync>,
    ) -> Result<JoinHandle<Result<LanguagePack, AcquireError>>, HostError> {
        let acquirer = self.acquirer.as_ref().ok_or(HostError::NoAcquirer)?;
        let worker_display = Arc::clone(&display);
        let language = code.to_string();
        let started = acquirer.start_with(code, AcquireOptions { set_fallback }, move |outcome| {
            worker_display.notify(&outcome_notice(&language, outcome));
        });
        match started {
            Ok(handle) => Ok(handle),
            Err(e) => {
                let notice = match &e {
                    AcquireError::Busy { language } => Notice::Busy {
                        language: language.clone(),
                    },
                    other => Notice::AcquireFailed {
                        language: code.to_string(),
                        message: other.to_string(),
                    },
                };
                display.notify(&notice);
                Err(e.into())
            }
        }
    }
}

fn outcome_notice(language: &str, outcome: &Result<LanguagePack, AcquireError>) -> Notice {
    match outcome {
        Ok(_) => Notice::CheckedOut {
            language: language.to_string(),
        },
        Err(e) => Notice::AcquireFailed {
            language: language.to_string(),
            message: e.to_string(),
        },
    }
}
