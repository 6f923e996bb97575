//! Popup navigation: in-popup links, language switches and history.

use std::sync::Arc;

use super::{Display, Notice};
use crate::base::constants::MAX_POPUP_CHARS;
use crate::markup::{PopupContext, PopupTransformer};
use crate::resolve::Resolution;
use crate::session::DocSession;

const BACK_LINK: &str = "history.back";
const CHANGE_LANGUAGE_PREFIX: &str = "changeto.";
const PAGE_SUFFIX: &str = ".html";

/// Result of following a popup link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// External link handed to the browser.
    Browser,
    /// The popup now shows `key`.
    Updated { key: String, language: String },
    /// The target could not be shown; the popup is unchanged.
    Unresolved,
    /// `history.back` with an empty history.
    NoHistory,
}

/// State of one open popup.
#[derive(Debug)]
pub struct PopupSession {
    session: Arc<DocSession>,
    transformer: PopupTransformer,
    current: String,
    language: String,
    history: Vec<String>,
}

impl PopupSession {
    pub fn new(session: Arc<DocSession>, key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            session,
            transformer: PopupTransformer::new(),
            current: key.into(),
            language: language.into(),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Popup HTML for the current entry.
    pub fn render(&mut self, content: &str) -> String {
        let languages: Vec<String> = self.session.settings().with(|s| s.languages.keys().cloned().collect());
        let ctx = PopupContext {
            key: &self.current,
            language: &self.language,
            languages: &languages,
            has_history: !self.history.is_empty(),
        };
        let html = truncate_chars(self.transformer.transform(content, &ctx), MAX_POPUP_CHARS);
        if self.session.settings().with(|s| s.debug) {
            tracing::info!("{}", html);
        }
        html
    }

    /// Follow a link clicked inside the popup.
    pub fn navigate(&mut self, url: &str, display: &dyn Display) -> Navigation {
        if url.starts_with("http") {
            display.open_browser(url);
            return Navigation::Browser;
        }

        let saved = (self.current.clone(), self.history.clone());
        let (symbol, language) = if let Some(language) = url.strip_prefix(CHANGE_LANGUAGE_PREFIX) {
            (self.current.clone(), language.to_string())
        } else if url == BACK_LINK {
            let Some(previous) = self.history.pop() else {
                return Navigation::NoHistory;
            };
            self.current = previous.clone();
            (previous, self.language.clone())
        } else {
            let target = url.strip_suffix(PAGE_SUFFIX).unwrap_or(url).to_string();
            let previous = std::mem::replace(&mut self.current, target.clone());
            self.history.push(previous);
            (target, self.language.clone())
        };

        let notice = match self.session.resolve(&symbol, Some(&language)) {
            Resolution::Found {
                key,
                language,
                content,
            } => {
                self.current = key.clone();
                self.language = language.clone();
                let html = self.render(&content);
                display.update_popup(&html);
                return Navigation::Updated { key, language };
            }
            Resolution::NotFound => Notice::NotFound { symbol },
            Resolution::PackUnavailable { language, fallback } => Notice::PackUnavailable { language, fallback },
            Resolution::Broken { key, message } => Notice::Broken { key, message },
        };
        (self.current, self.history) = saved;
        display.notify(&notice);
        Navigation::Unresolved
    }

    /// The popup was closed.
    pub fn hide(&mut self) {
        self.history.clear();
        self.current.clear();
    }
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        text.truncate(cut);
    }
    text
}
