//! Editor boundary: the capabilities the core needs from a host, and the
//! user-facing commands built on top of [`DocSession`](crate::session::DocSession).
//!
//! Hosts implement [`CursorContext`] and [`Display`]; everything else here is
//! host-independent and tested with recording fakes.

mod commands;
mod debounce;
mod navigation;

pub use commands::{Commands, HostError, Shown};
pub use debounce::{Debounce, DebounceAction};
pub use navigation::{Navigation, PopupSession};

/// Identifier under the caret plus alternate candidates (e.g. the
/// qualified and unqualified forms of a method call).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolAtCursor {
    pub word: String,
    pub alternates: Vec<String>,
}

/// What the host can tell about the caret position.
pub trait CursorContext {
    fn symbol_at_cursor(&self) -> Option<SymbolAtCursor>;

    /// Whether the caret is inside PHP source.
    fn in_source_scope(&self) -> bool;
}

/// User-visible notices, rendered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NotFound { symbol: String },
    PackUnavailable { language: String, fallback: bool },
    Broken { key: String, message: String },
    Busy { language: String },
    CheckedOut { language: String },
    AcquireFailed { language: String, message: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NotFound { .. } => "not found".to_string(),
            Notice::PackUnavailable { language, fallback } => {
                let begin = if *fallback { "The fallback" } else { "The" };
                format!(
                    "{begin} language \"{language}\" has not yet installed.\n\
                     You can use\n\n   DocPHP: checkout language\n\ncommand to checkout a language pack."
                )
            }
            Notice::Broken { key, message } => {
                format!("The documentation for \"{key}\" could not be read: {message}")
            }
            Notice::Busy { language } => {
                format!("Another progress is working for checkout {language}. Please try again later.")
            }
            Notice::CheckedOut { language } => format!("Language {language} is checked out"),
            Notice::AcquireFailed { language, .. } => {
                format!("Language {language} checkout failed. Please try again.")
            }
        }
    }
}

/// Output surfaces provided by the host.
pub trait Display {
    fn show_popup(&self, html: &str, max_width: u32, max_height: u32);
    fn update_popup(&self, html: &str);
    fn append_panel(&self, text: &str);
    fn notify(&self, notice: &Notice);
    fn open_browser(&self, url: &str);
}

/// Identifier at `column` of `line`, for hosts without their own word selection.
pub fn word_at_cursor(line: &str, column: usize) -> Option<String> {
    crate::base::extract_word_at_cursor(line, column)
}
