//! Recording host fakes.

use parking_lot::Mutex;

use docphp::host::SymbolAtCursor;
use docphp::{CursorContext, Display, Notice};

/// Caret on `word`, inside PHP source.
pub struct Caret(pub &'static str);

impl CursorContext for Caret {
    fn symbol_at_cursor(&self) -> Option<SymbolAtCursor> {
        Some(SymbolAtCursor {
            word: self.0.to_string(),
            alternates: Vec::new(),
        })
    }

    fn in_source_scope(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct Recorder {
    pub popups: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<Notice>>,
    pub browser: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn last_popup(&self) -> String {
        self.popups.lock().last().cloned().unwrap_or_default()
    }
}

impl Display for Recorder {
    fn show_popup(&self, html: &str, _max_width: u32, _max_height: u32) {
        self.popups.lock().push(html.to_string());
    }

    fn update_popup(&self, html: &str) {
        self.popups.lock().push(html.to_string());
    }

    fn append_panel(&self, _text: &str) {}

    fn notify(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }

    fn open_browser(&self, url: &str) {
        self.browser.lock().push(url.to_string());
    }
}
