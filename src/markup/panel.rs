//! Plain-text rendering for the output panel.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::{GenericTable, decode};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static LINE_BREAKING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(br\s*/?|/p|/div|/li|(div|p)\s[^<>]*|(div|p))>").expect("line break pattern is valid")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is valid"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n\s*\n\s+").expect("blank line pattern is valid"));

/// Convert an HTML fragment to readable plain text.
pub fn to_panel_text(html: &str) -> String {
    let text = WHITESPACE.replace_all(html, " ");
    let text = LINE_BREAKING_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    let text = text.trim_start();
    decode(text, GenericTable::Html).into_owned()
}
