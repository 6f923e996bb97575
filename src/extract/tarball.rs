//! Chunked HTML pages from manual tarballs.

use regex::Regex;
use std::borrow::Cow;

/// Cut the entry for `key` out of a full page.
///
/// Keeps everything from the `<div>` whose id is `key` up to, not
/// including, the bottom `manualnavbar` div. Pages that do not have that
/// shape are returned whole.
pub fn slice_entry<'a>(page: &'a str, key: &str) -> Cow<'a, str> {
    let pattern = format!(
        r#"(?s)(<div[^<>]+?id="{}".*?)<div[^<>]+?class="manualnavbar"#,
        regex::escape(key)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Cow::Borrowed(page);
    };
    match re.captures(page).and_then(|caps| caps.get(1)) {
        Some(fragment) => Cow::Borrowed(fragment.as_str()),
        None => Cow::Borrowed(page),
    }
}

/// Apply literal fix-ups in one left-to-right pass.
///
/// At each position the first table entry that matches wins, and replaced
/// text is never scanned again, so `&$` → `&amp;$` cannot cascade.
pub fn substitute(text: &str, table: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        match table.iter().find(|(from, _)| rest.starts_with(from)) {
            Some((from, to)) => {
                out.push_str(to);
                rest = &rest[from.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}
