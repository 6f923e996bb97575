//! Symbol text handling: cursor word extraction and key normalization.

/// Check if a character can be part of a manual symbol at the cursor.
///
/// Uses Unicode Standard Annex #31 continue rules, which include `_`.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Find the boundaries of a word at the given character index.
///
/// Returns `Some((start, end))` with `end` exclusive, or `None` when the
/// character at `position` is not a word character.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() || !is_word_character(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// Extract the identifier under the cursor in a line of text.
///
/// A cursor sitting just past the end of a word (the usual caret position
/// after typing) still selects that word.
///
/// # Example
/// ```
/// use docphp::base::extract_word_at_cursor;
///
/// let line = "$n = array_push($stack, 1);";
/// assert_eq!(extract_word_at_cursor(line, 8), Some("array_push".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 15), Some("array_push".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 3), None);
/// ```
pub fn extract_word_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();

    let (start, end) = find_word_boundaries(&chars, position).or_else(|| {
        position
            .checked_sub(1)
            .and_then(|prev| find_word_boundaries(&chars, prev))
    })?;

    Some(chars[start..end].iter().collect())
}

/// Normalize a requested symbol into index-key form.
///
/// Editors select `array_push`; archive keys are `array-push`.
///
/// ```
/// use docphp::base::normalize_symbol;
///
/// assert_eq!(normalize_symbol("Array_Push"), "array-push");
/// assert_eq!(normalize_symbol("function.array-push"), "function.array-push");
/// ```
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_lowercase().replace('_', "-")
}
