#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::base::{extract_word_at_cursor, find_word_boundaries, is_word_character, normalize_symbol};
use rstest::rstest;

#[test]
fn test_is_word_character() {
    assert!(is_word_character('a'));
    assert!(is_word_character('Z'));
    assert!(is_word_character('0'));
    assert!(is_word_character('_'));
    assert!(!is_word_character(' '));
    assert!(!is_word_character('$'));
    assert!(!is_word_character('('));
}

#[test]
fn test_find_word_boundaries() {
    let chars: Vec<char> = "foo bar_baz".chars().collect();

    assert_eq!(find_word_boundaries(&chars, 0), Some((0, 3)));
    assert_eq!(find_word_boundaries(&chars, 2), Some((0, 3)));
    assert_eq!(find_word_boundaries(&chars, 3), None);
    assert_eq!(find_word_boundaries(&chars, 7), Some((4, 11)));
    assert_eq!(find_word_boundaries(&chars, 11), None);
}

#[test]
fn test_extract_word_skips_php_sigils() {
    let line = "$value = strlen($value);";
    assert_eq!(extract_word_at_cursor(line, 1), Some("value".to_string()));
    assert_eq!(extract_word_at_cursor(line, 9), Some("strlen".to_string()));
    assert_eq!(extract_word_at_cursor(line, 0), None);
}

#[test]
fn test_extract_word_caret_after_word() {
    // Caret right after "count" with nothing selected.
    assert_eq!(extract_word_at_cursor("count", 5), Some("count".to_string()));
}

#[test]
fn test_extract_word_empty_line() {
    assert_eq!(extract_word_at_cursor("", 0), None);
    assert_eq!(extract_word_at_cursor("abc", 100), None);
}

#[rstest]
#[case("array_push", "array-push")]
#[case("array-push", "array-push")]
#[case("ArrayObject", "arrayobject")]
#[case("  str_contains ", "str-contains")]
#[case("function.str-contains", "function.str-contains")]
fn test_normalize_symbol(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_symbol(input), expected);
}
