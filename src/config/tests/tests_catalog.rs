use crate::config::{catalog, language_choices, lookup_language};

#[test]
fn test_catalog_is_sorted() {
    let codes: Vec<_> = catalog().iter().map(|info| info.code).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);
}

#[test]
fn test_label_format() {
    let de = lookup_language("de").expect("german is published");
    assert_eq!(de.label(), "de German (Deutsch)");
}

#[test]
fn test_choices_from_catalog_select_index() {
    let choices = language_choices(None, Some("en"));
    assert_eq!(choices.codes.len(), catalog().len());
    assert_eq!(choices.selected, Some(1));
    assert_eq!(choices.labels[1], "en English (English)");
}

#[test]
fn test_choices_for_installed_codes() {
    let installed = vec!["fr".to_string(), "xx".to_string()];
    let choices = language_choices(Some(&installed), None);
    assert_eq!(choices.codes, installed);
    assert_eq!(choices.labels[1], "xx");
    assert_eq!(choices.selected, None);
}
