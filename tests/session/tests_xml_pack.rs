//! XML checkout packs: DocBook rendering, localized titles, malformed pages.

#![allow(clippy::unwrap_used)]

use docphp::{ArchiveKind, Resolution};
use tempfile::TempDir;

use crate::helpers::packs::{
    ARRAY_PUSH_XML, BROKEN_XML, STR_PAD_XML, session, title_entities, write_tree_pack,
};

fn english_checkout(temp: &TempDir) -> docphp::DocSession {
    let session = session(temp.path(), &[("en", ArchiveKind::VcsTree)], None);
    let entities = title_entities("Description", "Parameters", "Return Values");
    write_tree_pack(
        session.paths(),
        "en",
        &[
            ("language-snippets.ent", entities.as_str()),
            ("reference/array/functions/array-push.xml", ARRAY_PUSH_XML),
            ("reference/strings/functions/str-pad.xml", STR_PAD_XML),
            ("reference/strings/functions/broken-fn.xml", BROKEN_XML),
        ],
    );
    session
}

#[test]
fn test_signature_lists_parameters_in_order() {
    let temp = TempDir::new().unwrap();
    let session = english_checkout(&temp);

    let resolution = session.resolve("array_push", None);
    let Resolution::Found { key, language, content } = &resolution else {
        panic!("expected array_push to resolve, got {resolution:?}");
    };
    assert_eq!(key, "array-push");
    assert_eq!(language, "en");
    assert!(content.starts_with(
        r#"<div id="array-push" class="refentry" data-page="function.array-push"><h1 class="refname">array_push</h1>"#
    ));
    assert!(content.contains(
        r#"<div class="methodsynopsis">int array_push( array &amp;$array, mixed ...$values )</div>"#
    ));

    let array = content.find("<dt>array</dt>").unwrap();
    let values = content.find("<dt>values</dt>").unwrap();
    assert!(array < values);
    assert!(content.contains(r#"<h3 class="title">Return Values</h3>"#));
}

#[test]
fn test_optional_parameters_are_bracketed() {
    let temp = TempDir::new().unwrap();
    let session = english_checkout(&temp);

    let content = session.resolve("STR_PAD", None);
    assert!(
        content
            .content()
            .unwrap()
            .contains("string str_pad( string $string, int $length, [ int $pad_type = STR_PAD_RIGHT ] )")
    );
}

#[test]
fn test_malformed_page_is_isolated() {
    let temp = TempDir::new().unwrap();
    let session = english_checkout(&temp);

    let broken = session.resolve("broken_fn", None);
    assert!(matches!(broken, Resolution::Broken { ref key, .. } if key == "broken-fn"));

    assert!(session.resolve("array_push", None).is_found());
    assert!(session.resolve("str_pad", None).is_found());
    // Failures are not cached; the next lookup tries again.
    assert!(matches!(session.resolve("broken_fn", None), Resolution::Broken { .. }));
}

#[test]
fn test_translated_section_titles() {
    let temp = TempDir::new().unwrap();
    let session = session(temp.path(), &[("fr", ArchiveKind::VcsTree)], None);
    let entities = title_entities("Description", "Liste de paramètres", "Valeurs de retour");
    write_tree_pack(
        session.paths(),
        "fr",
        &[
            ("language-snippets.ent", entities.as_str()),
            ("reference/array/functions/array-push.xml", ARRAY_PUSH_XML),
        ],
    );

    let content = session.resolve("array_push", None);
    let content = content.content().unwrap();
    assert!(content.contains(r#"<h3 class="title">Liste de paramètres</h3>"#));
    assert!(content.contains(r#"<h3 class="title">Valeurs de retour</h3>"#));
}

#[test]
fn test_index_and_entities_are_persisted() {
    let temp = TempDir::new().unwrap();
    let session = english_checkout(&temp);

    assert!(session.resolve("array_push", None).is_found());
    assert!(session.paths().symbol_cache("en").exists());
    assert!(session.paths().entity_cache("en").exists());
}

#[test]
fn test_popup_links_to_published_page_name() {
    let temp = TempDir::new().unwrap();
    let commands = docphp::Commands::new(std::sync::Arc::new(english_checkout(&temp)));
    let display = crate::helpers::display::Recorder::default();

    commands.show_definition(&crate::helpers::display::Caret("array_push"), &display, None, false);

    let html = display.last_popup();
    assert!(html.contains(r#"<a href="http://php.net/manual/en/function.array-push.php">online</a>"#));
    assert!(!html.contains("data-page"));
}
