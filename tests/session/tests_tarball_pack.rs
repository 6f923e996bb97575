//! Published tarball packs: prefixes, fallback, installation state.

#![allow(clippy::unwrap_used)]

use docphp::{ArchiveKind, Resolution};
use tempfile::TempDir;

use crate::helpers::packs::{session, write_tarball_pack};

#[test]
fn test_prefixes_disambiguate_in_order() {
    let temp = TempDir::new().unwrap();
    let session = session(temp.path(), &[("en", ArchiveKind::Tarball)], None);
    write_tarball_pack(
        session.paths(),
        "en",
        &[
            ("class.pdo", "<h1>The PDO class</h1>"),
            ("book.pdo", "<h1>PHP Data Objects</h1>"),
            ("function.count", "<h1>count</h1>"),
            ("count", "<h1>unprefixed</h1>"),
        ],
    );

    let pdo = session.resolve("PDO", None);
    assert!(matches!(pdo, Resolution::Found { ref key, .. } if key == "book.pdo"));

    let count = session.resolve("count", None);
    assert!(matches!(count, Resolution::Found { ref key, .. } if key == "function.count"));

    let exact = session.resolve("class.pdo", None);
    assert!(matches!(exact, Resolution::Found { ref key, .. } if key == "class.pdo"));
}

#[test]
fn test_entry_is_sliced_and_cleaned() {
    let temp = TempDir::new().unwrap();
    let session = session(temp.path(), &[("en", ArchiveKind::Tarball)], None);
    write_tarball_pack(
        session.paths(),
        "en",
        &[("function.strlen", "<p>strlen &mdash; Get string length &raquo; &eacute;</p>")],
    );

    let resolution = session.resolve("strlen", None);
    assert_eq!(
        resolution.content().unwrap(),
        "<div id=\"function.strlen\" class=\"refentry\"><p>strlen -- Get string length >> \u{00E9}</p></div><hr />\n"
    );
}

#[test]
fn test_fallback_pack_answers_missing_symbols() {
    let temp = TempDir::new().unwrap();
    let session = session(
        temp.path(),
        &[("de", ArchiveKind::Tarball), ("en", ArchiveKind::Tarball)],
        Some("en"),
    );
    write_tarball_pack(session.paths(), "de", &[("function.strlen", "<p>Länge</p>")]);
    write_tarball_pack(
        session.paths(),
        "en",
        &[("function.strlen", "<p>length</p>"), ("function.str-contains", "<p>contains</p>")],
    );

    let local = session.resolve("strlen", None);
    assert!(matches!(local, Resolution::Found { ref language, .. } if language == "de"));

    // The fallback lookup is bare; prefixes only apply to the primary pack.
    assert_eq!(session.resolve("str_contains", None), Resolution::NotFound);
    let fallback = session.resolve("function.str_contains", None);
    assert!(matches!(fallback, Resolution::Found { ref language, .. } if language == "en"));
}

#[test]
fn test_missing_archive_reports_unavailable_pack() {
    let temp = TempDir::new().unwrap();
    let session = session(temp.path(), &[("ja", ArchiveKind::Tarball)], Some("en"));

    assert_eq!(
        session.resolve("strlen", None),
        Resolution::PackUnavailable {
            language: "ja".to_string(),
            fallback: false
        }
    );
    assert!(!session.is_locatable("ja", "strlen"));
}
