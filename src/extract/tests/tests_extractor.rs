#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::base::{ArchiveKind, LanguagePack};
use crate::entities::EntityTable;
use crate::error::DocError;
use crate::extract::{ExtractRequest, Extractor, ManualExtractor};
use crate::index::ArchivePool;
use crate::test_support::{array_push_xml, chunked_page, write_tarball};
use tempfile::TempDir;

#[test]
fn test_extracts_tarball_entry_with_substitutions() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("php_manual_en.tar.gz");
    let page = chunked_page("function.strlen", "<p>strlen &mdash; length of &quot;s&quot;</p>");
    write_tarball(&archive, &[("php-chunked-xhtml/function.strlen.html", &page)], true);

    let pack = LanguagePack::new("en", ArchiveKind::Tarball, &archive);
    let mut pool = ArchivePool::new();
    let request = ExtractRequest {
        pack: &pack,
        key: "function.strlen",
        locator: "php-chunked-xhtml/function.strlen.html",
        entities: None,
    };
    let html = ManualExtractor.extract(&request, &mut pool).unwrap();

    assert_eq!(
        html,
        r#"<div id="function.strlen" class="refentry"><p>strlen -- length of 's'</p></div><hr />"#
    );
    assert!(pool.is_open(&archive));
}

#[test]
fn test_extracts_tree_entry() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("tree");
    let dir = root.join("reference/array/functions");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("array-push.xml"), array_push_xml()).unwrap();

    let pack = LanguagePack::new("en", ArchiveKind::VcsTree, &root);
    let table = EntityTable::new();
    let request = ExtractRequest {
        pack: &pack,
        key: "array-push",
        locator: "reference/array/functions/array-push.xml",
        entities: Some(&table),
    };
    let html = ManualExtractor.extract(&request, &mut ArchivePool::new()).unwrap();
    assert!(html.contains("int array_push( array &amp;$array, mixed ...$values )"));
}

#[test]
fn test_missing_member_is_an_error() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("manual.tar");
    write_tarball(&archive, &[("php-chunked-xhtml/a.html", "a")], false);

    let pack = LanguagePack::new("en", ArchiveKind::Tarball, &archive);
    let request = ExtractRequest {
        pack: &pack,
        key: "b",
        locator: "php-chunked-xhtml/b.html",
        entities: None,
    };
    let err = ManualExtractor.extract(&request, &mut ArchivePool::new()).unwrap_err();
    assert!(matches!(err, DocError::MissingMember(_)));
}
