//! Commands and popup navigation over a real pack.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use docphp::host::{Navigation, Shown};
use docphp::{ArchiveKind, Commands};
use tempfile::TempDir;

use crate::helpers::display::{Caret, Recorder};
use crate::helpers::packs::{session, write_tarball_pack};

fn commands(temp: &TempDir) -> Commands {
    let session = session(temp.path(), &[("en", ArchiveKind::Tarball), ("fr", ArchiveKind::Tarball)], None);
    write_tarball_pack(
        session.paths(),
        "en",
        &[
            (
                "function.array-push",
                r#"<h1 class="refname">array_push</h1><p class="verinfo">(PHP 4, PHP 5, PHP 7, PHP 8)</p>
<div class="methodsynopsis dc-description"><span class="type">int</span> <span class="methodname"><strong>array_push</strong></span></div>
<p class="para">See also <a href="function.array-pop.html" class="function">array_pop()</a>.</p>
<blockquote class="note"><p><strong class="note">Note</strong>: use <code>$array[] =</code> instead.</p></blockquote>"#,
            ),
            ("function.array-pop", "<h1>array_pop</h1><p>Pop the element off the end</p>"),
        ],
    );
    write_tarball_pack(session.paths(), "fr", &[("function.array-push", "<h1>array_push</h1><p>Empile</p>")]);
    Commands::new(Arc::new(session))
}

#[test]
fn test_popup_round_trip() {
    let temp = TempDir::new().unwrap();
    let commands = commands(&temp);
    let display = Recorder::default();

    let Shown::Popup(mut popup) = commands.show_definition(&Caret("array_push"), &display, None, false) else {
        panic!("expected a popup");
    };
    let html = display.last_popup();
    assert!(html.starts_with("<style>"));
    assert!(html.contains(r#"<div id="outer"><div id="container">"#));
    assert!(html.contains(r#"<div class="frame" style="border-color: #8892bf">"#));
    assert!(html.contains(r#"<a href="http://php.net/manual/en/function.array-push.php">online</a>"#));
    assert!(html.contains(r#"<a href="changeto.fr">fr</a>"#));
    assert!(!html.contains("manualnavbar"));
    assert!(!html.contains("<hr"));

    assert_eq!(
        popup.navigate("function.array-pop.html", &display),
        Navigation::Updated {
            key: "function.array-pop".to_string(),
            language: "en".to_string()
        }
    );
    assert!(display.last_popup().contains("Pop the element off the end"));

    assert!(matches!(popup.navigate("history.back", &display), Navigation::Updated { .. }));
    assert_eq!(popup.current(), "function.array-push");

    assert!(matches!(popup.navigate("changeto.fr", &display), Navigation::Updated { ref language, .. } if language == "fr"));
    assert!(display.last_popup().contains("Empile"));

    assert_eq!(popup.navigate("https://www.php.net/", &display), Navigation::Browser);
    assert_eq!(display.browser.lock().as_slice(), ["https://www.php.net/"]);
}

#[test]
fn test_search_lists_editor_identifiers() {
    let temp = TempDir::new().unwrap();
    let commands = commands(&temp);

    assert_eq!(commands.search_symbols(), ["function.array_pop", "function.array_push"]);
}
