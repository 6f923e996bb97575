#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::markup::to_panel_text;
use rstest::rstest;

#[test]
fn test_blocks_become_lines() {
    let html = "<div class=\"refentry\">\n  <h1>strlen</h1><p>Get   string\n length</p><p>Second</p></div>";
    assert_eq!(to_panel_text(html), "strlen\nGet string length\n\nSecond\n\n");
}

#[rstest]
#[case("a<br>b", "a\nb")]
#[case("a<br />b", "a\nb")]
#[case("<li>x</li><li>y</li>", "x\ny\n")]
#[case("<span>inline</span> text", "inline text")]
fn test_line_breaking_tags(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(to_panel_text(html), expected);
}

#[test]
fn test_decodes_html_entities() {
    assert_eq!(to_panel_text("<p>a &lt; b &amp;&amp; c&nbsp;d</p>"), "a < b && c\u{00A0}d\n");
}

#[test]
fn test_collapses_blank_lines() {
    let text = to_panel_text("<p>one</p> <div> </div> <p>two</p>");
    assert!(!text.contains("\n\n\n"));
    assert!(text.starts_with("one"));
}
