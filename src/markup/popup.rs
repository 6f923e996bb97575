//! Rich popup rendering as a tag-stack state machine.

use std::fmt::Write as _;

use super::lexer::{HtmlEvent, HtmlLexer, StartTag};
use crate::base::constants::{ONLINE_URL_TEMPLATE, PAGE_ATTRIBUTE, fill_template};

const STYLESHEET: &str = include_str!("popup.css");

/// Block tags rendered as `<div class="NAME">`.
const GENERIC_CONTAINERS: [&str; 11] = [
    "blockquote", "tr", "li", "ul", "ol", "dl", "dt", "dd", "table", "tbody", "thead",
];

/// Tags dropped while keeping their content.
const STRIPPED: [&str; 1] = ["td"];

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Deepest open-tag nesting kept; deeper start tags are dropped with their end tags.
pub(crate) const MAX_TAG_DEPTH: usize = 256;

/// Attributes that survive into the popup.
const KEPT_ATTRIBUTES: [&str; 3] = ["id", "class", "href"];

/// Border colors for framed containers, by class.
const FRAME_COLORS: [(&str, &str); 9] = [
    ("phpcode", "#4f5b93"),
    ("programlisting", "#4f5b93"),
    ("classsynopsis", "#8892bf"),
    ("methodsynopsis", "#8892bf"),
    ("note", "#e6c229"),
    ("informaltable", "#999999"),
    ("tip", "#4caf50"),
    ("warning", "#e57373"),
    ("caution", "#ffb74d"),
];

/// Per-render inputs.
#[derive(Clone, Copy, Debug)]
pub struct PopupContext<'a> {
    /// Canonical key of the entry; the element with this id is the content root.
    pub key: &'a str,
    /// Language the entry was resolved in.
    pub language: &'a str,
    /// Configured language packs, in settings order.
    pub languages: &'a [String],
    /// Whether a "back" link makes sense.
    pub has_history: bool,
}

/// Whether the transform should keep consuming events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The content root closed; the rest of the input is ignored.
    Truncate,
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    /// Markup emitted when this tag closes. Empty once discarded by a reset.
    closing: String,
    role: TagRole,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagRole {
    Plain,
    /// The `class="up"` element; its content is moved into the nav row.
    UpLink { capture_from: usize },
    /// The element whose id is the entry key.
    Root,
}

/// Rewrites a manual page into popup HTML.
///
/// The transformer is reusable: state is reset at the start and end of
/// every [`transform`](Self::transform) call.
#[derive(Debug, Default)]
pub struct PopupTransformer {
    stack: Vec<OpenTag>,
    out: String,
    nav_rendered: bool,
    up_link: Option<String>,
    /// Online page name taken from the content root.
    page: Option<String>,
    /// Start tags dropped past [`MAX_TAG_DEPTH`] whose end tags are still due.
    dropped: usize,
}

impl PopupTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no state is carried between calls.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
            && self.out.is_empty()
            && !self.nav_rendered
            && self.up_link.is_none()
            && self.page.is_none()
            && self.dropped == 0
    }

    pub fn transform(&mut self, html: &str, ctx: &PopupContext<'_>) -> String {
        self.reset();
        for event in HtmlLexer::new(html) {
            if self.feed(event, ctx) == Flow::Truncate {
                tracing::trace!("Popup for '{}' truncated after content root", ctx.key);
                break;
            }
        }
        let body = self.finish();
        self.reset();
        format!(r#"<style>{STYLESHEET}</style><div id="outer"><div id="container">{body}</div></div>"#)
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.out.clear();
        self.nav_rendered = false;
        self.up_link = None;
        self.page = None;
        self.dropped = 0;
    }

    /// Close whatever is still open and hand back the accumulated output.
    fn finish(&mut self) -> String {
        while let Some(tag) = self.stack.pop() {
            self.out.push_str(&tag.closing);
        }
        std::mem::take(&mut self.out)
    }

    fn feed(&mut self, event: HtmlEvent<'_>, ctx: &PopupContext<'_>) -> Flow {
        match event {
            HtmlEvent::Start(tag) => {
                self.open(&tag, ctx);
                Flow::Continue
            }
            HtmlEvent::End { name } => self.close(&name, ctx),
            HtmlEvent::Text(text) | HtmlEvent::Entity(text) => {
                self.out.push_str(text);
                Flow::Continue
            }
            HtmlEvent::Stray('<') => {
                self.out.push_str("&lt;");
                Flow::Continue
            }
            HtmlEvent::Stray(_) => {
                self.out.push_str("&amp;");
                Flow::Continue
            }
            HtmlEvent::Skipped(_) => Flow::Continue,
        }
    }

    /// Discard everything emitted so far, including closings of open tags.
    fn discard_preceding(&mut self) {
        self.out.clear();
        for tag in &mut self.stack {
            tag.closing.clear();
            if let TagRole::UpLink { .. } = tag.role {
                tag.role = TagRole::Plain;
            }
        }
    }

    fn open(&mut self, tag: &StartTag, ctx: &PopupContext<'_>) {
        let is_root = tag.attr("id") == Some(ctx.key);
        let is_up = tag.attr("class") == Some("up");
        if is_root || is_up {
            self.discard_preceding();
        }

        let void = tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str());
        if !void && self.stack.len() >= MAX_TAG_DEPTH {
            self.dropped += 1;
            return;
        }
        if is_root {
            self.page = tag.attr(PAGE_ATTRIBUTE).filter(|page| !page.is_empty()).map(str::to_string);
        }
        if is_up && !void {
            let capture_from = self.out.len();
            self.stack.push(OpenTag {
                name: tag.name.clone(),
                closing: String::new(),
                role: TagRole::UpLink { capture_from },
            });
            return;
        }

        let frame = frame_color(tag);
        if let Some(color) = frame {
            let _ = write!(self.out, r#"<div class="frame" style="border-color: {color}">"#);
        }

        let name = tag.name.as_str();
        let mut closing = String::new();
        if STRIPPED.contains(&name) {
            // Content only.
        } else if GENERIC_CONTAINERS.contains(&name) {
            self.out.push_str(r#"<div class=""#);
            self.out.push_str(name);
            self.out.push('"');
            if let Some(id) = tag.attr("id") {
                push_attribute(&mut self.out, "id", id);
            }
            self.out.push('>');
            closing.push_str("</div>");
        } else {
            self.out.push('<');
            self.out.push_str(name);
            for (key, value) in &tag.attrs {
                if KEPT_ATTRIBUTES.contains(&key.as_str()) {
                    push_attribute(&mut self.out, key, value);
                }
            }
            self.out.push('>');
            if !void {
                let _ = write!(closing, "</{name}>");
            }
        }
        if frame.is_some() {
            closing.push_str("</div>");
        }

        if void {
            self.out.push_str(&closing);
            return;
        }
        self.stack.push(OpenTag {
            name: tag.name.clone(),
            closing,
            role: if is_root { TagRole::Root } else { TagRole::Plain },
        });
    }

    fn close(&mut self, name: &str, ctx: &PopupContext<'_>) -> Flow {
        if VOID_ELEMENTS.contains(&name) {
            return Flow::Continue;
        }
        if self.dropped > 0 {
            self.dropped -= 1;
            return Flow::Continue;
        }
        // Unmatched closings unwind until a match or an empty stack.
        while let Some(tag) = self.stack.pop() {
            let matched = tag.name == name;
            if self.emit_close(tag, ctx) == Flow::Truncate {
                return Flow::Truncate;
            }
            if matched {
                break;
            }
        }
        Flow::Continue
    }

    fn emit_close(&mut self, tag: OpenTag, ctx: &PopupContext<'_>) -> Flow {
        match tag.role {
            TagRole::UpLink { capture_from } => {
                let captured = self.out.split_off(capture_from.min(self.out.len()));
                let captured = captured.trim();
                if !captured.is_empty() {
                    self.up_link = Some(captured.to_string());
                }
                Flow::Continue
            }
            TagRole::Root => {
                self.out.push_str(&tag.closing);
                Flow::Truncate
            }
            TagRole::Plain => {
                self.out.push_str(&tag.closing);
                if is_heading(&tag.name) && !self.nav_rendered {
                    self.render_nav(ctx);
                }
                Flow::Continue
            }
        }
    }

    fn render_nav(&mut self, ctx: &PopupContext<'_>) {
        self.nav_rendered = true;
        let out = &mut self.out;
        out.push_str(r#"<div class="horizontal-rule"></div><div class="controls">"#);
        if ctx.has_history {
            out.push_str(r#"<a href="history.back">back</a>&nbsp;&nbsp;&nbsp;&nbsp;"#);
        }
        let page = self.page.as_deref().unwrap_or(ctx.key);
        let online = fill_template(ONLINE_URL_TEMPLATE, ctx.language, page);
        let _ = write!(out, r#"<a href="{online}">online</a>"#);
        if let Some(up) = &self.up_link {
            let _ = write!(out, "&nbsp;&nbsp;&nbsp;&nbsp;{up}");
        }
        if ctx.languages.len() > 1 {
            out.push_str("&nbsp;&nbsp;&nbsp;&nbsp;Change language:");
            for language in ctx.languages {
                let _ = write!(out, r#" <a href="changeto.{language}">{language}</a>"#);
            }
        }
        out.push_str("</div>");
    }
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn frame_color(tag: &StartTag) -> Option<&'static str> {
    FRAME_COLORS
        .iter()
        .find(|(class, _)| tag.has_class(class))
        .map(|(_, color)| *color)
}

fn push_attribute(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, r#" {key}="{}""#, value.replace('"', "&quot;"));
}
