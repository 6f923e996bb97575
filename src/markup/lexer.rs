//! Logos-based tag-stream lexer for manual HTML.
//!
//! Produces start/end/text/entity events; comments, doctypes and
//! processing instructions are reported as [`HtmlEvent::Skipped`].

use logos::Logos;

/// One event in the tag stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent<'a> {
    Start(StartTag),
    End { name: String },
    Text(&'a str),
    /// `&name;` or `&#123;`, passed through untouched.
    Entity(&'a str),
    /// A `<` or `&` that does not begin markup.
    Stray(char),
    Skipped(&'a str),
}

/// A parsed start tag. Names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[token("<!--", comment_end)]
    Comment,

    #[regex(r"<![a-zA-Z\[][^>]*>")]
    Declaration,

    #[regex(r"<\?[^>]*>")]
    ProcessingInstruction,

    #[regex(r"</[a-zA-Z][^<>]*>")]
    EndTag,

    #[regex(r"<[a-zA-Z][^<>]*>")]
    StartTag,

    #[regex(r"&#?[a-zA-Z0-9]+;")]
    Entity,

    #[regex(r"[^<&]+")]
    Text,

    #[token("<")]
    LessThan,

    #[token("&")]
    Ampersand,
}

/// Consume up to and including `-->`, or the rest of the input if unterminated.
fn comment_end(lex: &mut logos::Lexer<'_, RawToken>) -> bool {
    let rest = lex.remainder();
    let len = rest.find("-->").map_or(rest.len(), |i| i + 3);
    lex.bump(len);
    true
}

/// Iterator of [`HtmlEvent`]s over an HTML string.
pub struct HtmlLexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
}

impl<'a> HtmlLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
        }
    }
}

impl<'a> Iterator for HtmlLexer<'a> {
    type Item = HtmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let text = self.inner.slice();
        let event = match token {
            Ok(RawToken::StartTag) => HtmlEvent::Start(parse_start_tag(text)),
            Ok(RawToken::EndTag) => HtmlEvent::End {
                name: tag_name(&text[2..]),
            },
            Ok(RawToken::Text) => HtmlEvent::Text(text),
            Ok(RawToken::Entity) => HtmlEvent::Entity(text),
            Ok(RawToken::LessThan) => HtmlEvent::Stray('<'),
            Ok(RawToken::Ampersand) => HtmlEvent::Stray('&'),
            Ok(RawToken::Comment | RawToken::Declaration | RawToken::ProcessingInstruction) | Err(()) => {
                HtmlEvent::Skipped(text)
            }
        };
        Some(event)
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<HtmlEvent<'_>> {
    HtmlLexer::new(input).collect()
}

fn tag_name(text: &str) -> String {
    text.chars()
        .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Parse `<name attr="v" flag attr2=bare />`.
fn parse_start_tag(raw: &str) -> StartTag {
    let inner = raw.trim_start_matches('<').trim_end_matches('>');
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };
    let name = tag_name(inner);
    let mut rest = &inner[name.len().min(inner.len())..];
    let mut attrs = Vec::new();

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }
        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let key = rest[..key_len].to_ascii_lowercase();
        rest = rest[key_len..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(quote).unwrap_or(body.len());
                    rest = body.get(end + 1..).unwrap_or("");
                    body[..end].to_string()
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    after_eq[..end].to_string()
                }
            }
        } else {
            String::new()
        };
        if !key.is_empty() {
            attrs.push((key, value));
        }
    }

    StartTag {
        name,
        attrs,
        self_closing,
    }
}
