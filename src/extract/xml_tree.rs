//! Minimal element tree built from quick-xml events.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct XmlElement {
    /// Local name, namespace prefix dropped.
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(name))
    }

    /// First descendant (depth-first, document order) whose name is in `names`.
    pub fn find_any(&self, names: &[&str]) -> Option<&XmlElement> {
        for element in self.elements() {
            if names.contains(&element.name.as_str()) {
                return Some(element);
            }
            if let Some(found) = element.find_any(names) {
                return Some(found);
            }
        }
        None
    }

    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.find_any(&[name])
    }

    /// Outermost descendants whose name is in `names`; matches are not searched further.
    pub fn find_all<'a>(&'a self, names: &[&str]) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_into(names, &mut found);
        found
    }

    fn collect_into<'a>(&'a self, names: &[&str], found: &mut Vec<&'a XmlElement>) {
        for element in self.elements() {
            if names.contains(&element.name.as_str()) {
                found.push(element);
            } else {
                element.collect_into(names, found);
            }
        }
    }

    /// All descendant text, concatenated.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(e) => e.push_text(out),
            }
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute on <{name}>: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad attribute value on <{name}>: {e}"))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(XmlElement {
        name,
        attrs,
        children: Vec::new(),
    })
}

/// Parse a document and return its root element.
///
/// Mismatched or unclosed tags, unknown entities and a missing root are errors.
pub(crate) fn parse(xml: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    // Synthetic document node at the bottom of the stack.
    let mut stack = vec![XmlElement::default()];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("XML parse error at position {}: {e}", reader.error_position()))?;
        match event {
            Event::Start(ref e) => stack.push(element_from(e)?),
            Event::Empty(ref e) => {
                let element = element_from(e)?;
                push_child(&mut stack, XmlNode::Element(element));
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err("closing tag without an open element".to_string());
                }
                if let Some(element) = stack.pop() {
                    push_child(&mut stack, XmlNode::Element(element));
                }
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("bad text at position {}: {err}", reader.buffer_position()))?;
                if !text.is_empty() {
                    push_child(&mut stack, XmlNode::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_child(&mut stack, XmlNode::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
        return Err(format!("unexpected end of document inside <{open}>"));
    }
    let document = stack.pop().unwrap_or_default();
    document
        .children
        .into_iter()
        .find_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
        .ok_or_else(|| "document has no root element".to_string())
}

fn push_child(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}
