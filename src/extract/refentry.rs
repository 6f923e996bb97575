//! Rendering DocBook reference entries into HTML fragments.

use quick_xml::escape::escape;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

use super::xml_tree::{self, XmlElement, XmlNode};
use crate::base::constants::PAGE_ATTRIBUTE;
use crate::entities::EntityTable;
use crate::error::DocError;

static PRESENTATION_ATTRS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+(?:xmlns(?::[\w.\-]+)?|xlink:href|linkend)\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("presentation attribute pattern is valid")
});

const SYNOPSIS_ELEMENTS: [&str; 3] = ["methodsynopsis", "constructorsynopsis", "destructorsynopsis"];
const PARAGRAPH_ELEMENTS: [&str; 2] = ["para", "simpara"];

/// Render the DocBook page for `key` as an HTML fragment.
pub(crate) fn render(xml: &str, key: &str, entities: Option<&EntityTable>) -> Result<String, DocError> {
    let cleaned = PRESENTATION_ATTRS.replace_all(xml, "");
    let expanded = match entities {
        Some(table) => table.expand(&cleaned),
        None => EntityTable::new().expand(&cleaned),
    };
    let root = xml_tree::parse(&expanded).map_err(|message| DocError::malformed(key, message))?;

    let mut out = String::new();
    let _ = write!(out, r#"<div id="{}" class="refentry""#, escape(key));
    // `xml:id` is the chunked page name, e.g. `function.array-push`.
    if let Some(page) = root.attr("id").filter(|id| !id.is_empty()) {
        let _ = write!(out, r#" {PAGE_ATTRIBUTE}="{}""#, escape(page));
    }
    out.push('>');
    render_heading(&root, key, &mut out);

    let sections = root.find_all(&["refsect1"]);
    let description = section_with_role(&sections, "description").or_else(|| sections.first().copied());
    if let Some(description) = description {
        render_description(description, &mut out);
    }
    if let Some(parameters) = section_with_role(&sections, "parameters") {
        render_parameters(parameters, &mut out);
    }
    if let Some(returns) = section_with_role(&sections, "returnvalues") {
        render_section_title(returns, "Return Values", &mut out);
        render_paragraphs(returns, &mut out);
    }

    out.push_str("</div>");
    Ok(out)
}

fn section_with_role<'a>(sections: &[&'a XmlElement], role: &str) -> Option<&'a XmlElement> {
    sections.iter().copied().find(|s| s.attr("role") == Some(role))
}

fn render_heading(root: &XmlElement, key: &str, out: &mut String) {
    let names = root.find("refnamediv");
    let title = names
        .and_then(|n| n.find("refname"))
        .map(|e| collapse(&e.text()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| key.to_string());
    let _ = write!(out, r#"<h1 class="refname">{}</h1>"#, escape(&title));

    if let Some(purpose) = names.and_then(|n| n.find("refpurpose")) {
        let _ = write!(out, r#"<p class="refpurpose">{}</p>"#, escape(&collapse(&purpose.text())));
    }
}

fn render_description(section: &XmlElement, out: &mut String) {
    let synopsis = section
        .elements()
        .find(|e| SYNOPSIS_ELEMENTS.contains(&e.name.as_str()))
        .or_else(|| section.find_any(&SYNOPSIS_ELEMENTS));
    if let Some(synopsis) = synopsis {
        let _ = write!(
            out,
            r#"<div class="methodsynopsis">{}</div>"#,
            escape(&signature_line(synopsis))
        );
    }
    render_paragraphs(section, out);
}

fn render_parameters(section: &XmlElement, out: &mut String) {
    render_section_title(section, "Parameters", out);
    out.push_str(r#"<dl class="parameters">"#);
    for entry in section.find_all(&["varlistentry"]) {
        let term = entry.find("term").map(|t| collapse(&t.text())).unwrap_or_default();
        let _ = write!(out, "<dt>{}</dt><dd>", escape(&term));
        if let Some(item) = entry.find("listitem") {
            render_paragraphs(item, out);
        }
        out.push_str("</dd>");
    }
    out.push_str("</dl>");
}

fn render_section_title(section: &XmlElement, default: &str, out: &mut String) {
    let title = section
        .child("title")
        .map(|t| collapse(&t.text()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default.to_string());
    let _ = write!(out, r#"<h3 class="title">{}</h3>"#, escape(&title));
}

fn render_paragraphs(scope: &XmlElement, out: &mut String) {
    for para in scope.find_all(&PARAGRAPH_ELEMENTS) {
        let lines = paragraph_lines(para);
        if lines.is_empty() {
            continue;
        }
        let escaped: Vec<_> = lines.iter().map(|l| escape(l.as_str())).collect();
        let _ = write!(out, r#"<p class="para">{}</p>"#, escaped.join("<br>"));
    }
}

/// Paragraph text with tags stripped. Each `row` ends a line.
fn paragraph_lines(para: &XmlElement) -> Vec<String> {
    let mut raw = String::new();
    flatten(para, &mut raw);
    raw.split('\n').map(collapse).filter(|line| !line.is_empty()).collect()
}

fn flatten(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(text) => out.push_str(&text.replace('\n', " ")),
            XmlNode::Element(child) if child.is("row") => {
                out.push('\n');
                for entry in child.elements() {
                    flatten(entry, out);
                    out.push(' ');
                }
                out.push('\n');
            }
            XmlNode::Element(child) => flatten(child, out),
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `RET NAME( T1 $p1, [ T2 $p2 ] )`.
pub(crate) fn signature_line(synopsis: &XmlElement) -> String {
    let mut line = String::new();
    for modifier in synopsis.elements().filter(|e| e.is("modifier")) {
        line.push_str(&collapse(&modifier.text()));
        line.push(' ');
    }
    if let Some(ret) = synopsis.child("type") {
        line.push_str(&type_text(ret));
        line.push(' ');
    }
    let name = synopsis.child("methodname").map(|m| collapse(&m.text())).unwrap_or_default();
    line.push_str(&name);
    line.push('(');

    let params: Vec<String> = synopsis
        .elements()
        .filter(|e| e.is("methodparam"))
        .map(parameter_text)
        .collect();
    if !params.is_empty() {
        let spaced: Vec<String> = params.iter().map(|p| format!(" {p}")).collect();
        line.push_str(&spaced.join(","));
        line.push(' ');
    }
    line.push(')');
    line
}

fn parameter_text(param: &XmlElement) -> String {
    let ty = param.child("type").map(type_text).unwrap_or_default();
    let mut text = String::new();
    if !ty.is_empty() {
        text.push_str(&ty);
        text.push(' ');
    }
    if let Some(name) = param.child("parameter") {
        if name.attr("role") == Some("reference") {
            text.push('&');
        }
        if param.attr("rep") == Some("repeat") {
            text.push_str("...");
        }
        text.push('$');
        text.push_str(&collapse(&name.text()));
    }
    if let Some(initializer) = param.child("initializer") {
        text.push_str(" = ");
        text.push_str(&collapse(&initializer.text()));
    }
    if param.attr("choice") == Some("opt") {
        format!("[ {text} ]")
    } else {
        text
    }
}

/// Union and intersection types are nested `type` elements.
fn type_text(ty: &XmlElement) -> String {
    let members: Vec<String> = ty.elements().filter(|e| e.is("type")).map(type_text).collect();
    if members.is_empty() {
        return collapse(&ty.text());
    }
    let separator = if ty.attr("class") == Some("intersection") { "&" } else { "|" };
    members.join(separator)
}
