//! Fixture builders shared by unit tests.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::base::{ArchiveKind, CachePaths};
use crate::config::{Settings, SettingsStore};
use crate::session::DocSession;

/// Write a tar archive with the given `(member, content)` pairs.
pub(crate) fn write_tarball(path: &Path, members: &[(&str, &str)], gzip: bool) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    if gzip {
        let encoder = append_members(GzEncoder::new(file, Compression::default()), members);
        encoder.finish().unwrap();
    } else {
        append_members(file, members);
    }
}

fn append_members<W: Write>(writer: W, members: &[(&str, &str)]) -> W {
    let mut builder = tar::Builder::new(writer);
    for (name, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap()
}

/// A chunked manual page: top navbar, the entry, bottom navbar.
pub(crate) fn chunked_page(id: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{id}</title></head><body>
<div class="manualnavbar manualnavbar_top"><div class="up"><a href="ref.array.html">Array Functions</a></div></div><hr />
<div id="{id}" class="refentry">{body}</div><hr /><div class="manualnavbar manualnavbar_bottom"><a href="index.html">PHP Manual</a></div>
</body></html>"#
    )
}

/// DocBook source for `array_push`, using documentation entities for titles.
pub(crate) fn array_push_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<!-- $Revision$ -->
<refentry xml:id="function.array-push" xmlns="http://docbook.org/ns/docbook" xmlns:xlink="http://www.w3.org/1999/xlink">
 <refnamediv>
  <refname>array_push</refname>
  <refpurpose>Push one or more elements onto the end of array</refpurpose>
 </refnamediv>
 <refsect1 role="description">
  &reftitle.description;
  <methodsynopsis>
   <type>int</type><methodname>array_push</methodname>
   <methodparam><type>array</type><parameter role="reference">array</parameter></methodparam>
   <methodparam rep="repeat"><type>mixed</type><parameter>values</parameter></methodparam>
  </methodsynopsis>
  <para>
   <function>array_push</function> treats <parameter>array</parameter> as a stack,
   and pushes the passed variables onto the end of <parameter>array</parameter>.
  </para>
 </refsect1>
 <refsect1 role="parameters">
  &reftitle.parameters;
  <variablelist>
   <varlistentry>
    <term><parameter>array</parameter></term>
    <listitem><para>The input array.</para></listitem>
   </varlistentry>
   <varlistentry>
    <term><parameter>values</parameter></term>
    <listitem><para>The values to push onto the end of the <parameter>array</parameter>.</para></listitem>
   </varlistentry>
  </variablelist>
 </refsect1>
 <refsect1 role="returnvalues">
  &reftitle.returnvalues;
  <para>Returns the new number of elements in the array.</para>
 </refsect1>
</refentry>
"#
}

/// Declarations for the section titles used by [`array_push_xml`].
pub(crate) fn title_entities() -> &'static str {
    r#"<!ENTITY reftitle.description '<title xmlns="http://docbook.org/ns/docbook">Description</title>'>
<!ENTITY reftitle.parameters '<title xmlns="http://docbook.org/ns/docbook">Parameters</title>'>
<!ENTITY reftitle.returnvalues '<title xmlns="http://docbook.org/ns/docbook">Return Values</title>'>
"#
}

/// Member name of the chunked page for `key`.
pub(crate) fn page_member(key: &str) -> String {
    format!("php-chunked-xhtml/{key}.html")
}

/// A session over tarball packs written below `root`.
///
/// Each pack lists the page keys it contains; page bodies read `"<code>: <key>"`.
/// The first pack is active.
pub(crate) fn tarball_session(root: &Path, packs: &[(&str, &[&str])], fallback: Option<&str>) -> DocSession {
    let paths = CachePaths::new(root);
    let mut settings = Settings::default();
    for (code, keys) in packs {
        let pages: Vec<(String, String)> = keys
            .iter()
            .map(|key| (page_member(key), chunked_page(key, &format!("<h1>{key}</h1><p>{code}: {key}</p>"))))
            .collect();
        let members: Vec<(&str, &str)> = pages.iter().map(|(m, c)| (m.as_str(), c.as_str())).collect();
        write_tarball(&paths.tarball(code), &members, true);
        settings.languages.insert(code.to_string(), ArchiveKind::Tarball);
    }
    if let Some((code, _)) = packs.first() {
        settings.language = code.to_string();
    }
    settings.language_fallback = fallback.map(str::to_string);
    DocSession::new(SettingsStore::in_memory(settings), root)
}
