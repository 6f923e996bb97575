//! Builders for on-disk language packs.

#![allow(clippy::unwrap_used)]

use std::fs::File;
use std::path::Path;

use docphp::{ArchiveKind, CachePaths, DocSession, Settings, SettingsStore};
use flate2::Compression;
use flate2::write::GzEncoder;

/// A chunked manual page as published on php.net.
pub fn chunked_page(id: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html><head><title>{id}</title></head><body>
<div class="manualnavbar manualnavbar_top"><div class="up"><a href="funcref.html">Function Reference</a></div></div><hr />
<div id="{id}" class="refentry">{body}</div><hr />
<div class="manualnavbar manualnavbar_bottom"><a href="index.html">PHP Manual</a></div>
</body></html>"#
    )
}

/// Write a gzipped tarball pack holding `(key, body)` pages.
pub fn write_tarball_pack(paths: &CachePaths, code: &str, pages: &[(&str, &str)]) {
    let path = paths.tarball(code);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (key, body) in pages {
        let page = chunked_page(key, body);
        let mut header = tar::Header::new_gnu();
        header.set_size(page.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("php-chunked-xhtml/{key}.html"), page.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Write a DocBook checkout with `(relative path, content)` files.
pub fn write_tree_pack(paths: &CachePaths, code: &str, files: &[(&str, &str)]) {
    let root = paths.tree(code);
    for (relative, content) in files {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

/// Session over `root` with the given packs configured; the first one is active.
pub fn session(root: &Path, packs: &[(&str, ArchiveKind)], fallback: Option<&str>) -> DocSession {
    let mut settings = Settings::default();
    for (code, kind) in packs {
        settings.languages.insert(code.to_string(), *kind);
    }
    if let Some((code, _)) = packs.first() {
        settings.language = code.to_string();
    }
    settings.language_fallback = fallback.map(str::to_string);
    DocSession::new(SettingsStore::in_memory(settings), root)
}

pub const ARRAY_PUSH_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
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
   <function>array_push</function> treats <parameter>array</parameter> as a stack.
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
    <listitem><para>The values to push.</para></listitem>
   </varlistentry>
  </variablelist>
 </refsect1>
 <refsect1 role="returnvalues">
  &reftitle.returnvalues;
  <para>Returns the new number of elements in the array.</para>
 </refsect1>
</refentry>
"#;

pub const STR_PAD_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<refentry xml:id="function.str-pad" xmlns="http://docbook.org/ns/docbook">
 <refnamediv>
  <refname>str_pad</refname>
  <refpurpose>Pad a string to a certain length</refpurpose>
 </refnamediv>
 <refsect1 role="description">
  <methodsynopsis>
   <type>string</type><methodname>str_pad</methodname>
   <methodparam><type>string</type><parameter>string</parameter></methodparam>
   <methodparam><type>int</type><parameter>length</parameter></methodparam>
   <methodparam choice="opt"><type>int</type><parameter>pad_type</parameter><initializer><constant>STR_PAD_RIGHT</constant></initializer></methodparam>
  </methodsynopsis>
 </refsect1>
</refentry>
"#;

/// Unclosed `refnamediv`.
pub const BROKEN_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<refentry xml:id="function.broken-fn" xmlns="http://docbook.org/ns/docbook">
 <refnamediv>
  <refname>broken_fn</refname>
</refentry>
"#;

/// Section titles as a translation would declare them.
pub fn title_entities(description: &str, parameters: &str, returns: &str) -> String {
    format!(
        r#"<!ENTITY reftitle.description '<title xmlns="http://docbook.org/ns/docbook">{description}</title>'>
<!ENTITY reftitle.parameters '<title xmlns="http://docbook.org/ns/docbook">{parameters}</title>'>
<!ENTITY reftitle.returnvalues '<title xmlns="http://docbook.org/ns/docbook">{returns}</title>'>
"#
    )
}
