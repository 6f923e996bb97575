//! Documentation-specific entities declared in `.ent` files.
//!
//! The DocBook sources reference hundreds of `&reftitle.parameters;`-style
//! entities whose replacement text may itself contain entities and markup.

use rayon::prelude::*;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use super::generic::GenericTable;
use crate::base::constants::MAX_ENTITY_PASSES;
use crate::base::{CachePaths, LanguagePack};
use crate::error::DocError;
use crate::persist;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!ENTITY\s+([A-Za-z_][\w.:\-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .expect("declaration pattern is valid")
});

static NAMESPACE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+xmlns(?::[\w.\-]+)?\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("namespace pattern is valid")
});

static NAMED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&([A-Za-z_][\w.:\-]*);").expect("named reference pattern is valid")
});

/// Entities the XML parser resolves itself.
const XML_PREDEFINED: [&str; 5] = ["lt", "gt", "amp", "quot", "apos"];

/// Name → replacement text for one language pack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityTable {
    entries: FxHashMap<String, String>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every declaration found in `source`. Later declarations win.
    pub fn add_declarations(&mut self, source: &str) {
        for (name, value) in parse_declarations(source) {
            self.entries.insert(name, value);
        }
    }

    /// Build a table from declaration files; files later in `files` win on conflicts.
    pub fn from_files(files: &[PathBuf]) -> Result<Self, DocError> {
        let parsed: Vec<Vec<(String, String)>> = files
            .par_iter()
            .map(|path| -> Result<Vec<(String, String)>, DocError> {
                let bytes = std::fs::read(path)?;
                Ok(parse_declarations(&String::from_utf8_lossy(&bytes)))
            })
            .collect::<Result<_, DocError>>()?;

        let mut table = Self::new();
        for declarations in parsed {
            table.entries.extend(declarations);
        }
        Ok(table)
    }

    /// Load the persisted table for `pack`, or scan its `.ent` files and persist the result.
    pub fn build_or_load(pack: &LanguagePack, paths: &CachePaths) -> Result<Self, DocError> {
        let cache = paths.entity_cache(&pack.code);
        if cache.exists() {
            tracing::debug!("Loading entity table from {}", cache.display());
            return persist::read_json(&cache);
        }

        let files = declaration_files(&pack.root);
        tracing::info!(
            "Building entity table for '{}' from {} declaration file(s)",
            pack.code,
            files.len()
        );
        let table = Self::from_files(&files)?;
        persist::write_json(&cache, &table)?;
        Ok(table)
    }

    /// Expand documentation entities until nothing changes (bounded), then mark leftovers.
    ///
    /// Lookup order per reference: this table, the HTML generic table. The
    /// five XML predefined entities and numeric references are left for the
    /// XML parser. Whatever is still unresolved becomes
    /// `<emphasis>NAME</emphasis>` with the name upper-cased.
    pub fn expand(&self, text: &str) -> String {
        let html = GenericTable::Html.table();
        let mut current = text.to_string();

        for _ in 0..MAX_ENTITY_PASSES {
            let next = NAMED_REFERENCE.replace_all(&current, |caps: &Captures<'_>| {
                let name = &caps[1];
                if XML_PREDEFINED.contains(&name) {
                    return caps[0].to_string();
                }
                if let Some(value) = self.get(name) {
                    return value.to_string();
                }
                match html.named(name) {
                    Some(c) => c.to_string(),
                    None => caps[0].to_string(),
                }
            });
            if next == current {
                break;
            }
            current = next.into_owned();
        }

        NAMED_REFERENCE
            .replace_all(&current, |caps: &Captures<'_>| {
                let name = &caps[1];
                if XML_PREDEFINED.contains(&name) {
                    caps[0].to_string()
                } else {
                    format!("<emphasis>{}</emphasis>", name.to_uppercase())
                }
            })
            .into_owned()
    }
}

/// Extract `(name, value)` pairs from `<!ENTITY name "value">` declarations.
///
/// Parameter entities and external (`SYSTEM`) entities are skipped.
pub fn parse_declarations(source: &str) -> Vec<(String, String)> {
    DECLARATION
        .captures_iter(source)
        .map(|caps| {
            let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            let value = NAMESPACE_ATTR.replace_all(raw, "").into_owned();
            (caps[1].to_string(), value)
        })
        .collect()
}

/// Every `*.ent` file below `root`, in a stable order.
pub fn declaration_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ent"))
        .collect();
    files.sort();
    files
}
