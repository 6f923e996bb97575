//! Language packs and their archive formats.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage format of a language pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveKind {
    /// Gzipped tar of chunked HTML pages, as published on php.net.
    #[serde(rename = "gz")]
    Tarball,
    /// Version-control checkout of the DocBook XML sources.
    #[serde(rename = "vcs")]
    VcsTree,
}

impl ArchiveKind {
    /// Resolution and cleanup tables for this format.
    pub fn profile(self) -> &'static FormatProfile {
        match self {
            ArchiveKind::Tarball => &TARBALL_PROFILE,
            ArchiveKind::VcsTree => &TREE_PROFILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveKind::Tarball => "gz",
            ArchiveKind::VcsTree => "vcs",
        }
    }
}

/// Per-format behaviour that differs between published tarballs and XML checkouts.
#[derive(Debug)]
pub struct FormatProfile {
    /// Disambiguation prefixes tried in order on a primary lookup.
    pub prefixes: &'static [&'static str],
    /// Literal fix-ups applied to extracted pages in a single pass.
    pub substitutions: &'static [(&'static str, &'static str)],
}

static TARBALL_PROFILE: FormatProfile = FormatProfile {
    prefixes: &["function.", "book.", "class."],
    substitutions: &[
        ("&mdash;", "--"),
        ("&quot;", "'"),
        ("<br>", ""),
        ("&#039;", "'"),
        ("&$", "&amp;$"),
        ("&raquo;", ">>"),
    ],
};

// Tree keys are file stems, which never carry a prefix.
static TREE_PROFILE: FormatProfile = FormatProfile {
    prefixes: &[],
    substitutions: &[("&mdash;", "--"), ("&$", "&amp;$"), ("&raquo;", "\u{00BB}")],
};

/// One localized copy of the manual.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguagePack {
    /// Short language code, e.g. `en` or `pt_BR`.
    pub code: String,
    pub kind: ArchiveKind,
    /// The `.tar.gz` file for tarball packs, the checkout directory for trees.
    pub root: PathBuf,
}

impl LanguagePack {
    pub fn new(code: impl Into<String>, kind: ArchiveKind, root: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            kind,
            root: root.into(),
        }
    }

    /// Whether the archive or checkout is present on disk.
    pub fn is_present(&self) -> bool {
        match self.kind {
            ArchiveKind::Tarball => self.root.is_file(),
            ArchiveKind::VcsTree => self.root.is_dir(),
        }
    }
}
