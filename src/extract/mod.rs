//! Content extraction: turning one indexed page into an HTML fragment.
//!
//! ```text
//! tarball pack:  member bytes -> slice entry div -> substitutions
//! tree pack:     xml file -> entity expansion -> element tree -> render -> substitutions
//! ```

mod refentry;
mod tarball;
mod xml_tree;

pub use tarball::{slice_entry, substitute};

use crate::base::{ArchiveKind, LanguagePack};
use crate::entities::EntityTable;
use crate::error::DocError;
use crate::index::ArchivePool;

/// Everything an extractor needs for one page.
pub struct ExtractRequest<'a> {
    pub pack: &'a LanguagePack,
    /// Canonical key, also the id of the entry's outer element.
    pub key: &'a str,
    /// Member name (tarball) or path relative to the tree root.
    pub locator: &'a str,
    /// Documentation entities; only tree packs use them.
    pub entities: Option<&'a EntityTable>,
}

/// Produces the HTML fragment for one indexed page.
pub trait Extractor: Send + Sync {
    fn extract(&self, request: &ExtractRequest<'_>, pool: &mut ArchivePool) -> Result<String, DocError>;
}

/// Reads pages from published tarballs and DocBook checkouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualExtractor;

impl Extractor for ManualExtractor {
    fn extract(&self, request: &ExtractRequest<'_>, pool: &mut ArchivePool) -> Result<String, DocError> {
        let profile = request.pack.kind.profile();
        let fragment = match request.pack.kind {
            ArchiveKind::Tarball => {
                let bytes = pool.handle(&request.pack.root)?.read_member(request.locator)?;
                let page = String::from_utf8_lossy(&bytes);
                slice_entry(&page, request.key).into_owned()
            }
            ArchiveKind::VcsTree => {
                let path = request.pack.root.join(request.locator);
                let bytes = std::fs::read(&path)?;
                refentry::render(&String::from_utf8_lossy(&bytes), request.key, request.entities)?
            }
        };
        tracing::trace!(
            "Extracted '{}' from {} ({} bytes)",
            request.key,
            request.pack.code,
            fragment.len()
        );
        Ok(substitute(&fragment, profile.substitutions))
    }
}

#[cfg(test)]
mod tests;
