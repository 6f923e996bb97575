//! Entity Decoder.
//!
//! Two independent escaping schemes:
//!
//! - **Generic**: fixed named/numeric character references
//!   ([`decode`] with a [`GenericTable`]). Unknown references are kept as-is.
//! - **Documentation**: per-pack entities declared in `.ent` files
//!   ([`EntityTable`]), expanded iteratively before XML pages are parsed.
//!   Unknown references are surfaced as visible placeholders.

mod declarations;
mod generic;

pub use declarations::{EntityTable, declaration_files, parse_declarations};
pub use generic::{CharTable, GenericTable, decode};
