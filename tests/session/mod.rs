//! End-to-end lookups through `DocSession` over packs written to disk.

pub mod tests_popup;
pub mod tests_tarball_pack;
pub mod tests_xml_pack;
