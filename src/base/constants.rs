//! Domain constants for manual archives and their caches.

/// Directory (below the cache root) holding archives and per-language caches.
pub const LANGUAGE_DIR: &str = "language";

/// Persisted SymbolIndex file name, one per language pack.
pub const SYMBOL_CACHE_FILE: &str = "symbols.json";

/// Persisted documentation entity table, one per language pack.
pub const ENTITY_CACHE_FILE: &str = "entities.json";

/// Checkout directory name for tree packs, inside the per-language cache dir.
pub const TREE_DIR: &str = "tree";

/// Upper bound for reading any persisted cache file.
pub const MAX_CACHE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Subdirectory holding the function reference in older tree layouts.
pub const TREE_REFERENCE_DIR: &str = "reference";

/// Download source for tarball packs. `{code}` is replaced by the language code.
pub const TARBALL_URL_TEMPLATE: &str = "http://php.net/distributions/manual/php_manual_{code}.tar.gz";

/// Version-control source used when no tarball is published for a language.
pub const TREE_URL_TEMPLATE: &str = "https://github.com/php/doc-{code}.git";

/// Online manual page. `{code}` and `{symbol}` are substituted.
pub const ONLINE_URL_TEMPLATE: &str = "http://php.net/manual/{code}/{symbol}.php";

/// Attribute on an entry's root element naming its online manual page.
pub const PAGE_ATTRIBUTE: &str = "data-page";

/// Symbol shown by the "open manual index" command.
pub const MANUAL_INDEX_SYMBOL: &str = "index";

/// Popups longer than this are cut; larger payloads crash some hosts.
pub const MAX_POPUP_CHARS: usize = 65_535;

/// Maximum number of expansion passes for documentation entities.
pub const MAX_ENTITY_PASSES: usize = 10;

/// Fill a `{code}` / `{symbol}` URL template.
pub fn fill_template(template: &str, code: &str, symbol: &str) -> String {
    template.replace("{code}", code).replace("{symbol}", symbol)
}
