//! JSON cache files: bounded reads, atomic writes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::base::constants::MAX_CACHE_FILE_BYTES;
use crate::error::DocError;

/// Read a whole cache file, refusing anything above the size ceiling.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DocError> {
    let file = File::open(path)?;
    let mut buf = Vec::new();
    file.take(MAX_CACHE_FILE_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_CACHE_FILE_BYTES {
        return Err(DocError::CacheTooLarge {
            path: path.to_path_buf(),
            limit: MAX_CACHE_FILE_BYTES,
        });
    }
    Ok(serde_json::from_slice(&buf)?)
}

/// Write `value` next to `path` and rename it into place.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DocError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec(value)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Remove a cache file if present.
pub(crate) fn remove(path: &Path) -> Result<(), DocError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
