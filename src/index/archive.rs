//! Tar archive access and the session-owned handle pool.
//!
//! Manual tarballs are gzip streams and cannot be seeked into, so a member
//! read rewinds the open file and streams entries until the member shows up.
//! Handles stay open between lookups and are released together.

use flate2::read::GzDecoder;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::DocError;

/// An open tar (optionally gzip-compressed) archive.
#[derive(Debug)]
pub struct ArchiveHandle {
    path: PathBuf,
    file: File,
    gzip: bool,
}

impl ArchiveHandle {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DocError> {
        let path = path.into();
        let mut file = File::open(&path)?;

        let mut magic = [0u8; 2];
        let n = file.read(&mut magic)?;
        let gzip = n == 2 && magic == [0x1F, 0x8B];
        file.seek(SeekFrom::Start(0))?;

        tracing::debug!("Opened archive {} (gzip: {})", path.display(), gzip);
        Ok(Self { path, file, gzip })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewind(&mut self) -> Result<tar::Archive<Box<dyn Read + '_>>, DocError> {
        self.file.seek(SeekFrom::Start(0))?;
        let reader: Box<dyn Read + '_> = if self.gzip {
            Box::new(GzDecoder::new(BufReader::new(&mut self.file)))
        } else {
            Box::new(BufReader::new(&mut self.file))
        };
        Ok(tar::Archive::new(reader))
    }

    /// Names of every regular member, in archive order.
    pub fn member_names(&mut self) -> Result<Vec<String>, DocError> {
        let mut archive = self.rewind()?;
        let mut names = Vec::new();
        for entry in archive.entries()? {
            let entry = entry?;
            if entry.header().entry_type().is_file() {
                names.push(member_name(&entry));
            }
        }
        Ok(names)
    }

    /// Raw bytes of the member called `name`.
    pub fn read_member(&mut self, name: &str) -> Result<Vec<u8>, DocError> {
        let mut archive = self.rewind()?;
        for entry in archive.entries()? {
            let mut entry = entry?;
            if member_name(&entry) == name {
                let mut bytes = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut bytes)?;
                return Ok(bytes);
            }
        }
        Err(DocError::MissingMember(name.to_string()))
    }
}

fn member_name<R: Read>(entry: &tar::Entry<'_, R>) -> String {
    let raw = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    match raw.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => raw,
    }
}

/// Open archive handles keyed by path, owned by one session.
///
/// Every handle is released exactly once: by [`ArchivePool::release`] when
/// its archive is replaced, or by [`ArchivePool::close_all`] (also run on drop).
#[derive(Debug, Default)]
pub struct ArchivePool {
    handles: FxHashMap<PathBuf, ArchiveHandle>,
}

impl ArchivePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open handle for `path`, opening it on first use.
    pub fn handle(&mut self, path: &Path) -> Result<&mut ArchiveHandle, DocError> {
        match self.handles.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(ArchiveHandle::open(path)?)),
        }
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.handles.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Close the handle for `path`, if open. Returns whether one was open.
    pub fn release(&mut self, path: &Path) -> bool {
        match self.handles.remove(path) {
            Some(handle) => {
                tracing::debug!("Released archive {}", handle.path.display());
                true
            }
            None => false,
        }
    }

    /// Close every handle. Returns how many were open.
    pub fn close_all(&mut self) -> usize {
        let count = self.handles.len();
        for (path, handle) in self.handles.drain() {
            drop(handle);
            tracing::debug!("Closed archive {}", path.display());
        }
        count
    }
}

impl Drop for ArchivePool {
    fn drop(&mut self) {
        self.close_all();
    }
}
