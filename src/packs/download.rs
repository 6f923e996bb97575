//! Tarball download into a temporary file, renamed into place when complete.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::acquire::{AcquireError, ProgressSink};

const CHUNK_SIZE: usize = 8192;

/// Report progress every this many bytes when the total size is unknown.
const UNSIZED_REPORT_STEP: u64 = 1024 * 1024;

/// Status and body of one GET request.
pub struct FetchResponse {
    pub status: u16,
    /// Declared body size, if the server sent one.
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Transport for archive downloads.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<FetchResponse, AcquireError>;
}

/// Blocking HTTP transport.
#[cfg(feature = "acquire")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "acquire")]
impl HttpFetcher {
    pub fn new() -> Result<Self, AcquireError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .timeout(None)
            .build()
            .map_err(|e| AcquireError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "acquire")]
impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, AcquireError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AcquireError::network(format!("{url}: {e}")))?;
        Ok(FetchResponse {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}

/// Download `url` to `dest` through the temporary file `partial`.
///
/// The canonical file is only replaced after the body has been fully written
/// and its size matches the declared length. On any failure the partial file
/// is removed and `dest` is left as it was. Returns the number of bytes written.
pub fn download_archive(
    fetch: &dyn Fetch,
    url: &str,
    partial: &Path,
    dest: &Path,
    progress: &dyn ProgressSink,
    language: &str,
) -> Result<u64, AcquireError> {
    let response = fetch.get(url)?;
    if !(200..300).contains(&response.status) {
        return Err(AcquireError::Http {
            status: response.status,
            url: url.to_string(),
        });
    }
    if let Some(parent) = partial.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let expected = response.content_length;
    let written = match write_body(response.body, partial, expected, progress, language) {
        Ok(written) => written,
        Err(e) => {
            discard(partial);
            return Err(e);
        }
    };

    if let Some(expected) = expected.filter(|expected| *expected != written) {
        discard(partial);
        return Err(AcquireError::SizeMismatch {
            expected,
            found: written,
        });
    }

    if let Err(e) = std::fs::rename(partial, dest) {
        discard(partial);
        return Err(e.into());
    }
    tracing::info!("Downloaded {} ({} bytes)", dest.display(), written);
    Ok(written)
}

fn write_body(
    mut body: Box<dyn Read + Send>,
    partial: &Path,
    total: Option<u64>,
    progress: &dyn ProgressSink,
    language: &str,
) -> Result<u64, AcquireError> {
    let mut out = BufWriter::new(File::create(partial)?);
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut received = 0u64;
    let mut last_step = None;

    loop {
        let n = body
            .read(&mut buf)
            .map_err(|e| AcquireError::network(format!("download interrupted: {e}")))?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])?;
        received += n as u64;

        let step = match total {
            Some(total) if total > 0 => received * 100 / total,
            _ => received / UNSIZED_REPORT_STEP,
        };
        if last_step != Some(step) {
            last_step = Some(step);
            progress.progress(language, received, total);
        }
    }
    out.flush()?;
    Ok(received)
}

fn discard(partial: &Path) {
    match std::fs::remove_file(partial) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove partial download {}: {}", partial.display(), e),
    }
}
