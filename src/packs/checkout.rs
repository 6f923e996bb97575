//! Version-control checkout of the DocBook sources.

use std::path::Path;
use std::process::Command;

use super::acquire::{AcquireError, ProgressSink};

/// Produces a source tree for `url` in `target`.
pub trait Checkout: Send + Sync {
    fn checkout(&self, url: &str, target: &Path) -> Result<(), AcquireError>;
}

/// Shallow clone with the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCheckout {
    program: String,
}

impl Default for GitCheckout {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCheckout {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Checkout for GitCheckout {
    fn checkout(&self, url: &str, target: &Path) -> Result<(), AcquireError> {
        tracing::debug!("Running {} clone {} {}", self.program, url, target.display());
        let status = Command::new(&self.program)
            .args(["clone", "--depth", "1", "--quiet", url])
            .arg(target)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(AcquireError::Checkout { status: status.code() })
        }
    }
}

/// Check out `url` into `partial`, then move it to `dest`.
///
/// An existing tree at `dest` is replaced only after the checkout succeeded.
pub fn checkout_tree(
    checkout: &dyn Checkout,
    url: &str,
    partial: &Path,
    dest: &Path,
    progress: &dyn ProgressSink,
    language: &str,
) -> Result<(), AcquireError> {
    remove_tree(partial);
    if let Some(parent) = partial.parent() {
        std::fs::create_dir_all(parent)?;
    }

    progress.progress(language, 0, None);
    if let Err(e) = checkout.checkout(url, partial) {
        remove_tree(partial);
        return Err(e);
    }

    if dest.exists() {
        let previous = dest.with_extension("old");
        remove_tree(&previous);
        std::fs::rename(dest, &previous)?;
        if let Err(e) = std::fs::rename(partial, dest) {
            // Put the previous tree back.
            let _ = std::fs::rename(&previous, dest);
            remove_tree(partial);
            return Err(e.into());
        }
        remove_tree(&previous);
    } else {
        std::fs::rename(partial, dest)?;
    }
    tracing::info!("Checked out {} into {}", url, dest.display());
    Ok(())
}

fn remove_tree(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(path) {
        tracing::warn!("Failed to remove {}: {}", path.display(), e);
    }
}
