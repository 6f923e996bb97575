use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::ArchiveKind;

/// Plugin settings, stored as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active language code.
    pub language: String,

    /// Installed packs in the order they were checked out.
    pub languages: IndexMap<String, ArchiveKind>,

    /// Consulted once when the active pack lacks a symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_fallback: Option<String>,

    /// Render into an output panel instead of a popup.
    pub use_panel: bool,

    pub popup_max_width: u32,
    pub popup_max_height: u32,

    /// Show a "not found" popup for unknown symbols.
    pub prompt_when_not_found: bool,

    /// Show the definition automatically when the selection settles.
    pub auto: bool,

    /// Quiet period for `auto`, in milliseconds.
    pub auto_delay: u64,

    /// Log rendered output.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            languages: IndexMap::new(),
            language_fallback: None,
            use_panel: false,
            popup_max_width: 1280,
            popup_max_height: 720,
            prompt_when_not_found: false,
            auto: false,
            auto_delay: 500,
            debug: false,
        }
    }
}

impl Settings {
    /// Kind of a configured pack, if installed.
    pub fn pack_kind(&self, code: &str) -> Option<ArchiveKind> {
        self.languages.get(code).copied()
    }

    /// Configured fallback, ignoring a fallback equal to `language`.
    pub fn fallback_for(&self, language: &str) -> Option<&str> {
        self.language_fallback
            .as_deref()
            .filter(|fallback| !fallback.is_empty() && *fallback != language)
    }

    /// Read settings from a JSON file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write settings to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path.as_ref(), json)
    }
}

/// Shared, optionally file-backed settings.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// In-memory store; changes are never written anywhere.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
            path: None,
        }
    }

    /// Load from `path`, falling back to defaults when the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Settings::read_from_file(&path) {
            Ok(settings) => settings,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                Settings::default()
            }
        };
        Self {
            inner: Arc::new(RwLock::new(settings)),
            path: Some(path),
        }
    }

    /// Snapshot of the current settings.
    pub fn get(&self) -> Settings {
        self.inner.read().clone()
    }

    /// Read a single value without cloning everything.
    pub fn with<R>(&self, f: impl FnOnce(&Settings) -> R) -> R {
        f(&self.inner.read())
    }

    /// Apply a change and persist it.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let snapshot = {
            let mut guard = self.inner.write();
            f(&mut guard);
            guard.clone()
        };
        self.save_snapshot(&snapshot);
    }

    /// Write the current settings back to disk.
    pub fn save(&self) {
        let snapshot = self.get();
        self.save_snapshot(&snapshot);
    }

    fn save_snapshot(&self, settings: &Settings) {
        if let Some(path) = &self.path {
            if let Err(e) = settings.write_to_file(path) {
                tracing::warn!("Failed to save settings to {}: {}", path.display(), e);
            }
        }
    }
}
