//! User-facing configuration.
//!
//! [`Settings`] mirrors the plugin's settings file; [`SettingsStore`] shares
//! one instance between the interactive path and background acquisition and
//! writes it back on every change.

mod catalog;
mod settings;

pub use catalog::{LanguageChoices, LanguageInfo, catalog, language_choices, lookup_language};
pub use settings::{Settings, SettingsStore};

#[cfg(test)]
mod tests;
