//! Languages the manual is published in.

/// One translation of the manual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

impl LanguageInfo {
    /// Quick-pick label, e.g. `de German (Deutsch)`.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.code, self.name, self.native_name)
    }
}

// Sorted by code.
static CATALOG: &[LanguageInfo] = &[
    LanguageInfo { code: "de", name: "German", native_name: "Deutsch" },
    LanguageInfo { code: "en", name: "English", native_name: "English" },
    LanguageInfo { code: "es", name: "Spanish", native_name: "Español" },
    LanguageInfo { code: "fr", name: "French", native_name: "Français" },
    LanguageInfo { code: "it", name: "Italian", native_name: "Italiano" },
    LanguageInfo { code: "ja", name: "Japanese", native_name: "日本語" },
    LanguageInfo { code: "pt_BR", name: "Brazilian Portuguese", native_name: "Português do Brasil" },
    LanguageInfo { code: "ro", name: "Romanian", native_name: "Română" },
    LanguageInfo { code: "ru", name: "Russian", native_name: "Русский" },
    LanguageInfo { code: "tr", name: "Turkish", native_name: "Türkçe" },
    LanguageInfo { code: "uk", name: "Ukrainian", native_name: "Українська" },
    LanguageInfo { code: "zh", name: "Chinese (Simplified)", native_name: "简体中文" },
];

/// Every known language, sorted by code.
pub fn catalog() -> &'static [LanguageInfo] {
    CATALOG
}

pub fn lookup_language(code: &str) -> Option<&'static LanguageInfo> {
    CATALOG.iter().find(|info| info.code == code)
}

/// Parallel code/label lists for a quick-pick, plus the index of `selected`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageChoices {
    pub codes: Vec<String>,
    pub labels: Vec<String>,
    pub selected: Option<usize>,
}

/// Build quick-pick entries for `codes` (or the whole catalog when `None`).
///
/// Codes missing from the catalog are listed with the bare code as label.
pub fn language_choices(codes: Option<&[String]>, selected: Option<&str>) -> LanguageChoices {
    let mut choices = LanguageChoices::default();

    let mut push = |code: &str, label: String| {
        if Some(code) == selected {
            choices.selected = Some(choices.codes.len());
        }
        choices.codes.push(code.to_string());
        choices.labels.push(label);
    };

    match codes {
        Some(codes) => {
            for code in codes {
                let label = lookup_language(code)
                    .map(LanguageInfo::label)
                    .unwrap_or_else(|| code.clone());
                push(code, label);
            }
        }
        None => {
            for info in CATALOG {
                push(info.code, info.label());
            }
        }
    }

    choices
}
