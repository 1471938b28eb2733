// Shared data model used across state, input handling, and rendering.
// - Defines the form tabs and the focusable regions of each tab.
// - Defines file entries for the picker and the files handed to the backend.
// - Keeps common types decoupled from module-specific logic.
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

/// Extensions the upload area advertises. Used for highlighting only.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveTab {
    #[value(alias = "manual-input")]
    #[serde(alias = "manual-input")]
    Manual,
    #[default]
    #[value(name = "github", alias = "github-repository")]
    #[serde(rename = "github", alias = "github-repository")]
    GithubRepository,
}

impl ActiveTab {
    pub const ALL: [Self; 2] = [Self::Manual, Self::GithubRepository];

    pub fn next(self) -> Self {
        match self {
            Self::Manual => Self::GithubRepository,
            Self::GithubRepository => Self::Manual,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Manual => Self::GithubRepository,
            Self::GithubRepository => Self::Manual,
        }
    }

    pub fn number(self) -> usize {
        match self {
            Self::Manual => 1,
            Self::GithubRepository => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual Input",
            Self::GithubRepository => "GitHub Repository",
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(Self::Manual),
            2 => Some(Self::GithubRepository),
            _ => None,
        }
    }

    /// Focus order of the regions shown while this tab is active.
    pub fn focus_order(self) -> &'static [Focus] {
        match self {
            Self::Manual => &[Focus::CodeInput, Focus::Activity],
            Self::GithubRepository => &[Focus::GithubUrl, Focus::DropZone, Focus::Activity],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    CodeInput,
    GithubUrl,
    DropZone,
    Activity,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size_bytes: Option<u64>,
}

/// A file handed over by drag-and-drop or the picker. Only its presence is
/// recorded; the content is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedFile {
    pub path: PathBuf,
    pub size_bytes: Option<u64>,
}

impl ProvidedFile {
    pub fn observe(path: PathBuf) -> Self {
        let size_bytes = path
            .metadata()
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len());
        Self { path, size_bytes }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps_both_ways() {
        assert_eq!(ActiveTab::Manual.next(), ActiveTab::GithubRepository);
        assert_eq!(ActiveTab::GithubRepository.next(), ActiveTab::Manual);
        assert_eq!(ActiveTab::Manual.previous(), ActiveTab::GithubRepository);
    }

    #[test]
    fn tab_numbers_round_trip_through_lookup() {
        for tab in ActiveTab::ALL {
            assert_eq!(ActiveTab::from_number(tab.number()), Some(tab));
        }
        assert_eq!(ActiveTab::from_number(3), None);
    }

    #[test]
    fn every_tab_starts_on_a_text_field() {
        for tab in ActiveTab::ALL {
            assert!(matches!(tab.focus_order()[0], Focus::CodeInput | Focus::GithubUrl));
        }
    }

    #[test]
    fn supported_extensions_ignore_case() {
        assert!(has_supported_extension(Path::new("src/App.TSX")));
        assert!(has_supported_extension(Path::new("index.js")));
        assert!(!has_supported_extension(Path::new("main.rs")));
        assert!(!has_supported_extension(Path::new("Makefile")));
    }

    #[test]
    fn observing_missing_file_has_no_size() {
        let file = ProvidedFile::observe(PathBuf::from("/definitely/not/here.ts"));
        assert_eq!(file.size_bytes, None);
        assert_eq!(file.name(), "here.ts");
    }
}
