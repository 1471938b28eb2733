//! Form configuration.
//!
//! The form ships in two variants that differ only in their default tab and
//! header copy. A variant is a preset; a YAML file and command-line flags can
//! override individual fields on top of it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::model::ActiveTab;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CODEDROP_CONFIG";

const CONFIG_DIR_NAME: &str = "codedrop";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    BugFinder,
    DocGenerator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub default_tab: ActiveTab,
    pub headline: String,
    pub headline_accent: String,
    pub subtitle: String,
}

impl FormConfig {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::BugFinder => Self {
                default_tab: ActiveTab::GithubRepository,
                headline: "Find bugs in your code".to_string(),
                headline_accent: "instantly".to_string(),
                subtitle: "Paste your code manually or upload your GitHub repository for automatic bug detection".to_string(),
            },
            Variant::DocGenerator => Self {
                default_tab: ActiveTab::Manual,
                headline: "Generate documentation for your code".to_string(),
                headline_accent: "instantly".to_string(),
                subtitle: "Paste your code manually or upload your GitHub repository for automatic documentation generation".to_string(),
            },
        }
    }

    /// Builds the effective configuration. Flag values win over the file, and
    /// the file wins over the preset.
    pub fn resolve(
        variant_flag: Option<Variant>,
        tab_flag: Option<ActiveTab>,
        file: Option<&ConfigFile>,
    ) -> Self {
        let variant = variant_flag
            .or_else(|| file.and_then(|file| file.variant))
            .unwrap_or_default();
        let mut config = Self::preset(variant);

        if let Some(file) = file {
            if let Some(tab) = file.default_tab {
                config.default_tab = tab;
            }
            if let Some(headline) = &file.headline {
                config.headline = headline.clone();
            }
            if let Some(accent) = &file.headline_accent {
                config.headline_accent = accent.clone();
            }
            if let Some(subtitle) = &file.subtitle {
                config.subtitle = subtitle.clone();
            }
        }

        if let Some(tab) = tab_flag {
            config.default_tab = tab;
        }

        config
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

/// On-disk overrides. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub variant: Option<Variant>,
    pub default_tab: Option<ActiveTab>,
    pub headline: Option<String>,
    pub headline_accent: Option<String>,
    pub subtitle: Option<String>,
}

impl ConfigFile {
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Loads an explicit file, or the default location when it exists.
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config file");
            return Self::read(path).map(Some);
        }

        let Some(path) = default_config_path() else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }
        tracing::debug!(path = %path.display(), "loading default config file");
        Self::read(&path).map(Some)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(contents: &str) -> Result<ConfigFile, ConfigError> {
        ConfigFile::parse(Path::new("test.yaml"), contents)
    }

    #[test]
    fn presets_differ_in_default_tab_and_copy() {
        let bugs = FormConfig::preset(Variant::BugFinder);
        let docs = FormConfig::preset(Variant::DocGenerator);
        assert_eq!(bugs.default_tab, ActiveTab::GithubRepository);
        assert_eq!(docs.default_tab, ActiveTab::Manual);
        assert!(bugs.headline.starts_with("Find bugs"));
        assert!(docs.headline.starts_with("Generate documentation"));
    }

    #[test]
    fn default_is_bug_finder() {
        assert_eq!(FormConfig::default(), FormConfig::preset(Variant::BugFinder));
        assert_eq!(FormConfig::resolve(None, None, None), FormConfig::default());
    }

    #[test]
    fn file_overrides_preset_and_flag_overrides_file() {
        let file = parse("variant: doc-generator\ndefault_tab: github\nheadline: Scan it\n").unwrap();

        let from_file = FormConfig::resolve(None, None, Some(&file));
        assert_eq!(from_file.default_tab, ActiveTab::GithubRepository);
        assert_eq!(from_file.headline, "Scan it");
        assert!(from_file.subtitle.ends_with("documentation generation"));

        let with_flags =
            FormConfig::resolve(Some(Variant::BugFinder), Some(ActiveTab::Manual), Some(&file));
        assert_eq!(with_flags.default_tab, ActiveTab::Manual);
        assert_eq!(with_flags.headline, "Scan it");
        assert!(with_flags.subtitle.ends_with("bug detection"));
    }

    #[test]
    fn tab_names_accept_aliases() {
        assert_eq!(parse("default_tab: manual").unwrap().default_tab, Some(ActiveTab::Manual));
        assert_eq!(
            parse("default_tab: github-repository").unwrap().default_tab,
            Some(ActiveTab::GithubRepository)
        );
    }

    #[test]
    fn empty_file_means_no_overrides() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
        assert_eq!(parse("  \n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(matches!(parse("colour: purple"), Err(ConfigError::Parse { .. })));
        assert!(matches!(parse("default_tab: upload"), Err(ConfigError::Parse { .. })));
        assert!(matches!(parse("variant: linter"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "headline_accent: today").unwrap();

        let loaded = ConfigFile::load(Some(file.path())).unwrap().unwrap();
        assert_eq!(loaded.headline_accent.as_deref(), Some("today"));
    }

    #[test]
    fn load_fails_for_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = ConfigFile::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.yaml"));
    }
}
