#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "xliff-merge.toml";

/// Locale directory used when neither the flag nor the config file sets one.
pub const DEFAULT_LOCALE_DIR: &str = "angular/src/locale";

/// Locale of the authoritative catalog by default.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Catalog files are named `<prefix>.<locale>.xlf`.
pub const DEFAULT_FILE_PREFIX: &str = "messages";

#[derive(Debug, Error)]
pub enum MergeConfigError {
    /// Configuration file not found.
    #[error("xliff-merge.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured source language is not a valid identifier.
    #[error("Invalid source language identifier '{name}'")]
    InvalidSourceLanguage {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
}

/// The contents of `xliff-merge.toml`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Directory holding the `<prefix>.<locale>.xlf` files.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Locale of the authoritative catalog (e.g., "en").
    #[serde(default)]
    pub source_language: Option<String>,
    /// File name prefix before the locale segment.
    #[serde(default)]
    pub file_prefix: Option<String>,
    /// Translate new units with Google Translate.
    #[serde(default)]
    pub google_translate: Option<bool>,
    /// Abort the run when a locale catalog cannot be loaded.
    #[serde(default)]
    pub fail_fast: Option<bool>,
}

impl MergeConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, MergeConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MergeConfigError::NotFound);
        }

        let content = fs_err::read_to_string(path)?;
        let config: MergeConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads `xliff-merge.toml` from `dir` if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>, MergeConfigError> {
        match Self::read_from_path(dir.join(CONFIG_FILE_NAME)) {
            Ok(config) => Ok(Some(config)),
            Err(MergeConfigError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn validate(&self) -> Result<(), MergeConfigError> {
        if let Some(name) = &self.source_language {
            parse_language(name)?;
        }
        Ok(())
    }

    /// The configured locale directory, or the default one.
    pub fn locale_dir(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALE_DIR))
    }

    /// The configured source language, or the default one.
    pub fn source_language(&self) -> &str {
        self.source_language
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_LANGUAGE)
    }

    /// The configured file prefix, or the default one.
    pub fn file_prefix(&self) -> &str {
        self.file_prefix.as_deref().unwrap_or(DEFAULT_FILE_PREFIX)
    }
}

/// Parse a locale code as a BCP 47 language identifier.
pub fn parse_language(name: &str) -> Result<LanguageIdentifier, MergeConfigError> {
    name.parse::<LanguageIdentifier>()
        .map_err(|source| MergeConfigError::InvalidSourceLanguage {
            name: name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config_content = r#"
path = "src/locale"
source_language = "en-US"
google_translate = true
"#;

        fs_err::write(&config_path, config_content).unwrap();

        let config = MergeConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.locale_dir(), PathBuf::from("src/locale"));
        assert_eq!(config.source_language(), "en-US");
        assert_eq!(config.file_prefix(), DEFAULT_FILE_PREFIX);
        assert_eq!(config.google_translate, Some(true));
        assert_eq!(config.fail_fast, None);
    }

    #[test]
    fn test_defaults() {
        let config = MergeConfig::default();

        assert_eq!(config.locale_dir(), PathBuf::from(DEFAULT_LOCALE_DIR));
        assert_eq!(config.source_language(), "en");
        assert_eq!(config.file_prefix(), "messages");
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let result = MergeConfig::read_from_path("/non/existent/path/xliff-merge.toml");
        assert!(matches!(result, Err(MergeConfigError::NotFound)));
    }

    #[test]
    fn test_read_from_path_unknown_key() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs_err::write(&config_path, "api_key = \"secret\"\n").unwrap();

        let result = MergeConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(MergeConfigError::ParseError(_))));
    }

    #[test]
    fn test_read_from_path_invalid_source_language() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs_err::write(&config_path, "source_language = \"not a lang!\"\n").unwrap();

        let result = MergeConfig::read_from_path(&config_path);
        assert!(matches!(
            result,
            Err(MergeConfigError::InvalidSourceLanguage { .. })
        ));
    }

    #[test]
    fn test_discover_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(MergeConfig::discover(temp_dir.path()).unwrap(), None);
    }

    #[test]
    fn test_discover_existing() {
        let temp_dir = TempDir::new().unwrap();
        fs_err::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "file_prefix = \"strings\"\nfail_fast = true\n",
        )
        .unwrap();

        let config = MergeConfig::discover(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.file_prefix(), "strings");
        assert_eq!(config.fail_fast, Some(true));
    }
}
