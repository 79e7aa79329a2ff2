//! Run settings resolved from command-line flags and `xliff-merge.toml`.

use crate::core::{
    CliError, ConfigNotFoundError, ConfigParseError, InvalidSourceLocaleError, MissingApiKeyError,
};
use std::path::{Path, PathBuf};
use xliff_merge_toml::{MergeConfig, MergeConfigError};

/// Raw values as given on the command line, before defaults apply.
#[derive(Clone, Debug, Default)]
pub struct SettingOverrides {
    pub config: Option<PathBuf>,
    pub path: Option<PathBuf>,
    pub source_locale: Option<String>,
    pub prefix: Option<String>,
    pub google_translate: bool,
    pub api_key: Option<String>,
    pub fail_fast: bool,
}

/// Effective settings for a sync run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncSettings {
    /// Directory containing the catalog files.
    pub locale_dir: PathBuf,
    /// Locale of the authoritative catalog.
    pub source_language: String,
    /// Prefix of the catalog file names.
    pub file_prefix: String,
    /// Credential for machine translation; `Some` only when translation is enabled.
    pub api_key: Option<String>,
    pub fail_fast: bool,
}

impl SyncSettings {
    /// Resolve settings with precedence: flag, then config file, then default.
    ///
    /// `cwd` is where `xliff-merge.toml` is looked up when no `--config` is given.
    pub fn resolve(overrides: SettingOverrides, cwd: &Path) -> Result<Self, CliError> {
        let config = load_config(overrides.config.as_deref(), cwd)?;

        let google_translate =
            overrides.google_translate || config.google_translate.unwrap_or(false);
        let api_key = if google_translate {
            match overrides.api_key.filter(|key| !key.trim().is_empty()) {
                Some(key) => Some(key),
                None => return Err(MissingApiKeyError.into()),
            }
        } else {
            None
        };

        let source_language = overrides
            .source_locale
            .unwrap_or_else(|| config.source_language().to_string());
        xliff_merge_toml::parse_language(&source_language).map_err(|err| {
            InvalidSourceLocaleError {
                locale: source_language.clone(),
                help: err.to_string(),
            }
        })?;

        Ok(Self {
            locale_dir: overrides.path.unwrap_or_else(|| config.locale_dir()),
            source_language,
            file_prefix: overrides
                .prefix
                .unwrap_or_else(|| config.file_prefix().to_string()),
            api_key,
            fail_fast: overrides.fail_fast || config.fail_fast.unwrap_or(false),
        })
    }
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<MergeConfig, CliError> {
    let result = match explicit {
        Some(path) => MergeConfig::read_from_path(path).map_err(|err| match err {
            MergeConfigError::NotFound => CliError::from(ConfigNotFoundError {
                path: path.to_path_buf(),
            }),
            other => parse_error(path, other),
        }),
        None => MergeConfig::discover(cwd)
            .map(Option::unwrap_or_default)
            .map_err(|err| parse_error(&cwd.join(xliff_merge_toml::CONFIG_FILE_NAME), err)),
    };

    if let Ok(config) = &result {
        tracing::debug!(?config, "resolved configuration");
    }
    result
}

fn parse_error(path: &Path, err: MergeConfigError) -> CliError {
    ConfigParseError {
        path: path.to_path_buf(),
        help: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_defaults() {
        let temp_dir = tempdir().unwrap();

        let settings = SyncSettings::resolve(SettingOverrides::default(), temp_dir.path()).unwrap();

        assert_eq!(settings.locale_dir, PathBuf::from("angular/src/locale"));
        assert_eq!(settings.source_language, "en");
        assert_eq!(settings.file_prefix, "messages");
        assert_eq!(settings.api_key, None);
        assert!(!settings.fail_fast);
    }

    #[test]
    fn test_resolve_missing_api_key_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let overrides = SettingOverrides {
            google_translate: true,
            api_key: Some("  ".to_string()),
            ..SettingOverrides::default()
        };

        let result = SyncSettings::resolve(overrides, temp_dir.path());

        assert!(matches!(result, Err(CliError::MissingApiKey(_))));
    }

    #[test]
    fn test_resolve_api_key_ignored_without_translation() {
        let temp_dir = tempdir().unwrap();
        let overrides = SettingOverrides {
            api_key: Some("secret".to_string()),
            ..SettingOverrides::default()
        };

        let settings = SyncSettings::resolve(overrides, temp_dir.path()).unwrap();

        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn test_resolve_config_file_and_flag_precedence() {
        let temp_dir = tempdir().unwrap();
        fs_err::write(
            temp_dir.path().join("xliff-merge.toml"),
            "path = \"i18n\"\nsource_language = \"de\"\ngoogle_translate = true\n",
        )
        .unwrap();
        let overrides = SettingOverrides {
            source_locale: Some("fr".to_string()),
            api_key: Some("secret".to_string()),
            ..SettingOverrides::default()
        };

        let settings = SyncSettings::resolve(overrides, temp_dir.path()).unwrap();

        assert_eq!(settings.locale_dir, PathBuf::from("i18n"));
        assert_eq!(settings.source_language, "fr");
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_resolve_config_requires_key_when_enabled_in_file() {
        let temp_dir = tempdir().unwrap();
        fs_err::write(
            temp_dir.path().join("xliff-merge.toml"),
            "google_translate = true\n",
        )
        .unwrap();

        let result = SyncSettings::resolve(SettingOverrides::default(), temp_dir.path());

        assert!(matches!(result, Err(CliError::MissingApiKey(_))));
    }

    #[test]
    fn test_resolve_explicit_config_missing() {
        let temp_dir = tempdir().unwrap();
        let overrides = SettingOverrides {
            config: Some(temp_dir.path().join("nope.toml")),
            ..SettingOverrides::default()
        };

        let result = SyncSettings::resolve(overrides, temp_dir.path());

        assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
    }

    #[test]
    fn test_resolve_rejects_invalid_source_locale_flag() {
        let temp_dir = tempdir().unwrap();
        let overrides = SettingOverrides {
            source_locale: Some("not a lang!".to_string()),
            ..SettingOverrides::default()
        };

        let result = SyncSettings::resolve(overrides, temp_dir.path());

        match result {
            Err(CliError::InvalidSourceLocale(err)) => assert_eq!(err.locale, "not a lang!"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_invalid_config() {
        let temp_dir = tempdir().unwrap();
        fs_err::write(temp_dir.path().join("xliff-merge.toml"), "path = [").unwrap();

        let result = SyncSettings::resolve(SettingOverrides::default(), temp_dir.path());

        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }
}
