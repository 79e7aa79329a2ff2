//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Error when an explicitly given configuration file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {path}")]
#[diagnostic(
    code(xliff_merge::config::not_found),
    help("Check the --config path, or drop the flag to use ./xliff-merge.toml when present")
)]
pub struct ConfigNotFoundError {
    /// The path that was given.
    pub path: PathBuf,
}

/// Error when reading or parsing xliff-merge.toml.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load configuration from {path}")]
#[diagnostic(code(xliff_merge::config::parse_error))]
pub struct ConfigParseError {
    /// The configuration file.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when the source locale is not a valid language identifier.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid source locale '{locale}'")]
#[diagnostic(code(xliff_merge::config::invalid_source_locale))]
pub struct InvalidSourceLocaleError {
    /// The rejected locale.
    pub locale: String,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when automatic translation is requested without a credential.
#[derive(Debug, Diagnostic, Error)]
#[error("Google Translate API key is required when --google-translate is set")]
#[diagnostic(
    code(xliff_merge::translate::missing_api_key),
    help("Pass --api-key <KEY> or set the GOOGLE_TRANSLATE_API_KEY environment variable")
)]
pub struct MissingApiKeyError;

/// Error when the translation client cannot be created.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to create the translation client")]
#[diagnostic(code(xliff_merge::translate::client))]
pub struct TranslatorSetupError {
    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when the locale directory cannot be scanned.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to scan locale directory {path}")]
#[diagnostic(code(xliff_merge::discovery::scan_failed))]
pub struct LocaleDirError {
    /// The locale directory.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when a requested locale has no catalog file.
#[derive(Debug, Diagnostic, Error)]
#[error("locale '{locale}' not found")]
#[diagnostic(
    code(xliff_merge::discovery::locale_not_found),
    help("Available locales: {available}")
)]
pub struct LocaleNotFoundError {
    /// The locale that was requested.
    pub locale: String,
    /// Comma-separated list of discovered locales.
    pub available: String,
}

/// Error when the authoritative catalog cannot be loaded.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load source catalog {path}")]
#[diagnostic(code(xliff_merge::source::load_failed))]
pub struct SourceCatalogError {
    /// The source catalog path.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// A locale catalog that could not be read or parsed.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load catalog for locale '{locale}' ({path})")]
#[diagnostic(code(xliff_merge::sync::load_failed), severity(Error))]
pub struct LocaleLoadError {
    /// The locale being synced.
    pub locale: String,
    /// The catalog path.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// A merged catalog that could not be written.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to write catalog for locale '{locale}' ({path})")]
#[diagnostic(code(xliff_merge::sync::write_failed), severity(Error))]
pub struct LocaleWriteError {
    /// The locale being synced.
    pub locale: String,
    /// The catalog path.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// A per-locale failure. The run continues past these unless fail-fast is set.
#[derive(Debug, Diagnostic, Error)]
pub enum LocaleFailure {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LocaleLoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] LocaleWriteError),
}

impl LocaleFailure {
    pub fn locale(&self) -> &str {
        match self {
            LocaleFailure::Load(e) => &e.locale,
            LocaleFailure::Write(e) => &e.locale,
        }
    }

    pub fn is_load(&self) -> bool {
        matches!(self, LocaleFailure::Load(_))
    }
}

/// Report for a sync run in which some locales failed.
#[derive(Debug, Diagnostic, Error)]
#[error("sync failed for {failed_count} of {locale_count} locale(s)")]
#[diagnostic(code(xliff_merge::sync::report))]
pub struct SyncFailedReport {
    /// Number of locales that failed.
    pub failed_count: usize,

    /// Number of locales processed.
    pub locale_count: usize,

    /// The individual failures.
    #[related]
    pub failures: Vec<LocaleFailure>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidSourceLocale(#[from] InvalidSourceLocaleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingApiKey(#[from] MissingApiKeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TranslatorSetup(#[from] TranslatorSetupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleDir(#[from] LocaleDirError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleNotFound(#[from] LocaleNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SourceCatalog(#[from] SourceCatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SyncFailed(#[from] SyncFailedReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_failure_accessors() {
        let failure = LocaleFailure::from(LocaleLoadError {
            locale: "fr".to_string(),
            path: PathBuf::from("messages.fr.xlf"),
            help: "boom".to_string(),
        });

        assert_eq!(failure.locale(), "fr");
        assert!(failure.is_load());
        assert_eq!(
            failure.to_string(),
            "failed to load catalog for locale 'fr' (messages.fr.xlf)"
        );
    }

    #[test]
    fn test_sync_failed_report_message() {
        let report = SyncFailedReport {
            failed_count: 1,
            locale_count: 3,
            failures: vec![LocaleFailure::from(LocaleWriteError {
                locale: "de".to_string(),
                path: PathBuf::from("messages.de.xlf"),
                help: "read-only".to_string(),
            })],
        };

        assert_eq!(report.to_string(), "sync failed for 1 of 3 locale(s)");
        assert!(!report.failures[0].is_load());
    }
}
