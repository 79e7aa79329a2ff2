use crate::core::{LocaleFailure, LocaleLoadError, LocaleWriteError};
use crate::utils::catalog_path;
use std::path::{Path, PathBuf};
use std::time::Instant;
use unic_langid::LanguageIdentifier;
use xliff_merge::xliff::{read_catalog, write_catalog};
use xliff_merge::{Catalog, MergeStats, Translator, merge, passthrough};

/// Everything a locale needs from the run, shared across locales.
pub(super) struct SyncContext<'a> {
    pub(super) locale_dir: &'a Path,
    pub(super) file_prefix: &'a str,
    /// Locale whose file holds the authoritative catalog.
    pub(super) source_locale: &'a str,
    pub(super) authoritative: &'a Catalog,
    pub(super) translator: Option<&'a dyn Translator>,
    pub(super) dry_run: bool,
}

/// Result of syncing a single locale.
#[derive(Debug)]
pub(super) struct SyncLocaleResult {
    /// The locale that was synced.
    pub(super) locale: String,
    /// How the units of the locale were resolved.
    pub(super) stats: MergeStats,
    /// Whether the serialized catalog differs from the file on disk.
    pub(super) changed: bool,
    /// Diff info (original, new) if dry run and changed.
    pub(super) diff_info: Option<(String, String)>,
}

/// Load, merge and write the catalog of one locale.
pub(super) fn sync_locale(
    ctx: &SyncContext<'_>,
    locale: &str,
) -> Result<SyncLocaleResult, LocaleFailure> {
    let path = catalog_path(ctx.locale_dir, ctx.file_prefix, locale);
    let start = Instant::now();

    let existing_content = fs_err::read_to_string(&path)
        .map_err(|err| load_failure(locale, &path, err.to_string()))?;

    let outcome = if locale == ctx.source_locale {
        passthrough(ctx.authoritative, locale)
    } else {
        locale.parse::<LanguageIdentifier>().map_err(|err| {
            load_failure(
                locale,
                &path,
                format!("invalid locale identifier '{locale}': {err}"),
            )
        })?;
        let previous = read_catalog(&existing_content)
            .map_err(|err| load_failure(locale, &path, err.to_string()))?;
        merge(ctx.authoritative, &previous, locale, ctx.translator)
    };

    let content = write_catalog(&outcome.catalog)
        .map_err(|err| write_failure(locale, &path, err.to_string()))?;
    let changed = content != existing_content;

    if changed && !ctx.dry_run {
        fs_err::write(&path, &content)
            .map_err(|err| write_failure(locale, &path, err.to_string()))?;
    }

    tracing::debug!(locale, changed, elapsed = ?start.elapsed(), "synced locale");

    let diff_info = (ctx.dry_run && changed).then(|| (existing_content, content));

    Ok(SyncLocaleResult {
        locale: locale.to_string(),
        stats: outcome.stats,
        changed,
        diff_info,
    })
}

fn load_failure(locale: &str, path: &Path, help: String) -> LocaleFailure {
    LocaleLoadError {
        locale: locale.to_string(),
        path: PathBuf::from(path),
        help,
    }
    .into()
}

fn write_failure(locale: &str, path: &Path, help: String) -> LocaleFailure {
    LocaleWriteError {
        locale: locale.to_string(),
        path: PathBuf::from(path),
        help,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use tempfile::tempdir;
    use xliff_merge::{FnTranslator, State, Unit};

    const FR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="2.0" xmlns="urn:oasis:names:tc:xliff:document:2.0" srcLang="en" trgLang="fr">
  <file original="ng.template" id="ngi18n">
    <unit id="a">
      <segment>
        <source>Hello</source>
        <target>Bonjour</target>
        <state>final</state>
      </segment>
    </unit>
    <unit id="stale">
      <segment>
        <source>Gone</source>
        <target>Parti</target>
      </segment>
    </unit>
  </file>
</xliff>"#;

    fn authoritative() -> Catalog {
        let mut catalog = Catalog::new("en");
        catalog.file.original = "ng.template".to_string();
        catalog.file.id = "ngi18n".to_string();
        catalog.file.units = vec![
            Unit::new("a", "Hello"),
            Unit::new("b", "Bye {name}"),
            Unit::new("c", "Submit"),
        ];
        catalog
    }

    fn context<'a>(
        dir: &'a Path,
        authoritative: &'a Catalog,
        translator: Option<&'a dyn Translator>,
        dry_run: bool,
    ) -> SyncContext<'a> {
        SyncContext {
            locale_dir: dir,
            file_prefix: "messages",
            source_locale: "en",
            authoritative,
            translator,
            dry_run,
        }
    }

    #[test]
    fn test_sync_locale_writes_merged_catalog() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("messages.fr.xlf");
        fs::write(&path, FR).unwrap();
        let authoritative = authoritative();
        let translator = FnTranslator::new(|_, _| Ok("Envoyer".to_string()));

        let ctx = context(temp_dir.path(), &authoritative, Some(&translator), false);
        let result = sync_locale(&ctx, "fr").unwrap();

        assert!(result.changed);
        assert!(result.diff_info.is_none());
        assert_eq!(result.stats.retained, 1);
        assert_eq!(result.stats.translated, 1);
        assert_eq!(result.stats.untranslated, 1);
        assert_eq!(result.stats.dropped, 1);

        let written = xliff_merge::xliff::load_catalog(&path).unwrap();
        let units = written.units();
        assert_eq!(written.target_language.as_deref(), Some("fr"));
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].target.as_deref(), Some("Bonjour"));
        assert_eq!(units[1].state, Some(State::Initial));
        assert_eq!(units[2].target.as_deref(), Some("Envoyer"));
        assert_eq!(units[2].state, Some(State::NotChecked));
    }

    #[test]
    fn test_sync_locale_second_run_is_unchanged() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("messages.fr.xlf"), FR).unwrap();
        let authoritative = authoritative();
        let ctx = context(temp_dir.path(), &authoritative, None, false);

        assert!(sync_locale(&ctx, "fr").unwrap().changed);
        assert!(!sync_locale(&ctx, "fr").unwrap().changed);
    }

    #[test]
    fn test_sync_locale_dry_run_leaves_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("messages.fr.xlf");
        fs::write(&path, FR).unwrap();
        let authoritative = authoritative();

        let ctx = context(temp_dir.path(), &authoritative, None, true);
        let result = sync_locale(&ctx, "fr").unwrap();

        assert!(result.changed);
        let (before, after) = result.diff_info.unwrap();
        assert_eq!(before, FR);
        assert!(after.contains("<unit id=\"c\">"));
        assert_eq!(fs::read_to_string(&path).unwrap(), FR);
    }

    #[test]
    fn test_sync_locale_source_language_is_passthrough() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("messages.en.xlf");
        fs::write(&path, "not parsed").unwrap();
        let authoritative = authoritative();

        let ctx = context(temp_dir.path(), &authoritative, None, false);
        sync_locale(&ctx, "en").unwrap();

        let mut expected = authoritative.clone();
        expected.target_language = Some("en".to_string());
        assert_eq!(xliff_merge::xliff::load_catalog(&path).unwrap(), expected);
    }

    #[test]
    fn test_sync_locale_malformed_catalog_is_load_failure() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("messages.es.xlf");
        fs::write(&path, "<xliff><file>").unwrap();
        let authoritative = authoritative();

        let ctx = context(temp_dir.path(), &authoritative, None, false);
        let failure = sync_locale(&ctx, "es").unwrap_err();

        assert!(failure.is_load());
        assert_eq!(failure.locale(), "es");
        assert_eq!(fs::read_to_string(&path).unwrap(), "<xliff><file>");
    }

    #[test]
    fn test_sync_locale_missing_file_is_load_failure() {
        let temp_dir = tempdir().unwrap();
        let authoritative = authoritative();

        let ctx = context(temp_dir.path(), &authoritative, None, false);
        assert!(sync_locale(&ctx, "it").unwrap_err().is_load());
    }

    #[test]
    fn test_sync_locale_source_file_with_regional_src_lang() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("messages.en.xlf");
        fs::write(
            &path,
            r#"<xliff version="2.0" srcLang="en-US"><file id="f"><unit id="a"><segment><source>Hi</source></segment></unit></file></xliff>"#,
        )
        .unwrap();
        let authoritative = xliff_merge::xliff::load_catalog(&path).unwrap();
        let calls = Cell::new(0);
        let translator = FnTranslator::new(|text, _| {
            calls.set(calls.get() + 1);
            Ok(format!("translated {text}"))
        });

        let ctx = context(temp_dir.path(), &authoritative, Some(&translator), false);
        let result = sync_locale(&ctx, "en").unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(result.stats.retained, 1);
        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("<target>"));
        assert!(written.contains(r#"srcLang="en-US" trgLang="en""#));
    }

    #[test]
    fn test_sync_locale_invalid_locale_is_load_failure() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("messages.not_a_locale!.xlf"), FR).unwrap();
        let authoritative = authoritative();

        let ctx = context(temp_dir.path(), &authoritative, None, false);
        let failure = sync_locale(&ctx, "not_a_locale!").unwrap_err();

        assert!(failure.is_load());
        match failure {
            LocaleFailure::Load(err) => {
                assert!(err.help.starts_with("invalid locale identifier 'not_a_locale!'"));
                assert!(!err.help.contains("source language"));
            },
            other => panic!("unexpected failure: {other:?}"),
        }
    }
}
