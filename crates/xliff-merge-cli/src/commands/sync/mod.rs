//! Sync command for rebuilding every locale catalog from the source catalog.
//!
//! Existing translations are kept, new units are machine translated when
//! enabled, and everything else falls back to the source text.

mod locale;

use crate::core::{
    CliError, LocaleDirError, LocaleFailure, LocaleNotFoundError, SettingOverrides,
    SourceCatalogError, SyncFailedReport, SyncSettings, TranslatorSetupError,
};
use crate::provider::GoogleTranslator;
use crate::utils::{catalog_path, discover_locales, ui};
use clap::Parser;
use locale::{SyncContext, sync_locale};
use std::path::{Path, PathBuf};
use std::time::Instant;
use xliff_merge::xliff::load_catalog;
use xliff_merge::{MergeStats, Translator};

/// Arguments for the sync command.
#[derive(Debug, Parser)]
pub struct SyncArgs {
    /// Directory containing the `<prefix>.<locale>.xlf` files [default: angular/src/locale].
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Locale of the authoritative catalog [default: en].
    #[arg(short, long)]
    pub source_locale: Option<String>,

    /// File name prefix of the catalogs [default: messages].
    #[arg(long)]
    pub prefix: Option<String>,

    /// Use Google Translate to translate new units.
    #[arg(short, long, alias = "googleTranslate")]
    pub google_translate: bool,

    /// Google Translate API key, required with --google-translate.
    #[arg(long, alias = "apikey", env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Specific locale(s) to sync (can be specified multiple times).
    #[arg(short, long)]
    pub locale: Vec<String>,

    /// Dry run - show what would change without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first locale whose catalog cannot be loaded.
    #[arg(long)]
    pub fail_fast: bool,

    /// Path to the configuration file [default: ./xliff-merge.toml if present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Deterministic output for end-to-end tests.
    #[arg(long, hide = true)]
    pub e2e: bool,
}

impl SyncArgs {
    fn overrides(&self) -> SettingOverrides {
        SettingOverrides {
            config: self.config.clone(),
            path: self.path.clone(),
            source_locale: self.source_locale.clone(),
            prefix: self.prefix.clone(),
            google_translate: self.google_translate,
            api_key: self.api_key.clone(),
            fail_fast: self.fail_fast,
        }
    }
}

/// Run the sync command.
pub fn run_sync(args: SyncArgs) -> Result<(), CliError> {
    if args.e2e {
        ui::set_e2e_mode(true);
    }

    let settings = SyncSettings::resolve(args.overrides(), Path::new("."))?;

    ui::print_sync_header();

    let translator = match &settings.api_key {
        Some(key) => {
            let translator = GoogleTranslator::new(key.as_str()).map_err(|err| {
                TranslatorSetupError {
                    help: err.to_string(),
                }
            })?;
            ui::print_translation_enabled();
            Some(translator)
        },
        None => None,
    };

    let available = discover_locales(&settings.locale_dir, &settings.file_prefix).map_err(
        |err| LocaleDirError {
            path: settings.locale_dir.clone(),
            help: format!("{err:#}"),
        },
    )?;

    if available.is_empty() {
        ui::print_no_locales_found(&settings.locale_dir);
        return Ok(());
    }

    let locales = select_locales(available, &args.locale)?;

    let source_path = catalog_path(
        &settings.locale_dir,
        &settings.file_prefix,
        &settings.source_language,
    );
    let authoritative = load_catalog(&source_path).map_err(|err| SourceCatalogError {
        path: source_path.clone(),
        help: err.to_string(),
    })?;

    ui::print_discovered(&locales, &settings.source_language);

    let ctx = SyncContext {
        locale_dir: &settings.locale_dir,
        file_prefix: &settings.file_prefix,
        source_locale: &settings.source_language,
        authoritative: &authoritative,
        translator: translator.as_ref().map(|t| t as &dyn Translator),
        dry_run: args.dry_run,
    };

    let start = Instant::now();
    let mut totals = MergeStats::default();
    let mut changed = 0;
    let mut unchanged = 0;
    let mut failures: Vec<LocaleFailure> = Vec::new();

    let pb = ui::create_progress_bar(locales.len() as u64, "Syncing locales...");

    for locale in &locales {
        pb.set_message(format!("Syncing {}", locale));

        match sync_locale(&ctx, locale) {
            Ok(result) => {
                totals.absorb(&result.stats);
                pb.suspend(|| {
                    if !result.changed {
                        unchanged += 1;
                        ui::print_unchanged(&result.locale);
                        return;
                    }
                    changed += 1;
                    if args.dry_run {
                        ui::print_would_update(&result.locale, &result.stats);
                        if let Some((old, new)) = &result.diff_info {
                            ui::print_diff(old, new);
                        }
                    } else {
                        ui::print_saved(&result.locale, &result.stats);
                    }
                });
            },
            Err(failure) => {
                pb.suspend(|| ui::print_locale_error(locale, &failure_detail(&failure)));
                let abort = settings.fail_fast && failure.is_load();
                failures.push(failure);
                if abort {
                    pb.finish_and_clear();
                    ui::print_fail_fast(locale);
                    return Err(report(failures, locales.len()));
                }
            },
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.dry_run {
        ui::print_sync_dry_run_summary(changed, &totals);
    } else {
        ui::print_sync_summary(changed, unchanged, &totals, start.elapsed());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(report(failures, locales.len()))
    }
}

/// Restrict the discovered locales to the requested ones, if any.
fn select_locales(available: Vec<String>, requested: &[String]) -> Result<Vec<String>, CliError> {
    if requested.is_empty() {
        return Ok(available);
    }

    for locale in requested {
        if !available.contains(locale) {
            ui::print_locale_not_found(locale, &available);
            return Err(CliError::LocaleNotFound(LocaleNotFoundError {
                locale: locale.clone(),
                available: available.join(", "),
            }));
        }
    }

    Ok(available
        .into_iter()
        .filter(|locale| requested.contains(locale))
        .collect())
}

fn failure_detail(failure: &LocaleFailure) -> String {
    match failure {
        LocaleFailure::Load(e) => e.help.clone(),
        LocaleFailure::Write(e) => e.help.clone(),
    }
}

fn report(failures: Vec<LocaleFailure>, locale_count: usize) -> CliError {
    SyncFailedReport {
        failed_count: failures.len(),
        locale_count,
        failures,
    }
    .into()
}
