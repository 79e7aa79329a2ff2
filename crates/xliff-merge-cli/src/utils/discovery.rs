//! Locale discovery from catalog file names.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

const CATALOG_EXTENSION: &str = "xlf";

/// Path of the catalog file for `locale`: `<dir>/<prefix>.<locale>.xlf`.
pub fn catalog_path(dir: &Path, prefix: &str, locale: &str) -> PathBuf {
    dir.join(format!("{prefix}.{locale}.{CATALOG_EXTENSION}"))
}

/// Find all locales with a `<prefix>.<locale>.xlf` file in `dir`.
///
/// Returns a sorted list of locale codes. Other files are ignored.
pub fn discover_locales(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let mut locales = Vec::new();

    let entries = fs_err::read_dir(dir).context("Failed to read locale directory")?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && let Some(locale) = locale_from_file_name(name, prefix)
        {
            locales.push(locale.to_string());
        }
    }

    locales.sort();
    locales.dedup();
    tracing::debug!(dir = %dir.display(), ?locales, "discovered locales");
    Ok(locales)
}

/// Extract the locale segment from `<prefix>.<locale>.xlf`.
fn locale_from_file_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let locale = name
        .strip_prefix(prefix)?
        .strip_prefix('.')?
        .strip_suffix(CATALOG_EXTENSION)?
        .strip_suffix('.')?;

    (!locale.is_empty() && !locale.contains('.')).then_some(locale)
}
