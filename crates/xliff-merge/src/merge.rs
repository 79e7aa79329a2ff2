//! Rebuilds a target-locale catalog from the authoritative catalog.
//!
//! Every authoritative unit ends up in the output exactly once and in the same
//! order. For each unit the target text comes from, in order of precedence:
//!
//! 1. the previous catalog of the locale, if it had a `<target>` for the id;
//! 2. the [`Translator`], if one is configured and the source has no `{`;
//! 3. the source text itself, marked [`State::Initial`].

use crate::model::{Catalog, FileGroup, State, Unit};
use crate::translate::Translator;
use std::collections::{HashMap, HashSet};

/// Character whose presence in the source text disables machine translation.
///
/// Interpolations and ICU expressions must not be sent to the translator.
pub const TRANSLATION_GUARD: char = '{';

/// Per-locale counters describing how each unit was resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Units whose previous translation was kept.
    pub retained: usize,
    /// Units filled by the translator.
    pub translated: usize,
    /// Units filled with the source text.
    pub untranslated: usize,
    /// Ids of the previous catalog that no longer exist in the authoritative one.
    pub dropped: usize,
}

impl MergeStats {
    pub fn total(&self) -> usize {
        self.retained + self.translated + self.untranslated
    }

    /// Add another locale's counters into this one.
    pub fn absorb(&mut self, other: &MergeStats) {
        self.retained += other.retained;
        self.translated += other.translated;
        self.untranslated += other.untranslated;
        self.dropped += other.dropped;
    }
}

/// The merged catalog with its statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub stats: MergeStats,
}

/// Merge `previous` into the structure of `authoritative` for `target_locale`.
///
/// When `target_locale` is the authoritative catalog's own language, the
/// authoritative catalog is returned with only its target language set.
pub fn merge(
    authoritative: &Catalog,
    previous: &Catalog,
    target_locale: &str,
    translator: Option<&dyn Translator>,
) -> MergeOutcome {
    if target_locale == authoritative.source_language {
        return passthrough(authoritative, target_locale);
    }

    let index = correlation_index(previous, target_locale);
    let mut stats = MergeStats::default();

    let units = authoritative
        .file
        .units
        .iter()
        .map(|unit| {
            let previous = index.get(unit.id.as_str()).copied();
            resolve_unit(unit, previous, target_locale, translator, &mut stats)
        })
        .collect();

    let live: HashSet<&str> = authoritative
        .file
        .units
        .iter()
        .map(|u| u.id.as_str())
        .collect();
    stats.dropped = index.keys().filter(|id| !live.contains(*id)).count();

    tracing::debug!(
        locale = target_locale,
        retained = stats.retained,
        translated = stats.translated,
        untranslated = stats.untranslated,
        dropped = stats.dropped,
        "merged catalog"
    );

    MergeOutcome {
        catalog: Catalog {
            version: authoritative.version.clone(),
            xmlns: authoritative.xmlns.clone(),
            source_language: authoritative.source_language.clone(),
            target_language: Some(target_locale.to_string()),
            file: FileGroup {
                original: authoritative.file.original.clone(),
                id: authoritative.file.id.clone(),
                units,
            },
        },
        stats,
    }
}

/// Copy the authoritative catalog unchanged except for its target language.
///
/// Used for the catalog of the source locale itself, whose units must never
/// be translated or given a `<target>`.
pub fn passthrough(authoritative: &Catalog, locale: &str) -> MergeOutcome {
    let mut catalog = authoritative.clone();
    catalog.target_language = Some(locale.to_string());
    MergeOutcome {
        stats: MergeStats {
            retained: catalog.file.units.len(),
            ..MergeStats::default()
        },
        catalog,
    }
}

/// Map each id of the previous catalog to its unit. Later duplicates win.
fn correlation_index<'a>(previous: &'a Catalog, locale: &str) -> HashMap<&'a str, &'a Unit> {
    let mut index = HashMap::with_capacity(previous.file.units.len());
    for unit in &previous.file.units {
        if index.insert(unit.id.as_str(), unit).is_some() {
            tracing::warn!(locale, id = %unit.id, "duplicate unit id, keeping the last one");
        }
    }
    index
}

fn resolve_unit(
    unit: &Unit,
    previous: Option<&Unit>,
    target_locale: &str,
    translator: Option<&dyn Translator>,
    stats: &mut MergeStats,
) -> Unit {
    let mut target = String::new();
    let mut state = None;
    let mut retained = false;

    if let Some(prev) = previous
        && let Some(prev_target) = &prev.target
    {
        target.clone_from(prev_target);
        state.clone_from(&prev.state);
        retained = true;
    } else if let Some(translator) = translator
        && !unit.source.contains(TRANSLATION_GUARD)
    {
        match translator.translate(&unit.source, target_locale) {
            Ok(text) => {
                target = text;
                state = Some(State::NotChecked);
            },
            Err(err) => {
                tracing::debug!(
                    locale = target_locale,
                    id = %unit.id,
                    error = %err,
                    "translation failed"
                );
            },
        }
    }

    if target.is_empty() {
        target.clone_from(&unit.source);
        state = Some(State::Initial);
        stats.untranslated += 1;
    } else if retained {
        stats.retained += 1;
    } else {
        stats.translated += 1;
    }

    Unit {
        id: unit.id.clone(),
        source: unit.source.clone(),
        target: Some(target),
        state,
    }
}
