//! In-memory representation of an XLIFF 2.0 catalog.

use std::fmt;
use std::str::FromStr;

/// Default `version` attribute written on new catalogs.
pub const XLIFF_VERSION: &str = "2.0";

/// Default XLIFF 2.0 namespace.
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.0";

/// A catalog of translation units for one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// The `version` attribute of the root element.
    pub version: String,
    /// The `xmlns` attribute of the root element.
    pub xmlns: String,
    /// The `srcLang` attribute.
    pub source_language: String,
    /// The `trgLang` attribute, absent for the authoritative catalog.
    pub target_language: Option<String>,
    /// The single `<file>` group of the document.
    pub file: FileGroup,
}

/// The `<file>` element holding the ordered units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileGroup {
    /// Opaque `original` attribute.
    pub original: String,
    /// Opaque `id` attribute.
    pub id: String,
    pub units: Vec<Unit>,
}

/// One translatable segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Unit {
    /// Stable identifier, the correlation key across locales.
    pub id: String,
    /// Raw inner markup of `<source>`.
    pub source: String,
    /// Raw inner markup of `<target>`. `None` when the element is missing.
    pub target: Option<String>,
    pub state: Option<State>,
}

impl Unit {
    /// Create a unit with only a source text, as found in an authoritative catalog.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: None,
            state: None,
        }
    }

    /// Builder-style setter for the target text and state.
    pub fn with_target(mut self, target: impl Into<String>, state: Option<State>) -> Self {
        self.target = Some(target.into());
        self.state = state;
        self
    }
}

/// Translation status marker of a unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// The source text was copied as a placeholder.
    Initial,
    /// The text was produced by machine translation and awaits review.
    NotChecked,
    /// A reviewed translation.
    Final,
    /// Any other marker found in an existing catalog, kept verbatim.
    Other(String),
}

impl State {
    pub fn as_str(&self) -> &str {
        match self {
            State::Initial => "initial",
            State::NotChecked => "not-checked",
            State::Final => "final",
            State::Other(other) => other,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "initial" => State::Initial,
            "not-checked" => State::NotChecked,
            "final" => State::Final,
            other => State::Other(other.to_string()),
        })
    }
}

impl From<&str> for State {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(state) => state,
            Err(never) => match never {},
        }
    }
}

impl Catalog {
    /// Create an empty catalog with the default version and namespace.
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            version: XLIFF_VERSION.to_string(),
            xmlns: XLIFF_NAMESPACE.to_string(),
            source_language: source_language.into(),
            target_language: None,
            file: FileGroup::default(),
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.file.units
    }
}
