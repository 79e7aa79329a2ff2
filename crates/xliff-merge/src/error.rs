use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing XLIFF documents.
#[derive(Debug, Error)]
pub enum XliffError {
    /// Failed to read or write a catalog file.
    #[error("failed to access catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    /// An attribute could not be parsed or unescaped.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    /// The document has no `<xliff>` root element.
    #[error("missing <xliff> root element")]
    MissingRoot,
    /// The document ended before all elements were closed.
    #[error("document ends before all elements are closed")]
    Truncated,
    /// The document holds more than one `<file>` element.
    #[error("expected exactly one <file> element, found another at byte {position}")]
    MultipleFileGroups {
        /// Byte offset of the extra `<file>` element.
        position: u64,
    },
    /// A required attribute is missing on an element.
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    /// A unit has no `<segment>` with a `<source>`.
    #[error("unit '{id}' has no <segment><source>")]
    MissingSource { id: String },
    /// A catalog file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: Box<XliffError>,
    },
}

impl XliffError {
    /// Attach the catalog path to a parse error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            XliffError::Io(_) | XliffError::Catalog { .. } => self,
            other => XliffError::Catalog {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<quick_xml::Error> for XliffError {
    fn from(source: quick_xml::Error) -> Self {
        XliffError::Xml {
            position: 0,
            source,
        }
    }
}
