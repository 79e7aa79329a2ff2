use crate::error::XliffError;
use crate::model::{Catalog, FileGroup, State, Unit};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Unit being assembled while its children are read.
struct PendingUnit {
    id: String,
    source: Option<String>,
    target: Option<String>,
    state: Option<String>,
    segment_state: Option<String>,
}

impl PendingUnit {
    fn new(id: String) -> Self {
        Self {
            id,
            source: None,
            target: None,
            state: None,
            segment_state: None,
        }
    }

    fn finish(self) -> Result<Unit, XliffError> {
        let source = self.source.ok_or(XliffError::MissingSource {
            id: self.id.clone(),
        })?;
        Ok(Unit {
            id: self.id,
            source,
            target: self.target,
            state: self.state.or(self.segment_state).map(|s| State::from(s.as_str())),
        })
    }
}

/// Parse an XLIFF 2.0 document.
///
/// Inner markup of `<source>`, `<target>` and `<state>` is kept verbatim.
/// Elements the catalog does not model are skipped.
pub fn read_catalog(input: &str) -> Result<Catalog, XliffError> {
    let mut reader = Reader::from_str(input);

    let mut catalog: Option<Catalog> = None;
    let mut file: Option<FileGroup> = None;
    let mut units = Vec::new();
    let mut unit: Option<PendingUnit> = None;
    let mut in_segment = false;
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|source| xml_error(&reader, source))?;

        match event {
            Event::Start(e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"xliff" => catalog = Some(read_root(&e)?),
                    b"file" => file = Some(read_file(&e, file.is_some(), &reader)?),
                    b"unit" => unit = Some(PendingUnit::new(required_attr(&e, "unit", "id")?)),
                    b"segment" => {
                        in_segment = true;
                        if let Some(pending) = unit.as_mut() {
                            pending.segment_state = optional_attr(&e, b"state")?;
                        }
                    },
                    name @ (b"source" | b"target" | b"state") if in_segment => {
                        let text = reader
                            .read_text(e.name())
                            .map_err(|source| xml_error(&reader, source))?
                            .into_owned();
                        depth -= 1;
                        if let Some(pending) = unit.as_mut() {
                            match name {
                                b"source" => pending.source = Some(text),
                                b"target" => pending.target = Some(text),
                                _ => pending.state = Some(text),
                            }
                        }
                    },
                    b"ignorable" | b"notes" | b"originalData" => {
                        reader
                            .read_to_end(e.name())
                            .map_err(|source| xml_error(&reader, source))?;
                        depth -= 1;
                    },
                    _ => {},
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"xliff" => catalog = Some(read_root(&e)?),
                b"file" => file = Some(read_file(&e, file.is_some(), &reader)?),
                b"unit" => {
                    return Err(XliffError::MissingSource {
                        id: required_attr(&e, "unit", "id")?,
                    });
                },
                b"segment" => {
                    if let Some(pending) = unit.as_mut() {
                        pending.segment_state = optional_attr(&e, b"state")?;
                    }
                },
                name @ (b"source" | b"target") if in_segment => {
                    if let Some(pending) = unit.as_mut() {
                        if name == b"source" {
                            pending.source = Some(String::new());
                        } else {
                            pending.target = Some(String::new());
                        }
                    }
                },
                _ => {},
            },
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"segment" => in_segment = false,
                    b"unit" => {
                        if let Some(pending) = unit.take() {
                            units.push(pending.finish()?);
                        }
                    },
                    _ => {},
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if depth != 0 {
        return Err(XliffError::Truncated);
    }

    let mut catalog = catalog.ok_or(XliffError::MissingRoot)?;
    catalog.file = file.unwrap_or_default();
    catalog.file.units = units;
    Ok(catalog)
}

fn read_root(e: &BytesStart<'_>) -> Result<Catalog, XliffError> {
    Ok(Catalog {
        version: optional_attr(e, b"version")?.unwrap_or_default(),
        xmlns: optional_attr(e, b"xmlns")?.unwrap_or_default(),
        source_language: optional_attr(e, b"srcLang")?.unwrap_or_default(),
        target_language: optional_attr(e, b"trgLang")?.filter(|lang| !lang.is_empty()),
        file: FileGroup::default(),
    })
}

fn read_file(
    e: &BytesStart<'_>,
    seen: bool,
    reader: &Reader<&[u8]>,
) -> Result<FileGroup, XliffError> {
    if seen {
        return Err(XliffError::MultipleFileGroups {
            position: position(reader),
        });
    }
    Ok(FileGroup {
        original: optional_attr(e, b"original")?.unwrap_or_default(),
        id: optional_attr(e, b"id")?.unwrap_or_default(),
        units: Vec::new(),
    })
}

fn optional_attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, XliffError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(|source| XliffError::Xml {
                position: 0,
                source,
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, XliffError> {
    optional_attr(e, attribute.as_bytes())?
        .ok_or(XliffError::MissingAttribute { element, attribute })
}

fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> XliffError {
    XliffError::Xml {
        position: position(reader),
        source,
    }
}

fn position(reader: &Reader<&[u8]>) -> u64 {
    reader.buffer_position()
}
