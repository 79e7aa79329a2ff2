use crate::error::XliffError;
use crate::model::{Catalog, Unit};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const INDENT_SIZE: usize = 2;

/// Serialize a catalog with an XML declaration and 2-space indentation.
///
/// Text content is written back as raw markup, mirroring [`super::read_catalog`].
pub fn write_catalog(catalog: &Catalog) -> Result<String, XliffError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("xliff");
    root.push_attribute(("version", catalog.version.as_str()));
    root.push_attribute(("xmlns", catalog.xmlns.as_str()));
    root.push_attribute(("srcLang", catalog.source_language.as_str()));
    if let Some(target) = catalog.target_language.as_deref() {
        root.push_attribute(("trgLang", target));
    }
    writer.write_event(Event::Start(root))?;

    let mut file = BytesStart::new("file");
    file.push_attribute(("original", catalog.file.original.as_str()));
    file.push_attribute(("id", catalog.file.id.as_str()));
    writer.write_event(Event::Start(file))?;

    for unit in &catalog.file.units {
        write_unit(&mut writer, unit)?;
    }

    writer.write_event(Event::End(BytesEnd::new("file")))?;
    writer.write_event(Event::End(BytesEnd::new("xliff")))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_unit(writer: &mut Writer<Vec<u8>>, unit: &Unit) -> Result<(), XliffError> {
    let mut start = BytesStart::new("unit");
    start.push_attribute(("id", unit.id.as_str()));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Start(BytesStart::new("segment")))?;

    write_raw(writer, "source", &unit.source)?;
    if let Some(target) = &unit.target {
        write_raw(writer, "target", target)?;
    }
    if let Some(state) = &unit.state {
        write_raw(writer, "state", state.as_str())?;
    }

    writer.write_event(Event::End(BytesEnd::new("segment")))?;
    writer.write_event(Event::End(BytesEnd::new("unit")))?;
    Ok(())
}

/// Write `<name>raw</name>` on a single line without escaping `raw`.
fn write_raw(writer: &mut Writer<Vec<u8>>, name: &str, raw: &str) -> Result<(), XliffError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(raw)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
