//! DXF file reader

mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, DxfStreamReader, StreamItem};
pub use text_reader::DxfTextReader;

use crate::drawing::Drawing;
use crate::error::Result;
use crate::io::dxf::code_page::{encoding_for_code_page, uses_code_page};
use crate::io::dxf::codec::dispatch::{read_next_entity, read_next_object};
use crate::io::dxf::codec::{ReadContext, TraceScope};
use crate::io::dxf::config::DxfConfiguration;
use crate::notification::NotificationCollection;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a whole DXF stream into a [`Drawing`].
///
/// The HEADER section is scanned for `$ACADVER` and `$DWGCODEPAGE`; ENTITIES
/// and OBJECTS are decoded; every other section is skipped. A stream that
/// starts directly with `0 <ENTITY>` records, without section framing, is
/// read as a bare entity list under the configured version.
pub struct DxfReader<R: BufRead> {
    reader: DxfTextReader<R>,
    config: DxfConfiguration,
}

impl DxfReader<BufReader<File>> {
    /// Open a file for reading.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DxfTextReader::from_file(path)?))
    }
}

impl<R: BufRead> DxfReader<R> {
    /// Read from any buffered source.
    pub fn from_reader(reader: R) -> Self {
        Self::new(DxfTextReader::new(reader))
    }

    fn new(reader: DxfTextReader<R>) -> Self {
        Self {
            reader,
            config: DxfConfiguration::default(),
        }
    }

    /// Set the configuration. Its version applies until a `$ACADVER`
    /// header says otherwise.
    pub fn with_configuration(mut self, config: DxfConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Name attached to diagnostics.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.reader = self.reader.with_source_name(name);
        self
    }

    /// Read every section and return the drawing with its diagnostics.
    pub fn read(mut self) -> Result<Drawing> {
        let _scope = TraceScope::enter(&self.config, "read", "DRAWING");
        let mut notifications = NotificationCollection::new();
        let mut drawing = Drawing::new(self.config.version);
        let source = self.reader.source_name().map(str::to_string);
        {
            let mut ctx = ReadContext::new(self.config, &mut notifications).with_source(source.as_deref());
            while let Some(pair) = self.reader.read_pair()? {
                ctx.set_line(pair.line);
                if pair.code != 0 {
                    ctx.warn(
                        "read_drawing",
                        format!("group code {} outside a section skipped", pair.code),
                    );
                    self.reader.skip_to_next_marker()?;
                    continue;
                }
                if pair.is_end_of_file() {
                    break;
                }
                let marker = pair.value.trim().to_string();
                match marker.as_str() {
                    "SECTION" => self.read_section(&mut drawing, &mut ctx)?,
                    "ENDSEC" => ctx.warn("read_drawing", "ENDSEC without SECTION"),
                    _ => {
                        self.reader.push_back(pair);
                        self.read_entities(&mut drawing, &mut ctx)?;
                    }
                }
            }
            drawing.version = ctx.version();
        }
        drawing.notifications = notifications;
        Ok(drawing)
    }

    fn read_section(&mut self, drawing: &mut Drawing, ctx: &mut ReadContext<'_>) -> Result<()> {
        let name = match self.reader.read_pair()? {
            Some(pair) if pair.code == 2 => pair.value.trim().to_string(),
            Some(pair) => {
                ctx.set_line(pair.line);
                ctx.warn(
                    "read_section",
                    format!("SECTION without a name, found group code {}", pair.code),
                );
                self.reader.push_back(pair);
                String::new()
            }
            None => return Ok(()),
        };

        match name.as_str() {
            "HEADER" => self.read_header(drawing, ctx)?,
            "ENTITIES" => self.read_entities(drawing, ctx)?,
            "OBJECTS" => self.read_objects(drawing, ctx)?,
            _ => {
                let skipped = self.skip_section()?;
                ctx.not_implemented(
                    "read_section",
                    format!("section {} skipped ({} pairs)", name, skipped),
                );
                return Ok(());
            }
        }
        self.end_section(&name, ctx)
    }

    /// Scan the header variables the codec depends on.
    fn read_header(&mut self, drawing: &mut Drawing, ctx: &mut ReadContext<'_>) -> Result<()> {
        let mut code_page: Option<String> = None;
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if pair.code != 9 {
                continue;
            }
            ctx.set_line(pair.line);
            let variable = pair.value.trim().to_string();
            let value = match self.reader.read_pair()? {
                Some(value) if value.code != 0 && value.code != 9 => value,
                Some(other) => {
                    ctx.warn("read_header", format!("{} has no value", variable));
                    self.reader.push_back(other);
                    continue;
                }
                None => break,
            };
            match variable.as_str() {
                "$ACADVER" => match DxfVersion::from_version_string(&value.value) {
                    Some(version) => ctx.set_version(version),
                    None => ctx.warn(
                        "read_header",
                        format!(
                            "unrecognized $ACADVER '{}', reading as {}",
                            value.value.trim(),
                            ctx.version()
                        ),
                    ),
                },
                "$DWGCODEPAGE" => code_page = Some(value.value.trim().to_string()),
                _ => {}
            }
        }

        if let Some(code_page) = code_page {
            if uses_code_page(ctx.version()) {
                self.reader.set_encoding(encoding_for_code_page(&code_page));
            }
            drawing.code_page = Some(code_page);
        }
        Ok(())
    }

    fn read_entities(&mut self, drawing: &mut Drawing, ctx: &mut ReadContext<'_>) -> Result<()> {
        while let Some(entity) = read_next_entity(&mut self.reader, ctx)? {
            drawing.add_entity(entity);
        }
        Ok(())
    }

    fn read_objects(&mut self, drawing: &mut Drawing, ctx: &mut ReadContext<'_>) -> Result<()> {
        while let Some(object) = read_next_object(&mut self.reader, ctx)? {
            drawing.add_object(object);
        }
        Ok(())
    }

    /// Consume the `ENDSEC` closing `section`; `EOF` is left for the caller.
    fn end_section(&mut self, section: &str, ctx: &mut ReadContext<'_>) -> Result<()> {
        match self.reader.read_pair()? {
            Some(pair) if pair.is_marker("ENDSEC") => {}
            Some(pair) => {
                ctx.set_line(pair.line);
                ctx.warn(
                    "read_section",
                    format!("section {} is not closed by ENDSEC", section),
                );
                self.reader.push_back(pair);
            }
            None => ctx.warn(
                "read_section",
                format!("section {} is not closed by ENDSEC", section),
            ),
        }
        Ok(())
    }

    /// Skip the current section including its `ENDSEC`.
    fn skip_section(&mut self) -> Result<usize> {
        let mut skipped = 0;
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }
            if pair.is_end_of_file() {
                self.reader.push_back(pair);
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityKind;
    use crate::notification::NotificationType;
    use std::io::Cursor;

    fn read(text: &str) -> Drawing {
        DxfReader::from_reader(Cursor::new(text.as_bytes().to_vec()))
            .read()
            .unwrap()
    }

    const LINE: &str = "  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n1.0\n 21\n0.0\n 31\n0.0\n";

    #[test]
    fn test_version_read_from_header() {
        let text = format!(
            "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1014\n  9\n$INSBASE\n 10\n0.0\n 20\n0.0\n 30\n0.0\n  0\nENDSEC\n  0\nSECTION\n  2\nENTITIES\n{}  0\nENDSEC\n  0\nEOF\n",
            LINE
        );
        let drawing = read(&text);
        assert_eq!(drawing.version, DxfVersion::R14);
        assert_eq!(drawing.entities.len(), 1);
        assert!(drawing.notifications.is_empty(), "{:?}", drawing.notifications);
    }

    #[test]
    fn test_unknown_version_keeps_configuration() {
        let text = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC0999\n  0\nENDSEC\n  0\nEOF\n";
        let drawing = DxfReader::from_reader(Cursor::new(text.as_bytes().to_vec()))
            .with_configuration(DxfConfiguration::new(DxfVersion::R13))
            .read()
            .unwrap();
        assert_eq!(drawing.version, DxfVersion::R13);
        assert!(drawing.notifications.contains("unrecognized $ACADVER 'AC0999'"));
    }

    #[test]
    fn test_other_sections_are_skipped() {
        let text = format!(
            "  0\nSECTION\n  2\nTABLES\n  0\nTABLE\n  2\nLAYER\n  0\nENDTAB\n  0\nENDSEC\n  0\nSECTION\n  2\nENTITIES\n{}  0\nENDSEC\n  0\nEOF\n",
            LINE
        );
        let drawing = read(&text);
        assert_eq!(drawing.entities.len(), 1);
        assert!(drawing.notifications.has_type(NotificationType::NotImplemented));
        assert!(drawing.notifications.contains("section TABLES skipped (3 pairs)"));
    }

    #[test]
    fn test_bare_entity_stream() {
        let text = format!("{}  0\nPOINT\n 10\n1.0\n 20\n2.0\n 30\n0.0\n", LINE);
        let drawing = read(&text);
        let kinds: Vec<_> = drawing.entities.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EntityKind::Line, EntityKind::Point]);
        assert_eq!(drawing.version, DxfVersion::R12);
    }

    #[test]
    fn test_unclosed_section_warns() {
        let text = format!("  0\nSECTION\n  2\nENTITIES\n{}  0\nEOF\n", LINE);
        let drawing = read(&text);
        assert_eq!(drawing.entities.len(), 1);
        assert!(drawing.notifications.contains("section ENTITIES is not closed by ENDSEC"));
    }

    #[test]
    fn test_code_page_decodes_text() {
        let mut bytes = b"  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1009\n  9\n$DWGCODEPAGE\n  3\nANSI_1251\n  0\nENDSEC\n  0\nSECTION\n  2\nENTITIES\n  0\nTEXT\n  8\n".to_vec();
        bytes.extend_from_slice(&[0xC0, 0xC1]);
        bytes.extend_from_slice(b"\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 40\n1.0\n  1\nx\n  0\nENDSEC\n  0\nEOF\n");
        let drawing = DxfReader::from_reader(Cursor::new(bytes)).read().unwrap();
        assert_eq!(drawing.code_page.as_deref(), Some("ANSI_1251"));
        assert_eq!(drawing.entities[0].common().layer, "АБ");
    }

    #[test]
    fn test_endfile_marker() {
        let text = format!("  0\nSECTION\n  2\nENTITIES\n{}  0\nENDSEC\n  0\nENDFILE\n", LINE);
        let drawing = read(&text);
        assert_eq!(drawing.entities.len(), 1);
        assert!(drawing.notifications.is_empty(), "{:?}", drawing.notifications);

        let bare = read(&format!("{}  0\nENDFILE\n", LINE));
        assert_eq!(bare.entities.len(), 1);
        assert!(bare.notifications.is_empty(), "{:?}", bare.notifications);
    }

    #[test]
    fn test_objects_section() {
        let text = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1015\n  0\nENDSEC\n  0\nSECTION\n  2\nOBJECTS\n  0\nDICTIONARY\n  5\nC\n100\nAcDbDictionary\n  3\nACAD_GROUP\n350\nD\n  0\nENDSEC\n  0\nEOF\n";
        let drawing = read(text);
        assert_eq!(drawing.version, DxfVersion::R2000);
        assert_eq!(drawing.objects.len(), 1);
        assert_eq!(drawing.objects[0].name(), "DICTIONARY");
    }
}
