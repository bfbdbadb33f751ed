//! DXF writer module

mod stream_writer;
mod text_writer;

pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt, PairBuffer};
pub use text_writer::DxfTextWriter;

use crate::drawing::Drawing;
use crate::entities::{Entity, EntityType};
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::{code_page_for_encoding, uses_code_page};
use crate::io::dxf::codec::TraceScope;
use crate::io::dxf::config::DxfConfiguration;
use crate::notification::{DiagnosticSink, NotificationCollection, TracingSink};
use crate::types::DxfVersion;
use encoding_rs::Encoding;
use std::io::Write;
use std::path::Path;

/// What to do with a record whose codec refuses to write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidEntityPolicy {
    /// Fail the whole write; nothing reaches the destination.
    #[default]
    Abort,
    /// Leave the record out and report it as a warning.
    Skip,
}

/// Writes a [`Drawing`] as a minimal DXF file.
///
/// The output holds a HEADER with `$ACADVER` (and `$DWGCODEPAGE` when an
/// encoding is set), the ENTITIES section, the OBJECTS section from R13 on
/// when the drawing has objects, and `EOF`.
///
/// Every record is rendered in memory before the destination is touched, so
/// a failed write never leaves a truncated file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfWriter {
    config: DxfConfiguration,
    encoding: Option<&'static Encoding>,
    policy: InvalidEntityPolicy,
}

impl DxfWriter {
    pub fn new(config: DxfConfiguration) -> Self {
        Self {
            config,
            encoding: None,
            policy: InvalidEntityPolicy::Abort,
        }
    }

    /// Encode text with a Windows code page; only honored before R2007.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_invalid_entity_policy(mut self, policy: InvalidEntityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &DxfConfiguration {
        &self.config
    }

    pub fn invalid_entity_policy(&self) -> InvalidEntityPolicy {
        self.policy
    }

    fn effective_encoding(&self) -> Option<&'static Encoding> {
        self.encoding.filter(|_| uses_code_page(self.config.version))
    }

    /// Write to a file, creating or truncating it.
    ///
    /// The file is only created once the whole drawing has been rendered.
    /// Returns the diagnostics of the write (skipped records).
    pub fn write_to_file<P: AsRef<Path>>(&self, drawing: &Drawing, path: P) -> Result<NotificationCollection> {
        let mut notifications = NotificationCollection::new();
        let pairs = self.render(drawing, &mut notifications)?;
        let mut w = DxfTextWriter::create(path)?;
        if let Some(encoding) = self.effective_encoding() {
            w = w.with_encoding(encoding);
        }
        pairs.replay(&mut w)?;
        w.close()?;
        Ok(notifications)
    }

    /// Write to any sink and hand it back flushed.
    pub fn write_to_writer<W: Write>(
        &self,
        drawing: &Drawing,
        writer: W,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<W> {
        let pairs = self.render(drawing, sink)?;
        let mut w = DxfTextWriter::new(writer);
        if let Some(encoding) = self.effective_encoding() {
            w = w.with_encoding(encoding);
        }
        pairs.replay(&mut w)?;
        w.close()
    }

    /// Write to a byte vector. Diagnostics go to `tracing`.
    pub fn write_to_vec(&self, drawing: &Drawing) -> Result<Vec<u8>> {
        self.write_to_writer(drawing, Vec::new(), &mut TracingSink)
    }

    /// Write the complete file structure.
    pub fn write_drawing(
        &self,
        w: &mut dyn DxfStreamWriter,
        drawing: &Drawing,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        self.render(drawing, sink)?.replay(w)?;
        w.flush()
    }

    /// The whole file as pairs.
    fn render(&self, drawing: &Drawing, sink: &mut dyn DiagnosticSink) -> Result<PairBuffer> {
        let _scope = TraceScope::enter(&self.config, "write", "DRAWING");
        let mut out = PairBuffer::new();
        self.write_header(&mut out)?;

        out.write_section_start("ENTITIES")?;
        self.write_entities(&mut out, &drawing.entities, sink)?;
        out.write_section_end()?;

        if self.config.version >= DxfVersion::R13 && !drawing.objects.is_empty() {
            out.write_section_start("OBJECTS")?;
            for object in &drawing.objects {
                let mut staged = PairBuffer::new();
                match object.write(&mut staged, &self.config) {
                    Ok(()) => out.append(&mut staged),
                    Err(err) => self.refuse(object.name(), err, sink)?,
                }
            }
            out.write_section_end()?;
        }

        out.write_eof()?;
        Ok(out)
    }

    fn write_header(&self, w: &mut dyn DxfStreamWriter) -> Result<()> {
        w.write_section_start("HEADER")?;
        w.write_string(9, "$ACADVER")?;
        w.write_string(1, self.config.version.acad_ver())?;
        if let Some(code_page) = self.effective_encoding().and_then(code_page_for_encoding) {
            w.write_string(9, "$DWGCODEPAGE")?;
            w.write_string(3, code_page)?;
        }
        w.write_section_end()
    }

    /// Write entities without any section framing.
    ///
    /// A refused entity emits no pairs. Under [`InvalidEntityPolicy::Abort`]
    /// the error is returned after the entities before it were written; under
    /// [`InvalidEntityPolicy::Skip`] it is reported to `sink` and the rest
    /// follow.
    pub fn write_entities<'a>(
        &self,
        w: &mut dyn DxfStreamWriter,
        entities: impl IntoIterator<Item = &'a EntityType>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for entity in entities {
            let mut staged = PairBuffer::new();
            match entity.write(&mut staged, &self.config) {
                Ok(()) => staged.replay(w)?,
                Err(err) => self.refuse(entity.as_entity().entity_type(), err, sink)?,
            }
        }
        Ok(())
    }

    fn refuse(&self, record: &str, err: DxfError, sink: &mut dyn DiagnosticSink) -> Result<()> {
        match (self.policy, &err) {
            (_, DxfError::Io(_)) | (InvalidEntityPolicy::Abort, _) => Err(err),
            (InvalidEntityPolicy::Skip, _) => {
                sink.warn("write_drawing", format!("{} left out: {}", record, err));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Line, Point};
    use crate::objects::Dictionary;
    use crate::types::Vector3;

    fn sample() -> Drawing {
        let mut drawing = Drawing::new(DxfVersion::R12);
        drawing.add_entity(Line::from_points(Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0)).into());
        drawing.add_entity(Point::at(Vector3::new(2.0, 3.0, 0.0)).into());
        drawing
    }

    fn written(drawing: &Drawing, config: DxfConfiguration) -> String {
        String::from_utf8(DxfWriter::new(config).write_to_vec(drawing).unwrap()).unwrap()
    }

    #[test]
    fn test_file_structure() {
        let out = written(&sample(), DxfConfiguration::new(DxfVersion::R12));
        assert!(out.starts_with("  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1009\n  0\nENDSEC\n"));
        assert!(out.contains("  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n"));
        assert!(out.ends_with("  0\nENDSEC\n  0\nEOF\n"));
        assert!(!out.contains("OBJECTS"));
    }

    #[test]
    fn test_objects_only_from_r13() {
        let mut drawing = sample();
        drawing.add_object(Dictionary::new().into());
        assert!(!written(&drawing, DxfConfiguration::new(DxfVersion::R12)).contains("OBJECTS"));
        let out = written(&drawing, DxfConfiguration::new(DxfVersion::R2000));
        assert!(out.contains("  2\nOBJECTS\n  0\nDICTIONARY\n"));
    }

    #[test]
    fn test_code_page_header() {
        let writer = DxfWriter::new(DxfConfiguration::new(DxfVersion::R14)).with_encoding(encoding_rs::WINDOWS_1251);
        let out = writer.write_to_vec(&Drawing::new(DxfVersion::R14)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  9\n$DWGCODEPAGE\n  3\nANSI_1251\n"));

        let writer = DxfWriter::new(DxfConfiguration::new(DxfVersion::R2007)).with_encoding(encoding_rs::WINDOWS_1251);
        let out = String::from_utf8(writer.write_to_vec(&Drawing::new(DxfVersion::R2007)).unwrap()).unwrap();
        assert!(!out.contains("$DWGCODEPAGE"));
    }

    #[test]
    fn test_write_entities_without_framing() {
        let drawing = sample();
        let mut w = DxfTextWriter::new(Vec::new());
        DxfWriter::new(DxfConfiguration::new(DxfVersion::R12))
            .write_entities(&mut w, &drawing.entities, &mut NotificationCollection::new())
            .unwrap();
        let out = String::from_utf8(w.into_inner()).unwrap();
        assert!(out.starts_with("  0\nLINE\n"));
        assert!(!out.contains("SECTION"));
    }

    fn with_degenerate_line() -> Drawing {
        let mut drawing = sample();
        drawing.add_entity(Line::from_points(Vector3::ZERO, Vector3::ZERO).into());
        drawing.add_entity(Point::at(Vector3::new(5.0, 5.0, 0.0)).into());
        drawing
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let drawing = with_degenerate_line();
        let mut sink = NotificationCollection::new();
        let err = DxfWriter::new(DxfConfiguration::new(DxfVersion::R12))
            .write_to_writer(&drawing, Vec::new(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, DxfError::Validation { entity: "LINE", .. }));

        let mut w = DxfTextWriter::new(Vec::new());
        assert!(DxfWriter::new(DxfConfiguration::new(DxfVersion::R12))
            .write_drawing(&mut w, &drawing, &mut sink)
            .is_err());
        assert_eq!(w.pairs_written(), 0);
    }

    #[test]
    fn test_skip_policy_leaves_entity_out() {
        let drawing = with_degenerate_line();
        let mut sink = NotificationCollection::new();
        let out = DxfWriter::new(DxfConfiguration::new(DxfVersion::R12))
            .with_invalid_entity_policy(InvalidEntityPolicy::Skip)
            .write_to_writer(&drawing, Vec::new(), &mut sink)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("  0\nLINE\n").count(), 1);
        assert_eq!(out.matches("  0\nPOINT\n").count(), 2);
        assert!(out.ends_with("  0\nENDSEC\n  0\nEOF\n"));
        assert_eq!(sink.len(), 1);
        assert!(sink.contains("LINE left out"));

        let back = crate::io::dxf::DxfReader::from_reader(out.as_bytes()).read().unwrap();
        assert_eq!(back.entities.len(), 3);
        assert!(back.notifications.is_empty(), "{:?}", back.notifications);
    }
}
