//! Line entities

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A line entity defined by two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector3,
    /// End point of the line
    pub end: Vector3,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector3 {
        self.start.midpoint(&self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Line);

fn read_endpoints(start: &mut Vector3, end: &mut Vector3, pair: &DxfCodePair) -> Result<bool> {
    match pair.code {
        10 | 20 | 30 => read_point(start, pair)?,
        11 | 21 | 31 => read_point(end, pair)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn check_endpoints(entity: &'static str, start: Vector3, end: Vector3) -> Result<()> {
    if start == end {
        return Err(DxfError::validation(
            entity,
            format!("start and end points coincide at {}", start),
        ));
    }
    Ok(())
}

fn write_endpoints(
    w: &mut dyn DxfStreamWriter,
    common: &EntityCommon,
    start: Vector3,
    end: Vector3,
    config: &DxfConfiguration,
) -> Result<()> {
    write_marker(w, "AcDbLine", config)?;
    w.write_point3d(10, start)?;
    w.write_point3d(11, end)?;
    write_extrusion(w, common, config)
}

impl EntityCodec for Line {
    const NAME: &'static str = "LINE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbLine"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        read_endpoints(&mut self.start, &mut self.end, pair)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        check_endpoints(Self::NAME, self.start, self.end)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_endpoints(w, &self.common, self.start, self.end, config)
    }
}

/// Obsolete 3D line. Emitted as `3DLINE` up to R11 and as `LINE` afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Line3D {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
}

impl Line3D {
    pub fn new() -> Self {
        Line3D {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
        }
    }

    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line3D {
            start,
            end,
            ..Self::new()
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// The same geometry as a plain [`Line`].
    pub fn to_line(&self) -> Line {
        Line {
            common: self.common.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

impl Default for Line3D {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Line3D);

impl EntityCodec for Line3D {
    const NAME: &'static str = "3DLINE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbLine"];

    fn dxf_name(&self, version: DxfVersion) -> &'static str {
        if version >= DxfVersion::R12 {
            "LINE"
        } else {
            Self::NAME
        }
    }

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        read_endpoints(&mut self.start, &mut self.end, pair)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        check_endpoints(Self::NAME, self.start, self.end)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_endpoints(w, &self.common, self.start, self.end, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};
    use crate::io::dxf::codec::write_entity;
    use crate::io::dxf::writer::DxfTextWriter;
    use crate::types::Handle;

    fn sample() -> Line {
        let mut line = Line::from_points(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0));
        line.common.handle = Some(Handle::new(0x5a));
        line
    }

    #[test]
    fn test_line_creation() {
        let line = Line::new();
        assert_eq!(line.start, Vector3::ZERO);
        assert_eq!(line.end, Vector3::ZERO);
        assert_eq!(sample().length(), 10.0);
        assert_eq!(sample().midpoint(), Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_minimal_line_r12() {
        let out = emit(&sample(), DxfVersion::R12);
        assert_eq!(
            out,
            "  0\nLINE\n  5\n5a\n  8\n0\n 10\n0.000000\n 20\n0.000000\n 30\n0.000000\n 11\n10.000000\n 21\n0.000000\n 31\n0.000000\n"
        );
        assert_eq!(round_trip(&sample(), DxfVersion::R12), sample());
    }

    #[test]
    fn test_markers_from_r13() {
        let out = emit(&sample(), DxfVersion::R14);
        assert!(out.contains("100\nAcDbEntity\n"));
        assert!(out.contains("100\nAcDbLine\n"));
        assert_eq!(round_trip(&sample(), DxfVersion::R14), sample());
    }

    #[test]
    fn test_degenerate_line_is_refused() {
        let line = Line::from_points(Vector3::new(1.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
        let mut w = DxfTextWriter::new(Vec::new());
        let err = write_entity(&mut w, &line, &DxfConfiguration::default()).unwrap_err();
        assert!(matches!(err, DxfError::Validation { entity: "LINE", .. }));
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn test_3dline_name_by_version() {
        let mut line = Line3D::from_points(Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0));
        line.common.handle = Some(Handle::new(7));

        let r11 = emit(&line, DxfVersion::R11);
        let r12 = emit(&line, DxfVersion::R12);
        let r13 = emit(&line, DxfVersion::R13);
        assert!(r11.starts_with("  0\n3DLINE\n  5\n7\n"));
        assert!(r12.starts_with("  0\nLINE\n  5\n7\n"));
        assert!(!r11.contains("AcDbEntity"));
        assert!(!r12.contains("AcDbEntity"));
        assert!(r13.contains("100\nAcDbEntity\n"));

        assert_eq!(round_trip(&line, DxfVersion::R11), line);
        assert_eq!(round_trip(&line, DxfVersion::R12), line);
    }

    #[test]
    fn test_read_with_unknown_code_and_comment() {
        let text = "  0\nLINE\n  8\nWALLS\n999\nhello\n 10\n1.0\n 20\n2.0\n 77\n5\n 11\n3.0\n 21\nabc\n  0\nEOF\n";
        let (line, diagnostics) = parse::<Line>(text, DxfVersion::R12);
        assert_eq!(line.common.layer, "WALLS");
        assert_eq!(line.start, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(line.end, Vector3::new(3.0, 0.0, 0.0));
        assert!(diagnostics.contains("unknown group code 77 with value '5'"));
        assert!(diagnostics.contains("comment: hello"));
        assert!(diagnostics.iter().any(|n| n.message.contains("'abc'")));
    }

    #[test]
    fn test_missing_layer_and_linetype_are_reconstituted() {
        let text = "  0\nLINE\n  6\n\n 10\n0.0\n 11\n1.0\n";
        let (line, _) = parse::<Line>(text, DxfVersion::R12);
        assert_eq!(line.common.layer, "0");
        assert_eq!(line.common.linetype, "BYLAYER");
    }
}
