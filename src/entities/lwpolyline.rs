//! Lightweight polyline

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector2};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LwPolylineFlags: i16 {
        const CLOSED = 1;
        const PLINEGEN = 128;
    }
}

/// One LWPOLYLINE vertex
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LwVertex {
    pub location: Vector2,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
}

impl LwVertex {
    pub fn new(location: Vector2) -> Self {
        LwVertex {
            location,
            ..Default::default()
        }
    }
}

/// A 2D polyline stored in a single record
#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    pub flags: LwPolylineFlags,
    /// Width applied to every segment when non-zero
    pub constant_width: f64,
    pub elevation: f64,
    pub vertices: Vec<LwVertex>,
    declared_count: Option<i32>,
}

impl LwPolyline {
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            flags: LwPolylineFlags::empty(),
            constant_width: 0.0,
            elevation: 0.0,
            vertices: Vec::new(),
            declared_count: None,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector2>) -> Self {
        LwPolyline {
            vertices: points.into_iter().map(LwVertex::new).collect(),
            ..Self::new()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(LwPolylineFlags::CLOSED)
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.flags.set(LwPolylineFlags::CLOSED, closed);
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(LwPolyline);

impl EntityCodec for LwPolyline {
    const NAME: &'static str = "LWPOLYLINE";
    const INTRODUCED: DxfVersion = DxfVersion::R14;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbPolyline"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            90 => self.declared_count = Some(pair.as_i32()?),
            70 => self.flags = LwPolylineFlags::from_bits_truncate(pair.as_i16()?),
            43 => self.constant_width = pair.as_double()?,
            38 => self.elevation = pair.as_double()?,
            10 => self.vertices.push(LwVertex::new(Vector2::new(pair.as_double()?, 0.0))),
            20 | 40 | 41 | 42 => {
                let value = pair.as_double()?;
                let Some(vertex) = self.vertices.last_mut() else {
                    return Ok(false);
                };
                match pair.code {
                    20 => vertex.location.y = value,
                    40 => vertex.start_width = value,
                    41 => vertex.end_width = value,
                    _ => vertex.bulge = value,
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finish_read(&mut self, ctx: &mut ReadContext<'_>) {
        // 38 arrives in the shared header when no marker precedes it.
        if self.elevation == 0.0 && self.common.elevation != 0.0 {
            self.elevation = std::mem::take(&mut self.common.elevation);
        }
        if let Some(declared) = self.declared_count.take() {
            if declared as usize != self.vertices.len() {
                ctx.warn(
                    "read_lwpolyline",
                    format!(
                        "vertex count declares {} but {} vertices were read",
                        declared,
                        self.vertices.len()
                    ),
                );
            }
        }
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbPolyline", config)?;
        w.write_i32(90, self.vertices.len() as i32)?;
        w.write_i16(70, self.flags.bits())?;
        if self.constant_width != 0.0 {
            w.write_double(43, self.constant_width)?;
        }
        if self.elevation != 0.0 {
            w.write_double(38, self.elevation)?;
        }
        for vertex in &self.vertices {
            w.write_point2d(10, vertex.location)?;
            if vertex.start_width != 0.0 {
                w.write_double(40, vertex.start_width)?;
            }
            if vertex.end_width != 0.0 {
                w.write_double(41, vertex.end_width)?;
            }
            if vertex.bulge != 0.0 {
                w.write_double(42, vertex.bulge)?;
            }
        }
        write_extrusion(w, &self.common, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    #[test]
    fn test_lwpolyline_round_trip() {
        let mut polyline = LwPolyline::from_points([
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 3.0),
        ]);
        polyline.set_closed(true);
        polyline.elevation = 2.0;
        polyline.vertices[1].bulge = 0.5;
        polyline.vertices[2].start_width = 0.25;
        let out = emit(&polyline, DxfVersion::R14);
        assert!(out.contains(" 90\n3\n 70\n1\n 38\n2.000000\n"));
        assert_eq!(round_trip(&polyline, DxfVersion::R14), polyline);
    }

    #[test]
    fn test_count_mismatch_warns_and_keeps_vertices() {
        let input = "  0\nLWPOLYLINE\n100\nAcDbEntity\n100\nAcDbPolyline\n 90\n5\n 10\n0.0\n 20\n0.0\n 10\n1.0\n 20\n1.0\n";
        let (polyline, diagnostics) = parse::<LwPolyline>(input, DxfVersion::R14);
        assert_eq!(polyline.vertices.len(), 2);
        assert!(diagnostics.contains("vertex count declares 5 but 2 vertices were read"));
    }

    #[test]
    fn test_version_warning_for_r12() {
        let input = "  0\nLWPOLYLINE\n 90\n0\n";
        let (_, diagnostics) = parse::<LwPolyline>(input, DxfVersion::R12);
        assert!(diagnostics.contains("introduced in R14"));
    }
}
