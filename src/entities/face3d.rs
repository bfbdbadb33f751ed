//! 3DFACE entity

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Edges hidden on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InvisibleEdgeFlags: i16 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

/// A three- or four-sided face in space
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    pub common: EntityCommon,
    pub first_corner: Vector3,
    pub second_corner: Vector3,
    pub third_corner: Vector3,
    /// Equal to the third corner for a triangle
    pub fourth_corner: Vector3,
    pub invisible_edges: InvisibleEdgeFlags,
}

impl Face3D {
    pub fn new() -> Self {
        Face3D {
            common: EntityCommon::new(),
            first_corner: Vector3::ZERO,
            second_corner: Vector3::ZERO,
            third_corner: Vector3::ZERO,
            fourth_corner: Vector3::ZERO,
            invisible_edges: InvisibleEdgeFlags::empty(),
        }
    }

    pub fn triangle(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Face3D {
            first_corner: a,
            second_corner: b,
            third_corner: c,
            fourth_corner: c,
            ..Self::new()
        }
    }

    pub fn quad(a: Vector3, b: Vector3, c: Vector3, d: Vector3) -> Self {
        Face3D {
            first_corner: a,
            second_corner: b,
            third_corner: c,
            fourth_corner: d,
            ..Self::new()
        }
    }
}

impl Default for Face3D {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Face3D);

impl EntityCodec for Face3D {
    const NAME: &'static str = "3DFACE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbFace"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.first_corner, pair)?,
            11 | 21 | 31 => read_point(&mut self.second_corner, pair)?,
            12 | 22 | 32 => read_point(&mut self.third_corner, pair)?,
            13 | 23 | 33 => read_point(&mut self.fourth_corner, pair)?,
            70 => self.invisible_edges = InvisibleEdgeFlags::from_bits_truncate(pair.as_i16()?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbFace", config)?;
        w.write_point3d(10, self.first_corner)?;
        w.write_point3d(11, self.second_corner)?;
        w.write_point3d(12, self.third_corner)?;
        w.write_point3d(13, self.fourth_corner)?;
        if !self.invisible_edges.is_empty() {
            w.write_i16(70, self.invisible_edges.bits())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};

    #[test]
    fn test_triangle_repeats_third_corner() {
        let face = Face3D::triangle(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        assert_eq!(face.third_corner, face.fourth_corner);
    }

    #[test]
    fn test_invisible_edges_round_trip() {
        let mut face = Face3D::quad(
            Vector3::ZERO,
            Vector3::UNIT_X,
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::UNIT_Y,
        );
        face.invisible_edges = InvisibleEdgeFlags::SECOND | InvisibleEdgeFlags::FOURTH;
        let out = emit(&face, DxfVersion::R13);
        assert!(out.contains("100\nAcDbFace\n"));
        assert!(out.ends_with(" 70\n10\n"));
        assert_eq!(round_trip(&face, DxfVersion::R13), face);
    }
}
