//! XLINE entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// An infinite construction line
#[derive(Debug, Clone, PartialEq)]
pub struct XLine {
    pub common: EntityCommon,
    pub base_point: Vector3,
    /// Unit direction vector
    pub direction: Vector3,
}

impl XLine {
    pub fn new() -> Self {
        XLine {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
        }
    }

    pub fn from_point_direction(base_point: Vector3, direction: Vector3) -> Self {
        XLine {
            base_point,
            direction,
            ..Self::new()
        }
    }
}

impl Default for XLine {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(XLine);

impl EntityCodec for XLine {
    const NAME: &'static str = "XLINE";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbXline"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.base_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.direction, pair)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.direction == Vector3::ZERO {
            return Err(DxfError::validation(Self::NAME, "direction vector is zero"));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbXline", config)?;
        w.write_point3d(10, self.base_point)?;
        w.write_point3d(11, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};

    #[test]
    fn test_xline_round_trip() {
        let xline = XLine::from_point_direction(Vector3::new(-3.0, 0.0, 0.0), Vector3::new(0.6, 0.8, 0.0));
        let out = emit(&xline, DxfVersion::R13);
        assert!(out.starts_with("  0\nXLINE\n100\nAcDbEntity\n"));
        assert!(out.contains("100\nAcDbXline\n"));
        assert_eq!(round_trip(&xline, DxfVersion::R13), xline);
    }
}
