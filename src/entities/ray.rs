//! RAY entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A semi-infinite line
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: EntityCommon,
    pub base_point: Vector3,
    /// Unit direction vector
    pub direction: Vector3,
}

impl Ray {
    pub fn new() -> Self {
        Ray {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
        }
    }

    pub fn from_point_direction(base_point: Vector3, direction: Vector3) -> Self {
        Ray {
            base_point,
            direction,
            ..Self::new()
        }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ray);

impl EntityCodec for Ray {
    const NAME: &'static str = "RAY";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbRay"];

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
        write_marker(w, "AcDbRay", config)?;
        w.write_point3d(10, self.base_point)?;
        w.write_point3d(11, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};

    #[test]
    fn test_ray_round_trip() {
        let ray = Ray::from_point_direction(Vector3::new(1.0, 2.0, 0.0), Vector3::UNIT_Y);
        let out = emit(&ray, DxfVersion::R14);
        assert!(out.contains("100\nAcDbRay\n"));
        assert_eq!(round_trip(&ray, DxfVersion::R14), ray);
    }

    #[test]
    fn test_zero_direction_refused() {
        let ray = Ray::from_point_direction(Vector3::ZERO, Vector3::ZERO);
        assert!(ray.validate(&DxfConfiguration::default()).is_err());
    }
}
