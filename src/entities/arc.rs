//! Arc entity

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A circular arc. Angles are in degrees, counter-clockwise, as on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    pub fn from_center_radius_angles(center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..Self::new()
        }
    }

    /// Included angle in degrees, in `0..360`.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(360.0)
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep().to_radians()
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Arc);

impl EntityCodec for Arc {
    const NAME: &'static str = "ARC";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbCircle", "AcDbArc"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.center, pair)?,
            40 => self.radius = pair.as_double()?,
            50 => self.start_angle = pair.as_double()?,
            51 => self.end_angle = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbCircle", config)?;
        w.write_point3d(10, self.center)?;
        w.write_double(40, self.radius)?;
        write_extrusion(w, &self.common, config)?;
        write_marker(w, "AcDbArc", config)?;
        w.write_double(50, self.start_angle)?;
        w.write_double(51, self.end_angle)
    }
}
