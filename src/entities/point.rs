//! Point entity

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A point entity
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    /// Location of the point
    pub location: Vector3,
    /// Angle of the X axis for the UCS in effect when the point was drawn
    /// (degrees, R13+)
    pub x_axis_angle: f64,
}

impl Point {
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            x_axis_angle: 0.0,
        }
    }

    pub fn at(location: Vector3) -> Self {
        Point {
            location,
            ..Self::new()
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Point);

impl EntityCodec for Point {
    const NAME: &'static str = "POINT";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbPoint"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.location, pair)?,
            50 => self.x_axis_angle = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbPoint", config)?;
        w.write_point3d(10, self.location)?;
        write_extrusion(w, &self.common, config)?;
        if config.version >= DxfVersion::R13 && self.x_axis_angle != 0.0 {
            w.write_double(50, self.x_axis_angle)?;
        }
        Ok(())
    }
}
