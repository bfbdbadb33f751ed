//! Circle entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A circle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
}

impl Circle {
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
        }
    }

    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Circle);

impl EntityCodec for Circle {
    const NAME: &'static str = "CIRCLE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbCircle"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.center, pair)?,
            40 => self.radius = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.radius < 0.0 {
            return Err(DxfError::validation(Self::NAME, format!("negative radius {}", self.radius)));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbCircle", config)?;
        w.write_point3d(10, self.center)?;
        w.write_double(40, self.radius)?;
        write_extrusion(w, &self.common, config)
    }
}
