//! Shape entity

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A shape from a compiled shape file, placed by name
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub common: EntityCommon,
    pub insertion_point: Vector3,
    pub size: f64,
    /// Shape name
    pub name: String,
    /// Rotation in degrees
    pub rotation: f64,
    pub relative_x_scale: f64,
    /// Oblique angle in degrees
    pub oblique_angle: f64,
}

impl Shape {
    pub fn new() -> Self {
        Shape {
            common: EntityCommon::new(),
            insertion_point: Vector3::ZERO,
            size: 1.0,
            name: String::new(),
            rotation: 0.0,
            relative_x_scale: 1.0,
            oblique_angle: 0.0,
        }
    }

    pub fn with_name(name: impl Into<String>, insertion_point: Vector3, size: f64) -> Self {
        Shape {
            name: name.into(),
            insertion_point,
            size,
            ..Self::new()
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Shape);

impl EntityCodec for Shape {
    const NAME: &'static str = "SHAPE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbShape"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.insertion_point, pair)?,
            40 => self.size = pair.as_double()?,
            2 => self.name = pair.as_fixed_string(MAX_NAME_LENGTH).0,
            50 => self.rotation = pair.as_double()?,
            41 => self.relative_x_scale = pair.as_double()?,
            51 => self.oblique_angle = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbShape", config)?;
        w.write_point3d(10, self.insertion_point)?;
        w.write_double(40, self.size)?;
        w.write_string(2, &self.name)?;
        if self.rotation != 0.0 {
            w.write_double(50, self.rotation)?;
        }
        if self.relative_x_scale != 1.0 {
            w.write_double(41, self.relative_x_scale)?;
        }
        if self.oblique_angle != 0.0 {
            w.write_double(51, self.oblique_angle)?;
        }
        write_extrusion(w, &self.common, config)
    }
}
