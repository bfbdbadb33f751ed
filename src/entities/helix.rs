//! Helix entity

use super::spline::SplineCurve;
use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A helix, stored as its approximating spline followed by the helix
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    pub common: EntityCommon,
    pub curve: SplineCurve,
    pub major_version: i32,
    pub maintenance_version: i32,
    pub axis_base_point: Vector3,
    pub start_point: Vector3,
    pub axis_vector: Vector3,
    pub radius: f64,
    pub turns: f64,
    pub turn_height: f64,
    /// Counter-clockwise when true
    pub handedness: bool,
    /// 0 turn height, 1 turns, 2 height
    pub constraint: u8,
    in_helix_data: bool,
}

impl Helix {
    pub fn new() -> Self {
        Helix {
            common: EntityCommon::new(),
            curve: SplineCurve::new(),
            major_version: 29,
            maintenance_version: 63,
            axis_base_point: Vector3::ZERO,
            start_point: Vector3::UNIT_X,
            axis_vector: Vector3::UNIT_Z,
            radius: 1.0,
            turns: 1.0,
            turn_height: 1.0,
            handedness: true,
            constraint: 0,
            in_helix_data: false,
        }
    }

    pub fn height(&self) -> f64 {
        self.turns * self.turn_height
    }
}

impl Default for Helix {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Helix);

impl EntityCodec for Helix {
    const NAME: &'static str = "HELIX";
    const INTRODUCED: DxfVersion = DxfVersion::R2007;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbSpline", "AcDbHelix"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        // Codes 10..42 mean spline data until the helix versions appear.
        if pair.code == 90 {
            self.major_version = pair.as_i32()?;
            self.in_helix_data = true;
            return Ok(true);
        }
        if !self.in_helix_data {
            return self.curve.read_code(pair);
        }
        match pair.code {
            91 => self.maintenance_version = pair.as_i32()?,
            10 | 20 | 30 => read_point(&mut self.axis_base_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.start_point, pair)?,
            12 | 22 | 32 => read_point(&mut self.axis_vector, pair)?,
            40 => self.radius = pair.as_double()?,
            41 => self.turns = pair.as_double()?,
            42 => self.turn_height = pair.as_double()?,
            290 => self.handedness = pair.as_bool()?,
            280 => self.constraint = pair.as_u8()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finish_read(&mut self, ctx: &mut ReadContext<'_>) {
        self.in_helix_data = false;
        self.curve.check_counts(ctx, "read_helix");
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbSpline", config)?;
        write_extrusion(w, &self.common, config)?;
        self.curve.write(w)?;
        write_marker(w, "AcDbHelix", config)?;
        w.write_i32(90, self.major_version)?;
        w.write_i32(91, self.maintenance_version)?;
        w.write_point3d(10, self.axis_base_point)?;
        w.write_point3d(11, self.start_point)?;
        w.write_point3d(12, self.axis_vector)?;
        w.write_double(40, self.radius)?;
        w.write_double(41, self.turns)?;
        w.write_double(42, self.turn_height)?;
        w.write_bool(290, self.handedness)?;
        w.write_byte(280, self.constraint)
    }
}
