//! Ellipse entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};
use std::f64::consts::TAU;

/// A full or partial ellipse
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: EntityCommon,
    pub center: Vector3,
    /// Endpoint of the major axis relative to the center
    pub major_axis: Vector3,
    /// Minor to major axis ratio, in `(0, 1]`
    pub minor_axis_ratio: f64,
    /// Start parameter in radians
    pub start_parameter: f64,
    /// End parameter in radians
    pub end_parameter: f64,
}

impl Ellipse {
    pub fn new() -> Self {
        Ellipse {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::UNIT_X,
            minor_axis_ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: TAU,
        }
    }

    pub fn from_center_axes(center: Vector3, major_axis: Vector3, minor_axis_ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            minor_axis_ratio,
            ..Self::new()
        }
    }

    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.minor_axis_ratio
    }

    pub fn is_full(&self) -> bool {
        self.start_parameter == 0.0 && self.end_parameter == TAU
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ellipse);

impl EntityCodec for Ellipse {
    const NAME: &'static str = "ELLIPSE";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbEllipse"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.center, pair)?,
            11 | 21 | 31 => read_point(&mut self.major_axis, pair)?,
            40 => self.minor_axis_ratio = pair.as_double()?,
            41 => self.start_parameter = pair.as_double()?,
            42 => self.end_parameter = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if !(self.minor_axis_ratio > 0.0 && self.minor_axis_ratio <= 1.0) {
            return Err(DxfError::validation(
                Self::NAME,
                format!("axis ratio {} outside (0, 1]", self.minor_axis_ratio),
            ));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbEllipse", config)?;
        w.write_point3d(10, self.center)?;
        w.write_point3d(11, self.major_axis)?;
        write_extrusion(w, &self.common, config)?;
        w.write_double(40, self.minor_axis_ratio)?;
        w.write_double(41, self.start_parameter)?;
        w.write_double(42, self.end_parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};
    use crate::io::dxf::codec::write_entity;
    use crate::io::dxf::writer::DxfTextWriter;

    #[test]
    fn test_ellipse_round_trip() {
        let mut ellipse = Ellipse::from_center_axes(Vector3::new(1.0, 1.0, 0.0), Vector3::new(4.0, 0.0, 0.0), 0.5);
        ellipse.end_parameter = 1.5;
        assert_eq!(ellipse.minor_radius(), 2.0);
        assert_eq!(round_trip(&ellipse, DxfVersion::R14), ellipse);
        assert!(emit(&ellipse, DxfVersion::R14).ends_with(" 42\n1.500000\n"));
    }

    #[test]
    fn test_bad_ratio_refused() {
        let ellipse = Ellipse::from_center_axes(Vector3::ZERO, Vector3::UNIT_X, 1.5);
        let mut w = DxfTextWriter::new(Vec::new());
        assert!(write_entity(&mut w, &ellipse, &DxfConfiguration::new(DxfVersion::R14)).is_err());
        assert!(w.into_inner().is_empty());
    }
}
