//! Dimension entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// Dimension type in the low bits of code `70`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum DimensionType {
    /// Rotated, horizontal or vertical
    #[default]
    Linear = 0,
    Aligned = 1,
    Angular = 2,
    Diameter = 3,
    Radius = 4,
    Angular3Point = 5,
    Ordinate = 6,
}

impl DimensionType {
    pub fn from_value(value: i16) -> Result<Self> {
        Ok(match value {
            0 => Self::Linear,
            1 => Self::Aligned,
            2 => Self::Angular,
            3 => Self::Diameter,
            4 => Self::Radius,
            5 => Self::Angular3Point,
            6 => Self::Ordinate,
            v => return Err(DxfError::range("dimension_type", v as i64, 0, 6)),
        })
    }

    /// Subclass marker following `AcDbDimension`.
    pub fn subclass_marker(&self) -> &'static str {
        match self {
            Self::Linear | Self::Aligned => "AcDbAlignedDimension",
            Self::Angular => "AcDb2LineAngularDimension",
            Self::Diameter => "AcDbDiametricDimension",
            Self::Radius => "AcDbRadialDimension",
            Self::Angular3Point => "AcDb3PointAngularDimension",
            Self::Ordinate => "AcDbOrdinateDimension",
        }
    }
}

const TYPE_MASK: i16 = 0x0f;

/// A dimension of any type. Type-specific points use the wire code names
/// (`13`..`16`); which of them are meaningful depends on the type.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub common: EntityCommon,
    pub dimension_type: DimensionType,
    /// High bits of code `70` (32 block referenced by this dimension only,
    /// 64 ordinate X type, 128 user-positioned text)
    pub type_flags: i16,
    /// Anonymous block holding the rendered dimension (`2`)
    pub block_name: String,
    pub dimension_style_name: String,
    /// `10`
    pub definition_point: Vector3,
    /// `11`
    pub text_midpoint: Vector3,
    /// `12`, clone insertion point
    pub insertion_point: Vector3,
    /// Explicit text; empty means the measurement is shown
    pub text: String,
    /// `71`, R2000+
    pub attachment_point: i16,
    /// `72`, R2000+
    pub line_spacing_style: i16,
    /// `41`, R2000+
    pub line_spacing_factor: f64,
    /// `42`, R2000+
    pub actual_measurement: f64,
    pub text_rotation: f64,
    pub horizontal_direction: f64,
    /// `13`
    pub first_point: Vector3,
    /// `14`
    pub second_point: Vector3,
    /// `15`
    pub third_point: Vector3,
    /// `16`
    pub arc_point: Vector3,
    /// `40`, radius and diameter leader length
    pub leader_length: f64,
    /// `50`, linear dimension angle
    pub rotation: f64,
    /// `52`, extension line oblique angle
    pub oblique_angle: f64,
}

impl Dimension {
    pub fn new() -> Self {
        Dimension {
            common: EntityCommon::new(),
            dimension_type: DimensionType::Linear,
            type_flags: 0,
            block_name: String::new(),
            dimension_style_name: "STANDARD".to_string(),
            definition_point: Vector3::ZERO,
            text_midpoint: Vector3::ZERO,
            insertion_point: Vector3::ZERO,
            text: String::new(),
            attachment_point: 5,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            actual_measurement: 0.0,
            text_rotation: 0.0,
            horizontal_direction: 0.0,
            first_point: Vector3::ZERO,
            second_point: Vector3::ZERO,
            third_point: Vector3::ZERO,
            arc_point: Vector3::ZERO,
            leader_length: 0.0,
            rotation: 0.0,
            oblique_angle: 0.0,
        }
    }

    pub fn linear(first: Vector3, second: Vector3, line_location: Vector3, rotation: f64) -> Self {
        Dimension {
            first_point: first,
            second_point: second,
            definition_point: line_location,
            rotation,
            ..Self::new()
        }
    }

    pub fn radius(center: Vector3, on_circle: Vector3) -> Self {
        Dimension {
            dimension_type: DimensionType::Radius,
            definition_point: center,
            third_point: on_circle,
            ..Self::new()
        }
    }

    /// Code `70` value.
    pub fn type_word(&self) -> i16 {
        self.dimension_type as i16 | (self.type_flags & !TYPE_MASK)
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Dimension);

impl EntityCodec for Dimension {
    const NAME: &'static str = "DIMENSION";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &[
        "AcDbDimension",
        "AcDbAlignedDimension",
        "AcDbRotatedDimension",
        "AcDbRadialDimension",
        "AcDbDiametricDimension",
        "AcDb3PointAngularDimension",
        "AcDb2LineAngularDimension",
        "AcDbOrdinateDimension",
    ];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            2 => self.block_name = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            3 => self.dimension_style_name = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            1 => self.text = pair.as_string(),
            10 | 20 | 30 => read_point(&mut self.definition_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.text_midpoint, pair)?,
            12 | 22 | 32 => read_point(&mut self.insertion_point, pair)?,
            13 | 23 | 33 => read_point(&mut self.first_point, pair)?,
            14 | 24 | 34 => read_point(&mut self.second_point, pair)?,
            15 | 25 | 35 => read_point(&mut self.third_point, pair)?,
            16 | 26 | 36 => read_point(&mut self.arc_point, pair)?,
            70 => {
                let word = pair.as_i16()?;
                self.dimension_type = DimensionType::from_value(word & TYPE_MASK)?;
                self.type_flags = word & !TYPE_MASK;
            }
            71 => self.attachment_point = pair.as_i16()?,
            72 => self.line_spacing_style = pair.as_i16()?,
            41 => self.line_spacing_factor = pair.as_double()?,
            42 => self.actual_measurement = pair.as_double()?,
            53 => self.text_rotation = pair.as_double()?,
            51 => self.horizontal_direction = pair.as_double()?,
            40 => self.leader_length = pair.as_double()?,
            50 => self.rotation = pair.as_double()?,
            52 => self.oblique_angle = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbDimension", config)?;
        w.write_string(2, &self.block_name)?;
        w.write_point3d(10, self.definition_point)?;
        w.write_point3d(11, self.text_midpoint)?;
        if self.insertion_point != Vector3::ZERO {
            w.write_point3d(12, self.insertion_point)?;
        }
        w.write_i16(70, self.type_word())?;
        if !self.text.is_empty() {
            w.write_string(1, &self.text)?;
        }
        w.write_string(3, &self.dimension_style_name)?;
        if config.version >= DxfVersion::R2000 {
            w.write_i16(71, self.attachment_point)?;
            w.write_i16(72, self.line_spacing_style)?;
            w.write_double(41, self.line_spacing_factor)?;
            w.write_double(42, self.actual_measurement)?;
        }
        if self.text_rotation != 0.0 {
            w.write_double(53, self.text_rotation)?;
        }
        if self.horizontal_direction != 0.0 {
            w.write_double(51, self.horizontal_direction)?;
        }
        write_extrusion(w, &self.common, config)?;

        write_marker(w, self.dimension_type.subclass_marker(), config)?;
        match self.dimension_type {
            DimensionType::Linear | DimensionType::Aligned => {
                w.write_point3d(13, self.first_point)?;
                w.write_point3d(14, self.second_point)?;
                if self.dimension_type == DimensionType::Linear {
                    if self.rotation != 0.0 {
                        w.write_double(50, self.rotation)?;
                    }
                    if self.oblique_angle != 0.0 {
                        w.write_double(52, self.oblique_angle)?;
                    }
                    write_marker(w, "AcDbRotatedDimension", config)?;
                } else if self.oblique_angle != 0.0 {
                    w.write_double(52, self.oblique_angle)?;
                }
            }
            DimensionType::Angular => {
                w.write_point3d(13, self.first_point)?;
                w.write_point3d(14, self.second_point)?;
                w.write_point3d(15, self.third_point)?;
                w.write_point3d(16, self.arc_point)?;
            }
            DimensionType::Angular3Point => {
                w.write_point3d(13, self.first_point)?;
                w.write_point3d(14, self.second_point)?;
                w.write_point3d(15, self.third_point)?;
            }
            DimensionType::Diameter | DimensionType::Radius => {
                w.write_point3d(15, self.third_point)?;
                w.write_double(40, self.leader_length)?;
            }
            DimensionType::Ordinate => {
                w.write_point3d(13, self.first_point)?;
                w.write_point3d(14, self.second_point)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    #[test]
    fn test_linear_dimension_markers() {
        let dim = Dimension::linear(
            Vector3::ZERO,
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            0.0,
        );
        let out = emit(&dim, DxfVersion::R14);
        let aligned = out.find("AcDbAlignedDimension").unwrap();
        let rotated = out.find("AcDbRotatedDimension").unwrap();
        assert!(aligned < rotated);
        assert_eq!(round_trip(&dim, DxfVersion::R14), dim);
    }

    #[test]
    fn test_radius_dimension_round_trip() {
        let mut dim = Dimension::radius(Vector3::new(1.0, 1.0, 0.0), Vector3::new(3.0, 1.0, 0.0));
        dim.type_flags = 32;
        dim.block_name = "*D5".into();
        dim.leader_length = 0.5;
        assert_eq!(dim.type_word(), 36);
        assert!(emit(&dim, DxfVersion::R2000).contains("100\nAcDbRadialDimension\n"));
        assert_eq!(round_trip(&dim, DxfVersion::R2000), dim);
        assert_eq!(round_trip(&dim, DxfVersion::R12), dim);
    }

    #[test]
    fn test_unknown_type_is_range_error() {
        let input = "  0\nDIMENSION\n 70\n9\n";
        let (dim, diagnostics) = parse::<Dimension>(input, DxfVersion::R12);
        assert_eq!(dim.dimension_type, DimensionType::Linear);
        assert!(diagnostics.contains("dimension_type = 9"));
    }
}
