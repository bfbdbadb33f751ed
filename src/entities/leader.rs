//! Leader entity

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, read_point_list, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{Color, DxfVersion, Vector3};

/// Leader path on code `72`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum LeaderPathType {
    #[default]
    StraightLine = 0,
    Spline = 1,
}

impl LeaderPathType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::StraightLine),
            1 => Ok(Self::Spline),
            v => Err(DxfError::range("path_type", v as i64, 0, 1)),
        }
    }
}

/// Annotation kind on code `73`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum LeaderCreationType {
    WithText = 0,
    WithTolerance = 1,
    WithBlock = 2,
    #[default]
    NoAnnotation = 3,
}

impl LeaderCreationType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::WithText),
            1 => Ok(Self::WithTolerance),
            2 => Ok(Self::WithBlock),
            3 => Ok(Self::NoAnnotation),
            v => Err(DxfError::range("creation_flag", v as i64, 0, 3)),
        }
    }
}

/// Hookline direction on code `74`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum HooklineDirection {
    /// Opposite to the horizontal vector
    #[default]
    Opposite = 0,
    Same = 1,
}

impl HooklineDirection {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::Opposite),
            1 => Ok(Self::Same),
            v => Err(DxfError::range("hookline_direction_flag", v as i64, 0, 1)),
        }
    }
}

fn flag(field: &'static str, value: i16) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(DxfError::range(field, v as i64, 0, 1)),
    }
}

/// A leader line pointing at an annotation.
///
/// The bounded flags are private; their setters refuse out-of-range values
/// and leave the entity untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub common: EntityCommon,
    pub dimension_style_name: String,
    arrow_head: bool,
    path_type: LeaderPathType,
    creation_type: LeaderCreationType,
    hookline_direction: HooklineDirection,
    hookline: bool,
    pub text_height: f64,
    pub text_width: f64,
    pub vertices: Vec<Vector3>,
    /// Used when the dimension line color is BYBLOCK
    pub color: Color,
    /// Hard reference to the annotation (`340`)
    pub annotation_handle: String,
    pub horizontal_direction: Vector3,
    pub block_offset: Vector3,
    pub annotation_offset: Vector3,
    declared_vertex_count: Option<i16>,
}

impl Leader {
    pub fn new() -> Self {
        Leader {
            common: EntityCommon::new(),
            dimension_style_name: "STANDARD".to_string(),
            arrow_head: true,
            path_type: LeaderPathType::StraightLine,
            creation_type: LeaderCreationType::NoAnnotation,
            hookline_direction: HooklineDirection::Opposite,
            hookline: false,
            text_height: 0.0,
            text_width: 0.0,
            vertices: Vec::new(),
            color: Color::BY_LAYER,
            annotation_handle: String::new(),
            horizontal_direction: Vector3::UNIT_X,
            block_offset: Vector3::ZERO,
            annotation_offset: Vector3::ZERO,
            declared_vertex_count: None,
        }
    }

    pub fn from_vertices(vertices: Vec<Vector3>) -> Self {
        Leader {
            vertices,
            ..Self::new()
        }
    }

    pub fn set_dimension_style_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.dimension_style_name = name.into();
        self
    }

    /// `71`: 0 no arrowhead, 1 arrowhead.
    pub fn arrow_head_flag(&self) -> i16 {
        self.arrow_head as i16
    }

    pub fn set_arrow_head_flag(&mut self, value: i16) -> Result<&mut Self> {
        self.arrow_head = flag("arrow_head_flag", value)?;
        Ok(self)
    }

    pub fn path_type(&self) -> LeaderPathType {
        self.path_type
    }

    pub fn set_path_type(&mut self, value: i16) -> Result<&mut Self> {
        self.path_type = LeaderPathType::from_value(value)?;
        Ok(self)
    }

    pub fn creation_flag(&self) -> LeaderCreationType {
        self.creation_type
    }

    pub fn set_creation_flag(&mut self, value: i16) -> Result<&mut Self> {
        self.creation_type = LeaderCreationType::from_value(value)?;
        Ok(self)
    }

    pub fn hookline_direction_flag(&self) -> HooklineDirection {
        self.hookline_direction
    }

    pub fn set_hookline_direction_flag(&mut self, value: i16) -> Result<&mut Self> {
        self.hookline_direction = HooklineDirection::from_value(value)?;
        Ok(self)
    }

    /// `75`: 0 no hookline, 1 hookline.
    pub fn hookline_flag(&self) -> i16 {
        self.hookline as i16
    }

    pub fn set_hookline_flag(&mut self, value: i16) -> Result<&mut Self> {
        self.hookline = flag("hookline_flag", value)?;
        Ok(self)
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Leader);

impl EntityCodec for Leader {
    const NAME: &'static str = "LEADER";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbLeader"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            3 => {
                self.set_dimension_style_name(pair.as_fixed_string(MAX_NAME_LENGTH).0.trim());
            }
            71 => {
                self.set_arrow_head_flag(pair.as_i16()?)?;
            }
            72 => {
                self.set_path_type(pair.as_i16()?)?;
            }
            73 => {
                self.set_creation_flag(pair.as_i16()?)?;
            }
            74 => {
                self.set_hookline_direction_flag(pair.as_i16()?)?;
            }
            75 => {
                self.set_hookline_flag(pair.as_i16()?)?;
            }
            40 => self.text_height = pair.as_double()?,
            41 => self.text_width = pair.as_double()?,
            76 => self.declared_vertex_count = Some(pair.as_i16()?),
            10 | 20 | 30 => read_point_list(&mut self.vertices, pair)?,
            77 => self.color = Color::from_index(pair.as_i16()?),
            340 => self.annotation_handle = pair.as_handle()?.to_hex(),
            211 | 221 | 231 => read_point(&mut self.horizontal_direction, pair)?,
            212 | 222 | 232 => read_point(&mut self.block_offset, pair)?,
            213 | 223 | 233 => read_point(&mut self.annotation_offset, pair)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finish_read(&mut self, ctx: &mut ReadContext<'_>) {
        if let Some(declared) = self.declared_vertex_count.take() {
            if declared as usize != self.vertices.len() {
                ctx.warn(
                    "read_leader",
                    format!(
                        "vertex count declares {} but {} vertices were read",
                        declared,
                        self.vertices.len()
                    ),
                );
            }
        }
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.vertices.len() < 2 {
            return Err(DxfError::validation(
                Self::NAME,
                format!("{} vertices, at least 2 required", self.vertices.len()),
            ));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbLeader", config)?;
        w.write_string(3, &self.dimension_style_name)?;
        w.write_i16(71, self.arrow_head_flag())?;
        w.write_i16(72, self.path_type as i16)?;
        w.write_i16(73, self.creation_type as i16)?;
        w.write_i16(74, self.hookline_direction as i16)?;
        w.write_i16(75, self.hookline_flag())?;
        if self.text_height != 0.0 {
            w.write_double(40, self.text_height)?;
        }
        if self.text_width != 0.0 {
            w.write_double(41, self.text_width)?;
        }
        w.write_i16(76, self.vertices.len() as i16)?;
        for vertex in &self.vertices {
            w.write_point3d(10, *vertex)?;
        }
        if !self.color.is_by_layer() {
            w.write_i16(77, self.color.index())?;
        }
        w.write_handle_text(340, &self.annotation_handle)?;
        write_extrusion(w, &self.common, config)?;
        w.write_point3d(211, self.horizontal_direction)?;
        w.write_point3d(212, self.block_offset)?;
        w.write_point3d(213, self.annotation_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    fn sample() -> Leader {
        Leader::from_vertices(vec![Vector3::ZERO, Vector3::new(2.0, 2.0, 0.0), Vector3::new(4.0, 2.0, 0.0)])
    }

    #[test]
    fn test_creation_flag_range() {
        let mut leader = sample();
        let before = leader.clone();
        let err = leader.set_creation_flag(5).unwrap_err();
        assert!(matches!(err, DxfError::Range { field: "creation_flag", value: 5, min: 0, max: 3 }));
        assert_eq!(leader, before);

        leader.set_creation_flag(0).unwrap();
        assert_eq!(leader.creation_flag(), LeaderCreationType::WithText);
    }

    #[test]
    fn test_flag_setters_reject_out_of_range() {
        let mut leader = sample();
        assert!(leader.set_arrow_head_flag(2).is_err());
        assert!(leader.set_path_type(-1).is_err());
        assert!(leader.set_hookline_direction_flag(3).is_err());
        assert!(leader.set_hookline_flag(7).is_err());
        assert_eq!(leader, sample());

        leader
            .set_arrow_head_flag(0)
            .and_then(|l| l.set_hookline_flag(1))
            .unwrap();
        assert_eq!(leader.arrow_head_flag(), 0);
        assert_eq!(leader.hookline_flag(), 1);
    }

    #[test]
    fn test_dimension_style_name_setter() {
        let mut leader = sample();
        leader.set_dimension_style_name("ISO-25");
        assert_eq!(leader.dimension_style_name, "ISO-25");
        assert_eq!(leader.common.layer, "0");
    }

    #[test]
    fn test_leader_round_trip() {
        let mut leader = sample();
        leader.set_path_type(1).unwrap().set_hookline_direction_flag(1).unwrap();
        leader.annotation_handle = "2f".into();
        leader.text_height = 0.25;
        let out = emit(&leader, DxfVersion::R14);
        assert!(out.contains(" 76\n3\n"));
        assert!(out.contains("340\n2f\n"));
        assert_eq!(round_trip(&leader, DxfVersion::R14), leader);
    }

    #[test]
    fn test_out_of_range_on_read_keeps_default() {
        let input = "  0\nLEADER\n100\nAcDbLeader\n 73\n7\n 10\n0.0\n 20\n0.0\n 10\n1.0\n 20\n1.0\n";
        let (leader, diagnostics) = parse::<Leader>(input, DxfVersion::R14);
        assert_eq!(leader.creation_flag(), LeaderCreationType::NoAnnotation);
        assert_eq!(leader.vertices.len(), 2);
        assert!(diagnostics.contains("creation_flag = 7"));
    }
}
