//! Single-line text and the geometry it shares with attributes

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::{MAX_NAME_LENGTH, MAX_STRING_LENGTH};
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// Horizontal justification on code `72`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum TextHorizontalAlignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
    Aligned = 3,
    Middle = 4,
    Fit = 5,
}

impl TextHorizontalAlignment {
    pub fn from_value(value: i16) -> Result<Self> {
        Ok(match value {
            0 => Self::Left,
            1 => Self::Center,
            2 => Self::Right,
            3 => Self::Aligned,
            4 => Self::Middle,
            5 => Self::Fit,
            v => return Err(DxfError::range("horizontal_alignment", v as i64, 0, 5)),
        })
    }
}

/// Vertical justification (`73` on TEXT, `74` on attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum TextVerticalAlignment {
    #[default]
    Baseline = 0,
    Bottom = 1,
    Middle = 2,
    Top = 3,
}

impl TextVerticalAlignment {
    pub fn from_value(value: i16) -> Result<Self> {
        Ok(match value {
            0 => Self::Baseline,
            1 => Self::Bottom,
            2 => Self::Middle,
            3 => Self::Top,
            v => return Err(DxfError::range("vertical_alignment", v as i64, 0, 3)),
        })
    }
}

/// Placement and styling common to TEXT, ATTDEF and ATTRIB.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    /// First alignment point (`10`)
    pub insertion_point: Vector3,
    /// Second alignment point (`11`), used unless left/baseline justified
    pub alignment_point: Vector3,
    pub height: f64,
    pub value: String,
    /// Rotation in degrees
    pub rotation: f64,
    /// Relative X scale
    pub width_factor: f64,
    pub oblique_angle: f64,
    pub style: String,
    /// Mirroring: 2 backward, 4 upside down
    pub generation_flags: i16,
    pub horizontal_alignment: TextHorizontalAlignment,
    pub vertical_alignment: TextVerticalAlignment,
}

impl TextData {
    pub fn new() -> Self {
        TextData {
            insertion_point: Vector3::ZERO,
            alignment_point: Vector3::ZERO,
            height: 1.0,
            value: String::new(),
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            style: "STANDARD".to_string(),
            generation_flags: 0,
            horizontal_alignment: TextHorizontalAlignment::Left,
            vertical_alignment: TextVerticalAlignment::Baseline,
        }
    }

    fn is_justified(&self) -> bool {
        self.horizontal_alignment != TextHorizontalAlignment::Left
            || self.vertical_alignment != TextVerticalAlignment::Baseline
    }

    /// Codes shared by every text-like kind. Vertical alignment is left to
    /// the caller since its code differs.
    pub(crate) fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.insertion_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.alignment_point, pair)?,
            40 => self.height = pair.as_double()?,
            1 => {
                let (value, truncated) = pair.as_fixed_string(MAX_STRING_LENGTH);
                if truncated {
                    ctx.warn("read_text", format!("text value cut to {} characters", MAX_STRING_LENGTH));
                }
                self.value = value;
            }
            50 => self.rotation = pair.as_double()?,
            41 => self.width_factor = pair.as_double()?,
            51 => self.oblique_angle = pair.as_double()?,
            7 => self.style = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            71 => self.generation_flags = pair.as_i16()?,
            72 => self.horizontal_alignment = TextHorizontalAlignment::from_value(pair.as_i16()?)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// The `AcDbText` block up to and including the extrusion.
    pub(crate) fn write(
        &self,
        w: &mut dyn DxfStreamWriter,
        common: &EntityCommon,
        config: &DxfConfiguration,
    ) -> Result<()> {
        write_marker(w, "AcDbText", config)?;
        w.write_point3d(10, self.insertion_point)?;
        w.write_double(40, self.height)?;
        w.write_string(1, &self.value)?;
        if self.rotation != 0.0 {
            w.write_double(50, self.rotation)?;
        }
        if self.width_factor != 1.0 {
            w.write_double(41, self.width_factor)?;
        }
        if self.oblique_angle != 0.0 {
            w.write_double(51, self.oblique_angle)?;
        }
        if self.style != "STANDARD" && !self.style.is_empty() {
            w.write_string(7, &self.style)?;
        }
        if self.generation_flags != 0 {
            w.write_i16(71, self.generation_flags)?;
        }
        if self.horizontal_alignment != TextHorizontalAlignment::Left {
            w.write_i16(72, self.horizontal_alignment as i16)?;
        }
        if self.is_justified() {
            w.write_point3d(11, self.alignment_point)?;
        }
        write_extrusion(w, common, config)
    }
}

impl Default for TextData {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-line text
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub text: TextData,
}

impl Text {
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            text: TextData::new(),
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        let mut text = Self::new();
        text.text.value = value.into();
        text.text.insertion_point = insertion_point;
        text.text.height = height;
        text
    }

    pub fn value(&self) -> &str {
        &self.text.value
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Text);

impl EntityCodec for Text {
    const NAME: &'static str = "TEXT";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbText"];

    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool> {
        if pair.code == 73 {
            self.text.vertical_alignment = TextVerticalAlignment::from_value(pair.as_i16()?)?;
            return Ok(true);
        }
        self.text.read_code(pair, ctx)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        self.text.write(w, &self.common, config)?;
        // A second AcDbText opens the vertical alignment.
        write_marker(w, "AcDbText", config)?;
        if self.text.vertical_alignment != TextVerticalAlignment::Baseline {
            w.write_i16(73, self.text.vertical_alignment as i16)?;
        }
        Ok(())
    }
}
