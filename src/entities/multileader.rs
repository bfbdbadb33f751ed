//! Multileader entity (MULTILEADER, also spelled MLEADER)

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

const CONTEXT_OPEN: &str = "CONTEXT_DATA{";

/// Multileader line kind on code `170`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum MultiLeaderLineType {
    Invisible = 0,
    #[default]
    Straight = 1,
    Spline = 2,
}

impl MultiLeaderLineType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::Invisible),
            1 => Ok(Self::Straight),
            2 => Ok(Self::Spline),
            v => Err(DxfError::range("leader_line_type", v as i64, 0, 2)),
        }
    }
}

/// Annotation kind on code `172`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum MultiLeaderContentType {
    None = 0,
    Block = 1,
    #[default]
    MText = 2,
    Tolerance = 3,
}

impl MultiLeaderContentType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Block),
            2 => Ok(Self::MText),
            3 => Ok(Self::Tolerance),
            v => Err(DxfError::range("content_type", v as i64, 0, 3)),
        }
    }
}

/// A leader with several leader lines sharing one annotation.
///
/// The `CONTEXT_DATA{` block holds the resolved geometry. It is kept as the
/// raw pairs between its delimiters and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLeader {
    pub common: EntityCommon,
    pub version: i16,
    pub context_data: Vec<(i32, String)>,
    pub style_handle: String,
    pub property_override_flags: i32,
    leader_line_type: MultiLeaderLineType,
    /// Raw color word (`91`)
    pub leader_line_color: i32,
    pub leader_linetype_handle: String,
    pub leader_line_weight: i16,
    pub landing_enabled: bool,
    pub dogleg_enabled: bool,
    pub dogleg_length: f64,
    pub arrowhead_handle: String,
    pub arrowhead_size: f64,
    content_type: MultiLeaderContentType,
    pub text_style_handle: String,
    pub text_left_attachment: i16,
    /// `95`
    pub text_right_attachment: i32,
    pub text_angle_type: i16,
    pub text_alignment: i16,
    pub text_color: i32,
    pub text_frame: bool,
    pub block_content_handle: String,
    pub block_content_color: i32,
    pub block_content_scale: Vector3,
    pub block_content_rotation: f64,
    pub block_connection_type: i16,
    pub scale: f64,
    pub text_attachment_direction: i16,
    pub text_bottom_attachment: i16,
    pub text_top_attachment: i16,
}

/// Color word for BYBLOCK.
pub const COLOR_BY_BLOCK: i32 = -1056964608;

impl MultiLeader {
    pub fn new() -> Self {
        MultiLeader {
            common: EntityCommon::new(),
            version: 2,
            context_data: Vec::new(),
            style_handle: String::new(),
            property_override_flags: 0,
            leader_line_type: MultiLeaderLineType::Straight,
            leader_line_color: COLOR_BY_BLOCK,
            leader_linetype_handle: String::new(),
            leader_line_weight: -2,
            landing_enabled: true,
            dogleg_enabled: true,
            dogleg_length: 8.0,
            arrowhead_handle: String::new(),
            arrowhead_size: 4.0,
            content_type: MultiLeaderContentType::MText,
            text_style_handle: String::new(),
            text_left_attachment: 1,
            text_right_attachment: 1,
            text_angle_type: 1,
            text_alignment: 0,
            text_color: COLOR_BY_BLOCK,
            text_frame: false,
            block_content_handle: String::new(),
            block_content_color: COLOR_BY_BLOCK,
            block_content_scale: Vector3::new(1.0, 1.0, 1.0),
            block_content_rotation: 0.0,
            block_connection_type: 0,
            scale: 1.0,
            text_attachment_direction: 0,
            text_bottom_attachment: 9,
            text_top_attachment: 9,
        }
    }

    pub fn leader_line_type(&self) -> MultiLeaderLineType {
        self.leader_line_type
    }

    pub fn set_leader_line_type(&mut self, value: i16) -> Result<&mut Self> {
        self.leader_line_type = MultiLeaderLineType::from_value(value)?;
        Ok(self)
    }

    pub fn content_type(&self) -> MultiLeaderContentType {
        self.content_type
    }

    pub fn set_content_type(&mut self, value: i16) -> Result<&mut Self> {
        self.content_type = MultiLeaderContentType::from_value(value)?;
        Ok(self)
    }
}

impl Default for MultiLeader {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(MultiLeader);

impl EntityCodec for MultiLeader {
    const NAME: &'static str = "MULTILEADER";
    const INTRODUCED: DxfVersion = DxfVersion::R2007;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbMLeader"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            270 => self.version = pair.as_i16()?,
            340 => self.style_handle = pair.as_handle()?.to_hex(),
            90 => self.property_override_flags = pair.as_i32()?,
            170 => {
                self.set_leader_line_type(pair.as_i16()?)?;
            }
            91 => self.leader_line_color = pair.as_i32()?,
            341 => self.leader_linetype_handle = pair.as_handle()?.to_hex(),
            171 => self.leader_line_weight = pair.as_i16()?,
            290 => self.landing_enabled = pair.as_bool()?,
            291 => self.dogleg_enabled = pair.as_bool()?,
            41 => self.dogleg_length = pair.as_double()?,
            342 => self.arrowhead_handle = pair.as_handle()?.to_hex(),
            42 => self.arrowhead_size = pair.as_double()?,
            172 => {
                self.set_content_type(pair.as_i16()?)?;
            }
            343 => self.text_style_handle = pair.as_handle()?.to_hex(),
            173 => self.text_left_attachment = pair.as_i16()?,
            95 => self.text_right_attachment = pair.as_i32()?,
            174 => self.text_angle_type = pair.as_i16()?,
            175 => self.text_alignment = pair.as_i16()?,
            92 => self.text_color = pair.as_i32()?,
            292 => self.text_frame = pair.as_bool()?,
            344 => self.block_content_handle = pair.as_handle()?.to_hex(),
            93 => self.block_content_color = pair.as_i32()?,
            10 | 20 | 30 => read_point(&mut self.block_content_scale, pair)?,
            43 => self.block_content_rotation = pair.as_double()?,
            176 => self.block_connection_type = pair.as_i16()?,
            45 => self.scale = pair.as_double()?,
            271 => self.text_attachment_direction = pair.as_i16()?,
            272 => self.text_bottom_attachment = pair.as_i16()?,
            273 => self.text_top_attachment = pair.as_i16()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn read_nested(
        &mut self,
        pair: &DxfCodePair,
        reader: &mut dyn DxfStreamReader,
        ctx: &mut ReadContext<'_>,
    ) -> Result<bool> {
        if pair.code != 300 || pair.value.trim() != CONTEXT_OPEN {
            return Ok(false);
        }
        self.context_data.clear();
        while let Some(inner) = reader.read_pair()? {
            match inner.code {
                301 => return Ok(true),
                0 => {
                    reader.push_back(inner);
                    break;
                }
                _ => self.context_data.push((inner.code, inner.value)),
            }
        }
        ctx.warn("read_multileader", "context data block is not closed by 301");
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbMLeader", config)?;
        w.write_i16(270, self.version)?;
        if !self.context_data.is_empty() {
            w.write_string(300, CONTEXT_OPEN)?;
            for (code, value) in &self.context_data {
                w.write_pair(*code, value)?;
            }
            w.write_string(301, "}")?;
        }
        w.write_handle_text(340, &self.style_handle)?;
        w.write_i32(90, self.property_override_flags)?;
        w.write_i16(170, self.leader_line_type as i16)?;
        w.write_i32(91, self.leader_line_color)?;
        w.write_handle_text(341, &self.leader_linetype_handle)?;
        w.write_i16(171, self.leader_line_weight)?;
        w.write_bool(290, self.landing_enabled)?;
        w.write_bool(291, self.dogleg_enabled)?;
        w.write_double(41, self.dogleg_length)?;
        w.write_handle_text(342, &self.arrowhead_handle)?;
        w.write_double(42, self.arrowhead_size)?;
        w.write_i16(172, self.content_type as i16)?;
        w.write_handle_text(343, &self.text_style_handle)?;
        w.write_i16(173, self.text_left_attachment)?;
        w.write_i32(95, self.text_right_attachment)?;
        w.write_i16(174, self.text_angle_type)?;
        w.write_i16(175, self.text_alignment)?;
        w.write_i32(92, self.text_color)?;
        w.write_bool(292, self.text_frame)?;
        w.write_handle_text(344, &self.block_content_handle)?;
        w.write_i32(93, self.block_content_color)?;
        w.write_point3d(10, self.block_content_scale)?;
        w.write_double(43, self.block_content_rotation)?;
        w.write_i16(176, self.block_connection_type)?;
        w.write_double(45, self.scale)?;
        w.write_i16(271, self.text_attachment_direction)?;
        w.write_i16(272, self.text_bottom_attachment)?;
        w.write_i16(273, self.text_top_attachment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    fn context() -> Vec<(i32, String)> {
        vec![
            (40, "1.0".to_string()),
            (10, "2.0".to_string()),
            (20, "3.0".to_string()),
            (30, "0.0".to_string()),
            (302, "LEADER{".to_string()),
            (304, "LEADER_LINE{".to_string()),
            (10, "0.0".to_string()),
            (20, "0.0".to_string()),
            (30, "0.0".to_string()),
            (305, "}".to_string()),
            (303, "}".to_string()),
        ]
    }

    #[test]
    fn test_context_data_kept_verbatim() {
        let mut mleader = MultiLeader::new();
        mleader.context_data = context();
        mleader.style_handle = "12".into();
        mleader.set_content_type(1).unwrap();
        mleader.block_content_scale = Vector3::new(2.0, 2.0, 1.0);

        let out = emit(&mleader, DxfVersion::R2007);
        assert!(out.contains("300\nCONTEXT_DATA{\n 40\n1.0\n"));
        assert!(out.contains("303\n}\n301\n}\n340\n12\n"));

        let back = round_trip(&mleader, DxfVersion::R2007);
        assert_eq!(back.context_data, context());
        assert_eq!(back.block_content_scale, Vector3::new(2.0, 2.0, 1.0));
        assert_eq!(back, mleader);
    }

    #[test]
    fn test_line_type_range() {
        let mut mleader = MultiLeader::new();
        assert!(mleader.set_leader_line_type(3).is_err());
        assert_eq!(mleader.leader_line_type(), MultiLeaderLineType::Straight);
        mleader.set_leader_line_type(2).unwrap();
        assert_eq!(mleader.leader_line_type(), MultiLeaderLineType::Spline);
    }

    #[test]
    fn test_unclosed_context_warns() {
        let input = "  0\nMULTILEADER\n100\nAcDbMLeader\n270\n2\n300\nCONTEXT_DATA{\n 40\n1.0\n";
        let (mleader, diagnostics) = parse::<MultiLeader>(input, DxfVersion::R2007);
        assert_eq!(mleader.context_data, vec![(40, "1.0".to_string())]);
        assert!(diagnostics.contains("context data block is not closed"));
    }

    #[test]
    fn test_old_version_warns() {
        let input = "  0\nMULTILEADER\n270\n2\n";
        let (_, diagnostics) = parse::<MultiLeader>(input, DxfVersion::R2000);
        assert!(diagnostics.contains("introduced in R2007"));
    }
}
