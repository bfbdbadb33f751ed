//! Multiline text

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// Characters per `3` continuation line.
pub const CHUNK_LENGTH: usize = 250;

/// Paragraph text with inline formatting codes
#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    pub insertion_point: Vector3,
    /// Nominal character height
    pub height: f64,
    /// Reference rectangle width
    pub rectangle_width: f64,
    /// 1..9: top/middle/bottom by left/center/right
    pub attachment_point: i16,
    /// 1 left to right, 3 top to bottom, 5 by style
    pub drawing_direction: i16,
    /// Full text; split into `3` chunks and a final `1` on the wire
    pub value: String,
    pub style: String,
    /// X axis direction; zero when the rotation angle is used instead
    pub x_axis_direction: Vector3,
    /// Rotation in degrees
    pub rotation: f64,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            insertion_point: Vector3::ZERO,
            height: 1.0,
            rectangle_width: 0.0,
            attachment_point: 1,
            drawing_direction: 1,
            value: String::new(),
            style: "STANDARD".to_string(),
            x_axis_direction: Vector3::ZERO,
            rotation: 0.0,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        MText {
            value: value.into(),
            insertion_point,
            height,
            ..Self::new()
        }
    }

    /// The value split at character boundaries into wire chunks. The last
    /// chunk goes on code `1`, the others on `3`.
    pub fn chunks(&self) -> Vec<&str> {
        let mut chunks = Vec::new();
        let mut rest = self.value.as_str();
        while rest.chars().count() > CHUNK_LENGTH {
            let split = rest
                .char_indices()
                .nth(CHUNK_LENGTH)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (head, tail) = rest.split_at(split);
            chunks.push(head);
            rest = tail;
        }
        chunks.push(rest);
        chunks
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(MText);

impl EntityCodec for MText {
    const NAME: &'static str = "MTEXT";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbMText"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.insertion_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.x_axis_direction, pair)?,
            40 => self.height = pair.as_double()?,
            41 => self.rectangle_width = pair.as_double()?,
            71 => self.attachment_point = pair.as_i16()?,
            72 => self.drawing_direction = pair.as_i16()?,
            3 | 1 => self.value.push_str(pair.as_str()),
            7 => self.style = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            50 => self.rotation = pair.as_double()?,
            73 => self.line_spacing_style = pair.as_i16()?,
            44 => self.line_spacing_factor = pair.as_double()?,
            // Computed extents, not stored.
            42 | 43 => {
                pair.as_double()?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbMText", config)?;
        w.write_point3d(10, self.insertion_point)?;
        w.write_double(40, self.height)?;
        w.write_double(41, self.rectangle_width)?;
        w.write_i16(71, self.attachment_point)?;
        w.write_i16(72, self.drawing_direction)?;
        let chunks = self.chunks();
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.iter().enumerate() {
            w.write_string(if i == last { 1 } else { 3 }, chunk)?;
        }
        if self.style != "STANDARD" && !self.style.is_empty() {
            w.write_string(7, &self.style)?;
        }
        write_extrusion(w, &self.common, config)?;
        if self.x_axis_direction != Vector3::ZERO {
            w.write_point3d(11, self.x_axis_direction)?;
        }
        if self.rotation != 0.0 {
            w.write_double(50, self.rotation)?;
        }
        if self.line_spacing_style != 1 || self.line_spacing_factor != 1.0 {
            w.write_i16(73, self.line_spacing_style)?;
            w.write_double(44, self.line_spacing_factor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};

    #[test]
    fn test_short_text_single_chunk() {
        let mtext = MText::with_value("Line one\\PLine two", Vector3::ZERO, 2.0);
        assert_eq!(mtext.chunks(), vec!["Line one\\PLine two"]);
        let out = emit(&mtext, DxfVersion::R14);
        assert!(out.contains("  1\nLine one\\PLine two\n"));
        assert!(!out.contains("  3\n"));
    }

    #[test]
    fn test_long_text_is_chunked() {
        let value: String = "abcdefghij".repeat(60);
        let mtext = MText::with_value(value.clone(), Vector3::new(1.0, 1.0, 0.0), 1.0);
        let chunks = mtext.chunks();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), CHUNK_LENGTH);
        assert_eq!(chunks[2].len(), 100);

        let out = emit(&mtext, DxfVersion::R14);
        assert_eq!(out.matches("  3\n").count(), 2);
        let back = round_trip(&mtext, DxfVersion::R14);
        assert_eq!(back.value, value);
        assert_eq!(back, mtext);
    }

    #[test]
    fn test_chunk_ending_in_blank_round_trips() {
        let value = format!("{} b", "a".repeat(CHUNK_LENGTH - 1));
        let mtext = MText::with_value(value.clone(), Vector3::ZERO, 1.0);
        assert!(mtext.chunks()[0].ends_with(' '));
        let back = round_trip(&mtext, DxfVersion::R2000);
        assert_eq!(back.value.len(), value.len());
        assert_eq!(back, mtext);
    }

    #[test]
    fn test_chunks_respect_char_boundaries() {
        let value: String = "é".repeat(CHUNK_LENGTH + 1);
        let mtext = MText::with_value(value, Vector3::ZERO, 1.0);
        let chunks = mtext.chunks();
        assert_eq!(chunks[0].chars().count(), CHUNK_LENGTH);
        assert_eq!(chunks[1], "é");
    }
}
