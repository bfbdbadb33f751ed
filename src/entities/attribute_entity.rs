//! Attribute (ATTRIB) attached to a block insert

use super::attribute_definition::AttributeFlags;
use super::text::{TextData, TextVerticalAlignment};
use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::DxfStreamWriter;
use crate::types::{DxfVersion, Vector3};

/// A tagged value following an INSERT
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub common: EntityCommon,
    pub text: TextData,
    pub tag: String,
    pub flags: AttributeFlags,
    pub field_length: i16,
}

impl Attribute {
    pub fn new() -> Self {
        Attribute {
            common: EntityCommon::new(),
            text: TextData::new(),
            tag: String::new(),
            flags: AttributeFlags::empty(),
            field_length: 0,
        }
    }

    pub fn with_tag(tag: impl Into<String>, value: impl Into<String>, insertion_point: Vector3) -> Self {
        let mut attrib = Self::new();
        attrib.tag = tag.into();
        attrib.text.value = value.into();
        attrib.text.insertion_point = insertion_point;
        attrib
    }

    pub fn value(&self) -> &str {
        &self.text.value
    }

    /// Hidden by its attribute flags, independent of entity visibility.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(AttributeFlags::INVISIBLE)
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Attribute);

impl EntityCodec for Attribute {
    const NAME: &'static str = "ATTRIB";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbText", "AcDbAttribute"];

    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            2 => self.tag = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            70 => self.flags = AttributeFlags::from_bits_truncate(pair.as_i16()?),
            73 => self.field_length = pair.as_i16()?,
            74 => self.text.vertical_alignment = TextVerticalAlignment::from_value(pair.as_i16()?)?,
            _ => return self.text.read_code(pair, ctx),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        self.text.write(w, &self.common, config)?;
        write_marker(w, "AcDbAttribute", config)?;
        w.write_string(2, &self.tag)?;
        w.write_i16(70, self.flags.bits())?;
        if self.field_length != 0 {
            w.write_i16(73, self.field_length)?;
        }
        if self.text.vertical_alignment != TextVerticalAlignment::Baseline {
            w.write_i16(74, self.text.vertical_alignment as i16)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, round_trip};

    #[test]
    fn test_attribute_round_trip() {
        let mut attrib = Attribute::with_tag("ROOM", "101", Vector3::new(2.0, 3.0, 0.0));
        attrib.flags = AttributeFlags::INVISIBLE;
        assert!(attrib.is_hidden());
        assert_eq!(round_trip(&attrib, DxfVersion::R14), attrib);
        assert_eq!(round_trip(&attrib, DxfVersion::R11), attrib);
    }

    #[test]
    fn test_attribute_body() {
        let attrib = Attribute::with_tag("ROOM", "101", Vector3::ZERO);
        let out = emit(&attrib, DxfVersion::R12);
        assert!(out.ends_with("  1\n101\n  2\nROOM\n 70\n0\n"));
    }
}
