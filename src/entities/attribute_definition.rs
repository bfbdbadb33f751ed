//! Attribute definition (ATTDEF)

use super::text::{TextData, TextVerticalAlignment};
use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::DxfStreamWriter;
use crate::types::DxfVersion;
use bitflags::bitflags;

bitflags! {
    /// Attribute flags on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeFlags: i16 {
        const INVISIBLE = 1;
        const CONSTANT = 2;
        const VERIFY = 4;
        const PRESET = 8;
    }
}

/// Template for the attributes of a block insert
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    pub common: EntityCommon,
    /// Placement, style and default value (`1`)
    pub text: TextData,
    pub prompt: String,
    pub tag: String,
    pub flags: AttributeFlags,
    /// Field length on code `73`
    pub field_length: i16,
}

impl AttributeDefinition {
    pub fn new() -> Self {
        AttributeDefinition {
            common: EntityCommon::new(),
            text: TextData::new(),
            prompt: String::new(),
            tag: String::new(),
            flags: AttributeFlags::empty(),
            field_length: 0,
        }
    }

    pub fn with_tag(tag: impl Into<String>, prompt: impl Into<String>, default_value: impl Into<String>) -> Self {
        let mut attdef = Self::new();
        attdef.tag = tag.into();
        attdef.prompt = prompt.into();
        attdef.text.value = default_value.into();
        attdef
    }

    pub fn default_value(&self) -> &str {
        &self.text.value
    }
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(AttributeDefinition);

impl EntityCodec for AttributeDefinition {
    const NAME: &'static str = "ATTDEF";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbText", "AcDbAttributeDefinition"];

    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            3 => self.prompt = pair.as_string(),
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
        write_marker(w, "AcDbAttributeDefinition", config)?;
        w.write_string(3, &self.prompt)?;
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
    fn test_attdef_round_trip() {
        let mut attdef = AttributeDefinition::with_tag("PART_NO", "Part number?", "000");
        attdef.flags = AttributeFlags::VERIFY | AttributeFlags::PRESET;
        attdef.text.vertical_alignment = TextVerticalAlignment::Middle;
        attdef.field_length = 12;
        assert_eq!(round_trip(&attdef, DxfVersion::R14), attdef);
        assert_eq!(round_trip(&attdef, DxfVersion::R12), attdef);
        assert_eq!(attdef.default_value(), "000");
    }

    #[test]
    fn test_attdef_markers() {
        let attdef = AttributeDefinition::with_tag("T", "P", "V");
        let out = emit(&attdef, DxfVersion::R13);
        let text = out.find("AcDbText").unwrap();
        let def = out.find("AcDbAttributeDefinition").unwrap();
        assert!(text < def);
        assert!(out.ends_with("  3\nP\n  2\nT\n 70\n0\n"));
    }
}
