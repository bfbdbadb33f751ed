//! Block reference (INSERT) and its trailing attributes

use super::attribute_entity::Attribute;
use super::seqend::SeqEnd;
use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{
    read_entity, read_point, write_entity, write_extrusion, write_marker, EntityCodec, ReadContext,
};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// A placed block reference, optionally arrayed in rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    pub block_name: String,
    pub insert_point: Vector3,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
    /// ATTRIB records, written after the insert when non-empty
    pub attributes: Vec<Attribute>,
    /// Terminates the attribute run
    pub seqend: SeqEnd,
}

impl Insert {
    pub fn new() -> Self {
        Insert {
            common: EntityCommon::new(),
            block_name: String::new(),
            insert_point: Vector3::ZERO,
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            rotation: 0.0,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
            attributes: Vec::new(),
            seqend: SeqEnd::new(),
        }
    }

    pub fn of_block(block_name: impl Into<String>, insert_point: Vector3) -> Self {
        Insert {
            block_name: block_name.into(),
            insert_point,
            ..Self::new()
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn attribute(&self, tag: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.tag.eq_ignore_ascii_case(tag))
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Insert);

impl EntityCodec for Insert {
    const NAME: &'static str = "INSERT";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbBlockReference", "AcDbMInsertBlock"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            // Derived from the attribute list.
            66 => {
                pair.as_i16()?;
            }
            2 => self.block_name = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            10 | 20 | 30 => read_point(&mut self.insert_point, pair)?,
            41 => self.x_scale = pair.as_double()?,
            42 => self.y_scale = pair.as_double()?,
            43 => self.z_scale = pair.as_double()?,
            50 => self.rotation = pair.as_double()?,
            70 => self.column_count = pair.as_i16()?,
            71 => self.row_count = pair.as_i16()?,
            44 => self.column_spacing = pair.as_double()?,
            45 => self.row_spacing = pair.as_double()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn read_children(&mut self, reader: &mut dyn DxfStreamReader, ctx: &mut ReadContext<'_>) -> Result<()> {
        while let Some(pair) = reader.read_pair()? {
            if pair.code != 0 {
                reader.push_back(pair);
                break;
            }
            match pair.value.trim() {
                "ATTRIB" => {
                    let attribute = read_entity::<Attribute>(reader, ctx)?;
                    self.attributes.push(attribute);
                }
                "SEQEND" if !self.attributes.is_empty() => {
                    self.seqend = read_entity::<SeqEnd>(reader, ctx)?;
                    break;
                }
                other => {
                    if !self.attributes.is_empty() {
                        ctx.warn(
                            "read_insert",
                            format!("attribute run ended by {} without SEQEND", other),
                        );
                    }
                    reader.push_back(pair);
                    break;
                }
            }
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbBlockReference", config)?;
        if !self.attributes.is_empty() {
            w.write_i16(66, 1)?;
        }
        w.write_string(2, &self.block_name)?;
        w.write_point3d(10, self.insert_point)?;
        for (code, scale) in [(41, self.x_scale), (42, self.y_scale), (43, self.z_scale)] {
            if scale != 1.0 {
                w.write_double(code, scale)?;
            }
        }
        if self.rotation != 0.0 {
            w.write_double(50, self.rotation)?;
        }
        if self.column_count != 1 {
            w.write_i16(70, self.column_count)?;
        }
        if self.row_count != 1 {
            w.write_i16(71, self.row_count)?;
        }
        if self.column_spacing != 0.0 {
            w.write_double(44, self.column_spacing)?;
        }
        if self.row_spacing != 0.0 {
            w.write_double(45, self.row_spacing)?;
        }
        write_extrusion(w, &self.common, config)
    }

    fn write_children(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        if self.attributes.is_empty() {
            return Ok(());
        }
        for attribute in &self.attributes {
            write_entity(w, attribute, config)?;
        }
        write_entity(w, &self.seqend, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    #[test]
    fn test_plain_insert() {
        let insert = Insert::of_block("DOOR", Vector3::new(10.0, 5.0, 0.0));
        let out = emit(&insert, DxfVersion::R12);
        assert!(!out.contains(" 66\n"));
        assert!(!out.contains("SEQEND"));
        assert_eq!(round_trip(&insert, DxfVersion::R12), insert);
    }

    #[test]
    fn test_insert_with_attributes() {
        let mut insert = Insert::of_block("TITLE", Vector3::ZERO);
        insert.rotation = 90.0;
        insert.add_attribute(Attribute::with_tag("NAME", "Plan", Vector3::new(1.0, 1.0, 0.0)));
        insert.add_attribute(Attribute::with_tag("DATE", "2024", Vector3::new(1.0, 2.0, 0.0)));

        let out = emit(&insert, DxfVersion::R14);
        assert!(out.contains(" 66\n1\n"));
        assert_eq!(out.matches("  0\nATTRIB\n").count(), 2);
        assert!(out.contains("  0\nSEQEND\n"));

        let back = round_trip(&insert, DxfVersion::R14);
        assert_eq!(back, insert);
        assert_eq!(back.attribute("date").unwrap().value(), "2024");
    }

    #[test]
    fn test_missing_seqend_is_reported() {
        let input = "  0\nINSERT\n 66\n1\n  2\nB\n  0\nATTRIB\n  2\nX\n  1\nv\n  0\nLINE\n";
        let (insert, diagnostics) = parse::<Insert>(input, DxfVersion::R12);
        assert_eq!(insert.attributes.len(), 1);
        assert!(diagnostics.contains("attribute run ended by LINE without SEQEND"));
    }
}
