//! Dictionary object

use crate::error::Result;
use crate::io::dxf::codec::object::{ObjectCodec, ObjectCommon};
use crate::io::dxf::codec::ReadContext;
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::DxfVersion;
use indexmap::IndexMap;

/// Target of one dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Hex handle of the entry object
    pub handle: String,
    /// `360` hard owner instead of `350` soft owner
    pub hard_owner: bool,
}

/// Named entries pointing at other objects, kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    pub common: ObjectCommon,
    pub entries: IndexMap<String, DictionaryEntry>,
    /// `280`
    pub hard_owner: bool,
    /// Duplicate record cloning (`281`, R2000+)
    pub cloning: i16,
    pending_name: Option<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            common: ObjectCommon::new(),
            entries: IndexMap::new(),
            hard_owner: false,
            cloning: 1,
            pending_name: None,
        }
    }

    /// Insert or replace an entry; returns the previous target.
    pub fn insert(&mut self, name: impl Into<String>, handle: impl Into<String>) -> Option<DictionaryEntry> {
        self.entries.insert(
            name.into(),
            DictionaryEntry {
                handle: handle.into(),
                hard_owner: false,
            },
        )
    }

    pub fn get(&self, name: &str) -> Option<&DictionaryEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl_object!(Dictionary);

impl ObjectCodec for Dictionary {
    const NAME: &'static str = "DICTIONARY";
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbDictionary"];

    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            280 => self.hard_owner = pair.as_i16()? != 0,
            281 => self.cloning = pair.as_i16()?,
            3 => {
                if let Some(name) = self.pending_name.take() {
                    ctx.warn("read_dictionary", format!("entry '{}' has no handle", name));
                }
                self.pending_name = Some(pair.as_fixed_string(MAX_NAME_LENGTH).0);
            }
            350 | 360 => {
                let handle = pair.as_handle()?.to_hex();
                let Some(name) = self.pending_name.take() else {
                    ctx.warn(
                        "read_dictionary",
                        format!("handle {} on group code {} without an entry name", handle, pair.code),
                    );
                    return Ok(true);
                };
                let entry = DictionaryEntry {
                    handle,
                    hard_owner: pair.code == 360,
                };
                if self.entries.insert(name.clone(), entry).is_some() {
                    ctx.warn("read_dictionary", format!("duplicate entry '{}' replaced", name));
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finish_read(&mut self, ctx: &mut ReadContext<'_>) {
        if let Some(name) = self.pending_name.take() {
            ctx.warn("read_dictionary", format!("entry '{}' has no handle", name));
        }
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        w.write_subclass("AcDbDictionary")?;
        if self.hard_owner {
            w.write_i16(280, 1)?;
        }
        if config.version >= DxfVersion::R2000 {
            w.write_i16(281, self.cloning)?;
        }
        for (name, entry) in &self.entries {
            w.write_string(3, name)?;
            w.write_handle_text(if entry.hard_owner { 360 } else { 350 }, &entry.handle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::object::test_support::{emit, parse};
    use crate::types::Handle;

    #[test]
    fn test_entries_keep_order() {
        let mut dict = Dictionary::new();
        dict.common.handle = Some(Handle::new(0xC));
        dict.insert("ACAD_GROUP", "d");
        dict.insert("ACAD_LAYOUT", "1a");
        dict.entries.insert(
            "ACAD_MLINESTYLE".into(),
            DictionaryEntry { handle: "17".into(), hard_owner: true },
        );

        let out = emit(&dict, DxfVersion::R2000);
        assert!(out.starts_with("  0\nDICTIONARY\n  5\nc\n100\nAcDbDictionary\n281\n1\n"));
        assert!(out.contains("  3\nACAD_GROUP\n350\nd\n  3\nACAD_LAYOUT\n350\n1a\n"));
        assert!(out.contains("360\n17\n"));
        assert!(!out.contains("AcDbEntity"));

        let (back, diagnostics) = parse::<Dictionary>(&out, DxfVersion::R2000);
        assert!(diagnostics.is_empty());
        assert_eq!(back, dict);
        assert_eq!(back.entries.keys().collect::<Vec<_>>(), vec!["ACAD_GROUP", "ACAD_LAYOUT", "ACAD_MLINESTYLE"]);
    }

    #[test]
    fn test_cloning_gated_by_version() {
        let dict = Dictionary::new();
        assert!(!emit(&dict, DxfVersion::R14).contains("281"));
    }

    #[test]
    fn test_dangling_name_warns() {
        let input = "  0\nDICTIONARY\n100\nAcDbDictionary\n  3\nORPHAN\n";
        let (dict, diagnostics) = parse::<Dictionary>(input, DxfVersion::R14);
        assert!(dict.is_empty());
        assert!(diagnostics.contains("entry 'ORPHAN' has no handle"));
    }

    #[test]
    fn test_reactors_and_owner() {
        let input = "  0\nDICTIONARY\n  5\nC\n102\n{ACAD_REACTORS\n330\nA\n102\n}\n330\nA\n100\nAcDbDictionary\n  3\nX\n350\n1F\n";
        let (dict, diagnostics) = parse::<Dictionary>(input, DxfVersion::R14);
        assert!(diagnostics.is_empty());
        assert_eq!(dict.common.dictionary_owner_soft, "a");
        assert_eq!(dict.common.owner_handle, "a");
        assert_eq!(dict.get("X").map(|e| e.handle.as_str()), Some("1f"));
    }
}
