//! OBJECT_PTR: an object that only carries a header and extended data

use crate::error::Result;
use crate::io::dxf::codec::object::{ObjectCodec, ObjectCommon};
use crate::io::dxf::codec::ReadContext;
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::DxfStreamWriter;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectPtr {
    pub common: ObjectCommon,
}

impl ObjectPtr {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_object!(ObjectPtr);

impl ObjectCodec for ObjectPtr {
    const NAME: &'static str = "OBJECT_PTR";
    const SUBCLASS_MARKERS: &'static [&'static str] = &[];

    fn read_code(&mut self, _pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn write_body(&self, _w: &mut dyn DxfStreamWriter, _config: &DxfConfiguration) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::object::test_support::{emit, parse};
    use crate::types::{DxfVersion, Handle};
    use crate::xdata::{ExtendedDataRecord, XDataValue};

    #[test]
    fn test_xdata_round_trip() {
        let mut ptr = ObjectPtr::new();
        ptr.common.handle = Some(Handle::new(0x2b));
        let mut record = ExtendedDataRecord::new("ACAD");
        record.add_value(XDataValue::String("DCO15".into()));
        record.add_value(XDataValue::Integer16(7));
        ptr.common.extended_data.add_record(record);

        let out = emit(&ptr, DxfVersion::R14);
        assert_eq!(out, "  0\nOBJECT_PTR\n  5\n2b\n1001\nACAD\n1000\nDCO15\n1070\n7\n");
        let (back, diagnostics) = parse::<ObjectPtr>(&out, DxfVersion::R14);
        assert!(diagnostics.is_empty());
        assert_eq!(back, ptr);
    }

    #[test]
    fn test_refused_before_r13() {
        let mut w = crate::io::dxf::writer::DxfTextWriter::new(Vec::new());
        let err = crate::io::dxf::codec::object::write_object(
            &mut w,
            &ObjectPtr::new(),
            &DxfConfiguration::new(DxfVersion::R12),
        );
        assert!(err.is_err());
    }
}
