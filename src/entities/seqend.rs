//! Sequence end marker

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::DxfStreamWriter;
use crate::types::DxfVersion;

/// Closes the VERTEX run of a POLYLINE or the ATTRIB run of an INSERT.
///
/// Carries only the shared header; its handle is preserved on round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeqEnd {
    pub common: EntityCommon,
}

impl SeqEnd {
    pub fn new() -> Self {
        Self::default()
    }

    /// A marker on the same layer as its parent.
    pub fn for_parent(parent: &EntityCommon) -> Self {
        SeqEnd {
            common: EntityCommon {
                layer: parent.layer.clone(),
                owner_handle: parent.handle.map(|h| h.to_hex()).unwrap_or_default(),
                ..EntityCommon::new()
            },
        }
    }
}

impl_entity!(SeqEnd);

impl EntityCodec for SeqEnd {
    const NAME: &'static str = "SEQEND";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
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
    use crate::io::dxf::codec::test_support::emit;
    use crate::types::Handle;

    #[test]
    fn test_seqend_header_only() {
        let mut seqend = SeqEnd::new();
        seqend.common.handle = Some(Handle::new(0x30));
        assert_eq!(emit(&seqend, DxfVersion::R12), "  0\nSEQEND\n  5\n30\n  8\n0\n");
    }

    #[test]
    fn test_for_parent_copies_layer() {
        let mut parent = EntityCommon::with_layer("PIPES");
        parent.handle = Some(Handle::new(0x2b));
        let seqend = SeqEnd::for_parent(&parent);
        assert_eq!(seqend.common.layer, "PIPES");
        assert_eq!(seqend.common.owner_handle, "2b");
        assert!(seqend.common.handle.is_none());
    }
}
