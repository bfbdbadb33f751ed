//! Object (non-graphical record) codec
//!
//! Objects share the handle, application groups, owner and XDATA with
//! entities but have no `AcDbEntity` header; the first marker is the
//! object's own subclass.

use super::common::HeaderReader;
use super::{xdata, ReadContext, TraceScope};
use crate::error::{DxfError, Result};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Handle};
use crate::xdata::ExtendedData;

/// Header tags shared by every object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectCommon {
    pub handle: Option<Handle>,
    /// Soft owner inside `{ACAD_REACTORS`
    pub dictionary_owner_soft: String,
    /// Hard owner inside `{ACAD_XDICTIONARY`
    pub dictionary_owner_hard: String,
    /// `330` outside any group
    pub owner_handle: String,
    pub extended_data: ExtendedData,
}

impl ObjectCommon {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Uniform access to the shared header of any object.
pub trait Object {
    fn common(&self) -> &ObjectCommon;

    fn common_mut(&mut self) -> &mut ObjectCommon;

    /// Object name as written after `0`.
    fn object_type(&self) -> &'static str;

    fn handle(&self) -> Option<Handle> {
        self.common().handle
    }
}

/// Read/write schema of one object kind.
pub trait ObjectCodec: Object + Default {
    const NAME: &'static str;
    const SUBCLASS_MARKERS: &'static [&'static str];

    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool>;

    fn finish_read(&mut self, _ctx: &mut ReadContext<'_>) {}

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()>;
}

/// Read one object whose `0 <NAME>` pair has already been consumed.
pub fn read_object<O: ObjectCodec>(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<O> {
    let _scope = TraceScope::enter(ctx.config(), "read", O::NAME);
    let operation = format!("read_{}", O::NAME.to_ascii_lowercase());
    let mut object = O::default();
    let mut groups = HeaderReader::default();
    let mut in_xdata = false;

    while let Some(pair) = reader.read_pair()? {
        ctx.set_line(pair.line);
        if pair.code == 0 {
            reader.push_back(pair);
            break;
        }

        let result = if pair.code >= 1000 || in_xdata {
            in_xdata = true;
            xdata::read_xdata_pair(&mut object.common_mut().extended_data, &pair)
        } else if pair.code == 102 || groups.in_group() {
            let ObjectCommon {
                dictionary_owner_soft,
                dictionary_owner_hard,
                ..
            } = object.common_mut();
            groups.read_group(&pair, dictionary_owner_soft, dictionary_owner_hard, ctx)
        } else {
            match pair.code {
                999 => {
                    ctx.info(&operation, format!("comment: {}", pair.value));
                    Ok(true)
                }
                100 => {
                    let marker = pair.value.trim();
                    if !O::SUBCLASS_MARKERS.contains(&marker) {
                        ctx.warn(
                            &operation,
                            format!(
                                "unexpected subclass marker '{}', expected one of {:?}",
                                marker,
                                O::SUBCLASS_MARKERS
                            ),
                        );
                    }
                    Ok(true)
                }
                5 => pair.as_handle().map(|h| {
                    object.common_mut().handle = Some(h);
                    true
                }),
                330 if object.common().owner_handle.is_empty() => pair.as_handle().map(|h| {
                    object.common_mut().owner_handle = h.to_hex();
                    true
                }),
                _ => object.read_code(&pair, ctx),
            }
        };

        match result {
            Ok(true) => {}
            Ok(false) => ctx.warn(
                &operation,
                format!("unknown group code {} with value '{}'", pair.code, pair.value),
            ),
            Err(e) if e.is_recoverable() => ctx.warn(&operation, e.to_string()),
            Err(e) => return Err(e),
        }
    }

    if groups.in_group() {
        ctx.warn(&operation, "unterminated 102 group");
    }
    object.finish_read(ctx);
    Ok(object)
}

/// Write one object: name, handle, groups, owner, body, XDATA.
///
/// Objects exist from R13 on; earlier versions are refused.
pub fn write_object<O: ObjectCodec>(
    w: &mut dyn DxfStreamWriter,
    object: &O,
    config: &DxfConfiguration,
) -> Result<()> {
    let _scope = TraceScope::enter(config, "write", O::NAME);
    if config.version < DxfVersion::R13 {
        return Err(DxfError::validation(
            O::NAME,
            format!("objects cannot be written to a {} stream", config.version.release_name()),
        ));
    }
    let common = object.common();
    w.write_string(0, O::NAME)?;
    if let Some(handle) = common.handle {
        w.write_handle(5, handle)?;
    }
    if config.version >= DxfVersion::R14 {
        if !common.dictionary_owner_soft.is_empty() {
            w.write_string(102, "{ACAD_REACTORS")?;
            w.write_handle_text(330, &common.dictionary_owner_soft)?;
            w.write_string(102, "}")?;
        }
        if !common.dictionary_owner_hard.is_empty() {
            w.write_string(102, "{ACAD_XDICTIONARY")?;
            w.write_handle_text(360, &common.dictionary_owner_hard)?;
            w.write_string(102, "}")?;
        }
    }
    w.write_handle_text(330, &common.owner_handle)?;
    object.write_body(w, config)?;
    xdata::write_extended_data(w, &common.extended_data)
}

/// Read one object including its `0 <NAME>` pair.
pub fn read_object_record<O: ObjectCodec>(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<O> {
    match reader.read_pair()? {
        Some(pair) if pair.is_marker(O::NAME) => read_object(reader, ctx),
        Some(pair) => {
            let found = format!("{}/{}", pair.code, pair.value);
            reader.push_back(pair);
            Err(DxfError::InvalidEntityType(format!(
                "expected 0/{}, found {}",
                O::NAME,
                found
            )))
        }
        None => Err(DxfError::UnexpectedEof {
            code: 0,
            line: reader.line_number(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::io::dxf::reader::DxfTextReader;
    use crate::io::dxf::writer::DxfTextWriter;
    use crate::notification::NotificationCollection;
    use std::io::Cursor;

    pub(crate) fn emit<O: ObjectCodec>(object: &O, version: DxfVersion) -> String {
        let mut w = DxfTextWriter::new(Vec::new());
        write_object(&mut w, object, &DxfConfiguration::new(version)).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    pub(crate) fn parse<O: ObjectCodec>(text: &str, version: DxfVersion) -> (O, NotificationCollection) {
        let mut reader = DxfTextReader::new(Cursor::new(text.as_bytes().to_vec()));
        let mut sink = NotificationCollection::new();
        let object = {
            let mut ctx = ReadContext::new(DxfConfiguration::new(version), &mut sink);
            read_object_record::<O>(&mut reader, &mut ctx).unwrap()
        };
        (object, sink)
    }
}
