//! Entity and object codecs
//!
//! Every drawable kind implements [`EntityCodec`]; [`read_entity`] and
//! [`write_entity`] drive the shared read and write skeletons around it.
//!
//! Reading runs a small state machine per record:
//!
//! ```text
//! Initial --first pair--> InHeader --kind marker or kind code--> InKindBody --0--> AtTerminator
//! ```
//!
//! In `InHeader` the shared header codes are tried before the kind codes;
//! in `InKindBody` the kind codes win. That resolves codes both layers use
//! (e.g. HATCH `92` and `330`).

pub mod common;
pub mod dispatch;
pub mod object;
pub mod xdata;

use crate::entities::{Entity, EntityCommon};
use crate::error::{DxfError, Result};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::writer::DxfStreamWriter;
use crate::notification::{DiagnosticSink, Notification, NotificationType};
use crate::io::dxf::group_code::coordinate_axis;
use crate::types::{DxfVersion, Vector2, Vector3};

use common::HeaderReader;

/// Per-read state shared by every codec: configuration, the diagnostic
/// sink, and the current source location.
pub struct ReadContext<'a> {
    config: DxfConfiguration,
    source: Option<String>,
    line: usize,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> ReadContext<'a> {
    pub fn new(config: DxfConfiguration, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            config,
            source: None,
            line: 0,
            sink,
        }
    }

    /// File name attached to diagnostics.
    pub fn with_source(mut self, source: Option<&str>) -> Self {
        self.source = source.map(str::to_string);
        self
    }

    pub fn config(&self) -> &DxfConfiguration {
        &self.config
    }

    /// The declared version of the stream being read.
    pub fn version(&self) -> DxfVersion {
        self.config.version
    }

    pub fn set_version(&mut self, version: DxfVersion) {
        self.config.version = version;
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    fn notify(&mut self, kind: NotificationType, operation: &str, message: String) {
        let notification =
            Notification::new(kind, operation, message).at(self.source.as_deref(), self.line);
        self.sink.notify(notification);
    }

    pub fn warn(&mut self, operation: &str, message: impl Into<String>) {
        self.notify(NotificationType::Warning, operation, message.into());
    }

    pub fn error(&mut self, operation: &str, message: impl Into<String>) {
        self.notify(NotificationType::Error, operation, message.into());
    }

    pub fn info(&mut self, operation: &str, message: impl Into<String>) {
        self.notify(NotificationType::Info, operation, message.into());
    }

    pub fn not_implemented(&mut self, operation: &str, message: impl Into<String>) {
        self.notify(NotificationType::NotImplemented, operation, message.into());
    }
}

/// Logs `[ENTER]` on creation and `[EXIT]` on drop when `debug_trace` is on.
pub(crate) struct TraceScope {
    active: bool,
    operation: &'static str,
    name: &'static str,
}

impl TraceScope {
    pub(crate) fn enter(
        config: &DxfConfiguration,
        operation: &'static str,
        name: &'static str,
    ) -> Self {
        if config.debug_trace {
            tracing::trace!(target: "dxf_codec", "[ENTER] {} {}", operation, name);
        }
        Self {
            active: config.debug_trace,
            operation,
            name,
        }
    }
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        if self.active {
            tracing::trace!(target: "dxf_codec", "[EXIT] {} {}", self.operation, self.name);
        }
    }
}

/// Read/write schema of one entity kind.
pub trait EntityCodec: Entity + Default {
    /// Entity name written after `0`.
    const NAME: &'static str;
    /// First revision that knows the kind.
    const INTRODUCED: DxfVersion;
    /// Subclass markers accepted after `AcDbEntity`.
    const SUBCLASS_MARKERS: &'static [&'static str];

    /// Entity name for a given version (some names are obsolete).
    fn dxf_name(&self, _version: DxfVersion) -> &'static str {
        Self::NAME
    }

    /// Consume one kind-specific pair. `Ok(false)` means the code is not
    /// part of this kind's schema.
    fn read_code(&mut self, pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> Result<bool>;

    /// Consume a pair that opens a counted or bracketed run of pairs,
    /// pulling the rest of the run from `reader`.
    fn read_nested(
        &mut self,
        _pair: &DxfCodePair,
        _reader: &mut dyn DxfStreamReader,
        _ctx: &mut ReadContext<'_>,
    ) -> Result<bool> {
        Ok(false)
    }

    /// Runs after the terminating `0` is seen.
    fn finish_read(&mut self, _ctx: &mut ReadContext<'_>) {}

    /// Read child records (VERTEX, ATTRIB, SEQEND) that follow the entity.
    fn read_children(
        &mut self,
        _reader: &mut dyn DxfStreamReader,
        _ctx: &mut ReadContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// Entity-level constraints checked before any byte is written.
    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        Ok(())
    }

    /// Write the kind-specific pairs after the shared header.
    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()>;

    fn write_children(&self, _w: &mut dyn DxfStreamWriter, _config: &DxfConfiguration) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Initial,
    InHeader,
    InKindBody,
    AtTerminator,
}

/// Read one entity whose `0 <NAME>` pair has already been consumed.
///
/// Pairs are consumed up to the next `0`, which is pushed back. Malformed
/// values and unknown codes are reported to the context and skipped; only
/// stream failures abort.
pub fn read_entity<E: EntityCodec>(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<E> {
    let _scope = TraceScope::enter(ctx.config(), "read", E::NAME);
    let operation = format!("read_{}", E::NAME.to_ascii_lowercase());

    if ctx.version() < E::INTRODUCED {
        ctx.warn(
            &operation,
            format!(
                "{} entity found in a {} stream; it was introduced in {}",
                E::NAME,
                ctx.version().release_name(),
                E::INTRODUCED.release_name()
            ),
        );
    }

    let mut entity = E::default();
    let mut header = HeaderReader::default();
    let mut state = ReadState::Initial;

    while let Some(pair) = reader.read_pair()? {
        ctx.set_line(pair.line);
        if pair.code == 0 {
            reader.push_back(pair);
            state = ReadState::AtTerminator;
            break;
        }
        if state == ReadState::Initial {
            state = ReadState::InHeader;
        }

        // XDATA runs to the end of the record.
        if pair.code >= 1000 || header.in_xdata() {
            match header.read_xdata(entity.common_mut(), &pair) {
                Ok(true) => {}
                Ok(false) => ctx.warn(
                    &operation,
                    format!("unexpected group code {} in extended data", pair.code),
                ),
                Err(e) if e.is_recoverable() => ctx.warn(&operation, e.to_string()),
                Err(e) => return Err(e),
            }
            continue;
        }

        match pair.code {
            999 => {
                ctx.info(&operation, format!("comment: {}", pair.value));
                continue;
            }
            100 if !header.in_group() => {
                let marker = pair.value.trim();
                if marker == "AcDbEntity" {
                    continue;
                }
                if !E::SUBCLASS_MARKERS.contains(&marker) {
                    ctx.warn(
                        &operation,
                        format!(
                            "unexpected subclass marker '{}', expected one of {:?}",
                            marker,
                            E::SUBCLASS_MARKERS
                        ),
                    );
                }
                state = ReadState::InKindBody;
                continue;
            }
            _ => {}
        }

        let result = if header.in_group() {
            header.read(entity.common_mut(), &pair, ctx)
        } else if state == ReadState::InKindBody {
            read_kind_first(&mut entity, &mut header, &pair, reader, ctx)
        } else {
            match header.read(entity.common_mut(), &pair, ctx) {
                Ok(false) => {
                    let r = read_kind_code(&mut entity, &pair, reader, ctx);
                    if matches!(r, Ok(true)) {
                        state = ReadState::InKindBody;
                    }
                    r
                }
                other => other,
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

    match state {
        ReadState::Initial => tracing::debug!(entity = E::NAME, "record has no group codes"),
        ReadState::AtTerminator => {}
        _ => tracing::debug!(entity = E::NAME, "stream ended inside the record"),
    }

    header.finish(entity.common_mut(), ctx, &operation);
    entity.finish_read(ctx);
    entity.read_children(reader, ctx)?;
    common::reconstitute_defaults(entity.common_mut());
    Ok(entity)
}

fn read_kind_code<E: EntityCodec>(
    entity: &mut E,
    pair: &DxfCodePair,
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<bool> {
    if entity.read_nested(pair, reader, ctx)? {
        return Ok(true);
    }
    entity.read_code(pair, ctx)
}

fn read_kind_first<E: EntityCodec>(
    entity: &mut E,
    header: &mut HeaderReader,
    pair: &DxfCodePair,
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<bool> {
    match read_kind_code(entity, pair, reader, ctx) {
        Ok(false) => header.read(entity.common_mut(), pair, ctx),
        other => other,
    }
}

/// Read one entity including its `0 <NAME>` pair.
///
/// Fails with [`DxfError::InvalidEntityType`] when the stream holds a
/// different record.
pub fn read_entity_record<E: EntityCodec>(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<E> {
    match reader.read_pair()? {
        Some(pair) if pair.code == 0 => {
            let name = pair.value.trim();
            if name == E::NAME || DxfVersion::ALL.iter().any(|&v| E::default().dxf_name(v) == name) {
                read_entity(reader, ctx)
            } else {
                let found = name.to_string();
                reader.push_back(pair);
                Err(DxfError::InvalidEntityType(format!(
                    "expected {}, found {}",
                    E::NAME,
                    found
                )))
            }
        }
        Some(pair) => Err(DxfError::InvalidEntityType(format!(
            "expected 0/{} at line {}, found group code {}",
            E::NAME,
            pair.line,
            pair.code
        ))),
        None => Err(DxfError::UnexpectedEof {
            code: 0,
            line: reader.line_number(),
        }),
    }
}

/// Write one entity: header, body, extended data, children.
///
/// Validation runs first, so a refused entity emits no bytes.
pub fn write_entity<E: EntityCodec>(
    w: &mut dyn DxfStreamWriter,
    entity: &E,
    config: &DxfConfiguration,
) -> Result<()> {
    let _scope = TraceScope::enter(config, "write", E::NAME);
    entity.validate(config)?;
    common::write_header(w, entity.dxf_name(config.version), entity.common(), config)?;
    entity.write_body(w, config)?;
    xdata::write_extended_data(w, &entity.common().extended_data)?;
    entity.write_children(w, config)?;
    Ok(())
}

/// Extrusion direction at the end of a kind body: R12+ only, and only when
/// it differs from +Z.
pub(crate) fn write_extrusion(
    w: &mut dyn DxfStreamWriter,
    common: &EntityCommon,
    config: &DxfConfiguration,
) -> Result<()> {
    use crate::io::dxf::writer::DxfStreamWriterExt;
    if config.version >= DxfVersion::R12 && common.extrusion != Vector3::UNIT_Z {
        w.write_point3d(210, common.extrusion)?;
    }
    Ok(())
}

/// Subclass marker, R13+ only.
pub(crate) fn write_marker(
    w: &mut dyn DxfStreamWriter,
    marker: &str,
    config: &DxfConfiguration,
) -> Result<()> {
    if config.version.has_subclass_markers() {
        w.write_string(100, marker)?;
    }
    Ok(())
}

/// Assign one coordinate of a `10/20/30`-style triple.
pub(crate) fn read_point(point: &mut Vector3, pair: &DxfCodePair) -> Result<()> {
    if let Some(axis) = coordinate_axis(pair.code) {
        point.set_axis(axis, pair.as_double()?);
    }
    Ok(())
}

/// Two-dimensional variant of [`read_point`]; Z codes are ignored.
pub(crate) fn read_point2d(point: &mut Vector2, pair: &DxfCodePair) -> Result<()> {
    match coordinate_axis(pair.code) {
        Some(0) => point.x = pair.as_double()?,
        Some(1) => point.y = pair.as_double()?,
        _ => {}
    }
    Ok(())
}

/// Repeated point lists: the X code starts a new point, Y and Z complete
/// the last one.
pub(crate) fn read_point_list(points: &mut Vec<Vector3>, pair: &DxfCodePair) -> Result<()> {
    let value = pair.as_double()?;
    match coordinate_axis(pair.code) {
        Some(0) => points.push(Vector3::new(value, 0.0, 0.0)),
        Some(axis) => match points.last_mut() {
            Some(last) => last.set_axis(axis, value),
            None => {
                let mut point = Vector3::ZERO;
                point.set_axis(axis, value);
                points.push(point);
            }
        },
        None => {}
    }
    Ok(())
}

/// Pull the next pair only when its code is `code`; anything else is
/// pushed back.
pub(crate) fn next_pair_if(
    reader: &mut dyn DxfStreamReader,
    code: i32,
) -> Result<Option<DxfCodePair>> {
    match reader.read_pair()? {
        Some(pair) if pair.code == code => Ok(Some(pair)),
        Some(pair) => {
            reader.push_back(pair);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Pull the next pair only when its code is one of `codes`.
pub(crate) fn next_pair_in(
    reader: &mut dyn DxfStreamReader,
    codes: &[i32],
) -> Result<Option<DxfCodePair>> {
    match reader.read_pair()? {
        Some(pair) if codes.contains(&pair.code) => Ok(Some(pair)),
        Some(pair) => {
            reader.push_back(pair);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Read an `X`/`Y` (and optional `Z`) run starting at `x_code`.
pub(crate) fn read_nested_point(
    reader: &mut dyn DxfStreamReader,
    x_code: i32,
    with_z: bool,
) -> Result<Option<Vector3>> {
    let Some(x) = next_pair_if(reader, x_code)? else {
        return Ok(None);
    };
    let mut point = Vector3::new(x.as_double()?, 0.0, 0.0);
    if let Some(y) = next_pair_if(reader, x_code + 10)? {
        point.y = y.as_double()?;
    }
    if with_z {
        if let Some(z) = next_pair_if(reader, x_code + 20)? {
            point.z = z.as_double()?;
        }
    }
    Ok(Some(point))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::io::dxf::reader::DxfTextReader;
    use crate::io::dxf::writer::DxfTextWriter;
    use crate::notification::NotificationCollection;
    use std::io::Cursor;

    pub(crate) fn emit<E: EntityCodec>(entity: &E, version: DxfVersion) -> String {
        let mut w = DxfTextWriter::new(Vec::new());
        write_entity(&mut w, entity, &DxfConfiguration::new(version)).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    pub(crate) fn parse<E: EntityCodec>(text: &str, version: DxfVersion) -> (E, NotificationCollection) {
        let mut reader = DxfTextReader::new(Cursor::new(text.as_bytes().to_vec()));
        let mut sink = NotificationCollection::new();
        let entity = {
            let mut ctx = ReadContext::new(DxfConfiguration::new(version), &mut sink);
            read_entity_record::<E>(&mut reader, &mut ctx).unwrap()
        };
        (entity, sink)
    }

    pub(crate) fn round_trip<E: EntityCodec>(entity: &E, version: DxfVersion) -> E {
        let (back, _) = parse::<E>(&emit(entity, version), version);
        back
    }
}
