//! Shared entity header: the tags every drawable carries
//!
//! Write order is fixed and listed once in [`HeaderField::ORDER`]; whether a
//! field is emitted for a given version and value is decided in one place,
//! [`HeaderField::emits`].

use super::{xdata, ReadContext};
use crate::entities::{EntityCommon, ShadowMode};
use crate::error::{DxfError, Result};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{Color, DxfVersion, LineWeight, Transparency};

pub const DEFAULT_LINETYPE: &str = "BYLAYER";
pub const DEFAULT_LAYER: &str = "0";

/// Application group opened by a `102 {NAME` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Group {
    Reactors,
    XDictionary,
    Other(String),
}

/// Read-side state for the shared header of one record.
#[derive(Debug, Default)]
pub(crate) struct HeaderReader {
    group: Option<Group>,
    xdata: bool,
    declared_graphics_size: Option<i64>,
}

impl HeaderReader {
    pub(crate) fn in_group(&self) -> bool {
        self.group.is_some()
    }

    pub(crate) fn in_xdata(&self) -> bool {
        self.xdata
    }

    /// Pairs of a `102` group and the `102` delimiters themselves.
    ///
    /// Shared with objects, which carry the same reactor and
    /// extension-dictionary groups.
    pub(crate) fn read_group(
        &mut self,
        pair: &DxfCodePair,
        soft: &mut String,
        hard: &mut String,
        ctx: &mut ReadContext<'_>,
    ) -> Result<bool> {
        if pair.code == 102 {
            let value = pair.value.trim();
            if value == "}" {
                if self.group.take().is_none() {
                    ctx.warn("read_group", "closing 102 without an open group");
                }
                return Ok(true);
            }
            if let Some(name) = value.strip_prefix('{') {
                if let Some(open) = &self.group {
                    ctx.warn(
                        "read_group",
                        format!("group {} opened inside {:?}", value, open),
                    );
                }
                self.group = Some(match name {
                    "ACAD_REACTORS" => Group::Reactors,
                    "ACAD_XDICTIONARY" => Group::XDictionary,
                    other => {
                        ctx.not_implemented(
                            "read_group",
                            format!("application group {{{} skipped", other),
                        );
                        Group::Other(other.to_string())
                    }
                });
                return Ok(true);
            }
            return Ok(false);
        }

        let target = match (&self.group, pair.code) {
            (Some(Group::Reactors), 330) => soft,
            (Some(Group::XDictionary), 360) => hard,
            (Some(_), _) => return Ok(true),
            (None, _) => return Ok(false),
        };
        let handle = pair.as_handle()?.to_hex();
        if target.is_empty() {
            *target = handle;
        } else {
            ctx.info(
                "read_group",
                format!("additional owner handle {} ignored", handle),
            );
        }
        Ok(true)
    }

    /// Consume one shared header pair. `Ok(false)` leaves the pair to the
    /// kind codec.
    pub(crate) fn read(
        &mut self,
        common: &mut EntityCommon,
        pair: &DxfCodePair,
        ctx: &mut ReadContext<'_>,
    ) -> Result<bool> {
        if self.in_group() || pair.code == 102 {
            let EntityCommon {
                dictionary_owner_soft,
                dictionary_owner_hard,
                ..
            } = common;
            return self.read_group(pair, dictionary_owner_soft, dictionary_owner_hard, ctx);
        }

        match pair.code {
            5 => common.handle = Some(pair.as_handle()?),
            6 => common.linetype = read_name(pair, ctx),
            8 => common.layer = read_name(pair, ctx),
            38 => common.elevation = pair.as_double()?,
            39 => common.thickness = pair.as_double()?,
            48 => common.linetype_scale = pair.as_double()?,
            60 => common.invisible = read_flag(pair, "visibility")?,
            62 => common.color = Color::from_index(pair.as_i16()?),
            67 => common.paperspace = read_flag(pair, "paperspace")?,
            92 => self.declared_graphics_size = Some(pair.as_i32()? as i64),
            160 => self.declared_graphics_size = Some(pair.as_i64()?),
            210 => common.extrusion.x = pair.as_double()?,
            220 => common.extrusion.y = pair.as_double()?,
            230 => common.extrusion.z = pair.as_double()?,
            284 => common.shadow_mode = ShadowMode::from_value(pair.as_i16()?)?,
            310 => common.graphics_data.extend(pair.as_binary()?),
            330 => common.owner_handle = pair.as_handle()?.to_hex(),
            347 => common.material = pair.as_handle()?.to_hex(),
            370 => common.line_weight = LineWeight::from_value(pair.as_i16()?),
            390 => common.plot_style_name = pair.as_handle()?.to_hex(),
            420 => common.color_value = Some(pair.as_i32()?),
            430 => common.color_name = pair.as_string(),
            440 => common.transparency = Some(Transparency::from_raw(pair.as_i32()?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// XDATA pairs; everything after the first `1001` belongs to it.
    pub(crate) fn read_xdata(
        &mut self,
        common: &mut EntityCommon,
        pair: &DxfCodePair,
    ) -> Result<bool> {
        self.xdata = true;
        xdata::read_xdata_pair(&mut common.extended_data, pair)
    }

    /// End-of-record checks.
    pub(crate) fn finish(
        &mut self,
        common: &mut EntityCommon,
        ctx: &mut ReadContext<'_>,
        operation: &str,
    ) {
        if let Some(group) = self.group.take() {
            ctx.warn(operation, format!("unterminated 102 group {:?}", group));
        }
        if let Some(declared) = self.declared_graphics_size {
            let actual = common.graphics_data.len() as i64;
            if declared != actual {
                ctx.warn(
                    operation,
                    format!(
                        "graphics data size declares {} bytes but {} were read",
                        declared, actual
                    ),
                );
            }
        }
    }
}

fn read_name(pair: &DxfCodePair, ctx: &mut ReadContext<'_>) -> String {
    let (name, truncated) = pair.as_fixed_string(MAX_NAME_LENGTH);
    if truncated {
        ctx.warn(
            "read_name",
            format!("name on group code {} cut to {} characters", pair.code, MAX_NAME_LENGTH),
        );
    }
    name.trim().to_string()
}

/// A 0/1 flag; anything else is a range error.
pub(crate) fn read_flag(pair: &DxfCodePair, field: &'static str) -> Result<bool> {
    match pair.as_i16()? {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(DxfError::range(field, v as i64, 0, 1)),
    }
}

/// Replace empty linetype and layer with their defaults.
pub fn reconstitute_defaults(common: &mut EntityCommon) {
    if common.linetype.trim().is_empty() {
        common.linetype = DEFAULT_LINETYPE.to_string();
    }
    if common.layer.trim().is_empty() {
        common.layer = DEFAULT_LAYER.to_string();
    }
}

fn effective_layer(common: &EntityCommon) -> &str {
    if common.layer.trim().is_empty() {
        DEFAULT_LAYER
    } else {
        &common.layer
    }
}

fn effective_linetype(common: &EntityCommon) -> &str {
    if common.linetype.trim().is_empty() {
        DEFAULT_LINETYPE
    } else {
        &common.linetype
    }
}

/// One field of the shared header, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Handle,
    Reactors,
    XDictionary,
    Owner,
    EntityMarker,
    Paperspace,
    Layer,
    Linetype,
    Material,
    Color,
    LineWeight,
    LinetypeScale,
    Visibility,
    GraphicsData,
    ColorValue,
    ColorName,
    Transparency,
    PlotStyle,
    ShadowMode,
    Elevation,
    Thickness,
}

impl HeaderField {
    /// Canonical emission order after the `0` name.
    pub const ORDER: [HeaderField; 21] = [
        HeaderField::Handle,
        HeaderField::Reactors,
        HeaderField::XDictionary,
        HeaderField::Owner,
        HeaderField::EntityMarker,
        HeaderField::Paperspace,
        HeaderField::Layer,
        HeaderField::Linetype,
        HeaderField::Material,
        HeaderField::Color,
        HeaderField::LineWeight,
        HeaderField::LinetypeScale,
        HeaderField::Visibility,
        HeaderField::GraphicsData,
        HeaderField::ColorValue,
        HeaderField::ColorName,
        HeaderField::Transparency,
        HeaderField::PlotStyle,
        HeaderField::ShadowMode,
        HeaderField::Elevation,
        HeaderField::Thickness,
    ];

    /// Whether the field is written for this entity under `config`.
    pub fn emits(self, common: &EntityCommon, config: &DxfConfiguration) -> bool {
        let v = config.version;
        match self {
            HeaderField::Handle => common.handle.is_some(),
            HeaderField::Reactors => {
                v >= DxfVersion::R14 && !common.dictionary_owner_soft.is_empty()
            }
            HeaderField::XDictionary => {
                v >= DxfVersion::R14 && !common.dictionary_owner_hard.is_empty()
            }
            HeaderField::Owner => v >= DxfVersion::R13 && !common.owner_handle.is_empty(),
            HeaderField::EntityMarker => v >= DxfVersion::R13,
            HeaderField::Paperspace => common.paperspace,
            HeaderField::Layer => true,
            HeaderField::Linetype => effective_linetype(common) != DEFAULT_LINETYPE,
            HeaderField::Material => v >= DxfVersion::R2007 && !common.material.is_empty(),
            HeaderField::Color => !common.color.is_by_layer(),
            HeaderField::LineWeight => v >= DxfVersion::R2000,
            HeaderField::LinetypeScale => {
                v >= DxfVersion::R13 && common.linetype_scale != 1.0
            }
            HeaderField::Visibility => v >= DxfVersion::R13 && common.invisible,
            HeaderField::GraphicsData => {
                v >= DxfVersion::R2000 && !common.graphics_data.is_empty()
            }
            HeaderField::ColorValue => v >= DxfVersion::R2004 && common.color_value.is_some(),
            HeaderField::ColorName => v >= DxfVersion::R2004 && !common.color_name.is_empty(),
            HeaderField::Transparency => {
                v >= DxfVersion::R2004 && common.transparency.is_some()
            }
            HeaderField::PlotStyle => {
                v >= DxfVersion::R2000 && !common.plot_style_name.is_empty()
            }
            HeaderField::ShadowMode => {
                v >= DxfVersion::R2007 && common.shadow_mode != ShadowMode::default()
            }
            HeaderField::Elevation => {
                v <= DxfVersion::R11 && config.flatland && common.elevation != 0.0
            }
            HeaderField::Thickness => common.thickness != 0.0,
        }
    }

    fn write(
        self,
        w: &mut dyn DxfStreamWriter,
        common: &EntityCommon,
        config: &DxfConfiguration,
    ) -> Result<()> {
        match self {
            HeaderField::Handle => {
                if let Some(handle) = common.handle {
                    w.write_handle(5, handle)?;
                }
            }
            HeaderField::Reactors => {
                w.write_string(102, "{ACAD_REACTORS")?;
                w.write_handle_text(330, &common.dictionary_owner_soft)?;
                w.write_string(102, "}")?;
            }
            HeaderField::XDictionary => {
                w.write_string(102, "{ACAD_XDICTIONARY")?;
                w.write_handle_text(360, &common.dictionary_owner_hard)?;
                w.write_string(102, "}")?;
            }
            HeaderField::Owner => w.write_handle_text(330, &common.owner_handle)?,
            HeaderField::EntityMarker => w.write_subclass("AcDbEntity")?,
            HeaderField::Paperspace => w.write_i16(67, 1)?,
            HeaderField::Layer => w.write_string(8, effective_layer(common))?,
            HeaderField::Linetype => w.write_string(6, effective_linetype(common))?,
            HeaderField::Material => w.write_handle_text(347, &common.material)?,
            HeaderField::Color => w.write_i16(62, common.color.index())?,
            HeaderField::LineWeight => w.write_i16(370, common.line_weight.value())?,
            HeaderField::LinetypeScale => w.write_double(48, common.linetype_scale)?,
            HeaderField::Visibility => w.write_i16(60, 1)?,
            HeaderField::GraphicsData => {
                let size = common.graphics_data.len();
                if config.version >= DxfVersion::R2010 {
                    w.write_i64(160, size as i64)?;
                } else {
                    w.write_i32(92, size as i32)?;
                }
                w.write_binary_chunks(310, &common.graphics_data)?;
            }
            HeaderField::ColorValue => {
                if let Some(value) = common.color_value {
                    w.write_i32(420, value)?;
                }
            }
            HeaderField::ColorName => w.write_string(430, &common.color_name)?,
            HeaderField::Transparency => {
                if let Some(t) = common.transparency {
                    w.write_i32(440, t.raw())?;
                }
            }
            HeaderField::PlotStyle => w.write_handle_text(390, &common.plot_style_name)?,
            HeaderField::ShadowMode => w.write_byte(284, common.shadow_mode as u8)?,
            HeaderField::Elevation => w.write_double(38, common.elevation)?,
            HeaderField::Thickness => w.write_double(39, common.thickness)?,
        }
        Ok(())
    }
}

/// Write `0 <name>` and the shared header in canonical order.
pub fn write_header(
    w: &mut dyn DxfStreamWriter,
    name: &str,
    common: &EntityCommon,
    config: &DxfConfiguration,
) -> Result<()> {
    w.write_string(0, name)?;
    for field in HeaderField::ORDER {
        if field.emits(common, config) {
            field.write(w, common, config)?;
        }
    }
    Ok(())
}
