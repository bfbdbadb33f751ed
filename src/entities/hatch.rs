//! Hatch entity
//!
//! Boundary paths, pattern lines and seed points are counted runs on the
//! wire; each is pulled from the stream in one go when its count code is
//! seen, so the `10/20` pairs inside them never reach the elevation point.

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{
    next_pair_if, read_nested_point, write_extrusion, write_marker, EntityCodec, ReadContext,
};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::values::MAX_NAME_LENGTH;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Boundary path flags on code `92`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BoundaryPathFlags: i32 {
        const EXTERNAL = 1;
        const POLYLINE = 2;
        const DERIVED = 4;
        const TEXTBOX = 8;
        const OUTERMOST = 16;
    }
}

/// Pattern source on code `76`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum HatchPatternType {
    UserDefined = 0,
    #[default]
    Predefined = 1,
    Custom = 2,
}

impl HatchPatternType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::UserDefined),
            1 => Ok(Self::Predefined),
            2 => Ok(Self::Custom),
            v => Err(DxfError::range("pattern_type", v as i64, 0, 2)),
        }
    }
}

/// One vertex of a polyline boundary path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryVertex {
    pub location: Vector2,
    pub bulge: f64,
}

/// One edge of a non-polyline boundary path, tagged on the wire by `72`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryEdge {
    Line {
        start: Vector2,
        end: Vector2,
    },
    CircularArc {
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    EllipticArc {
        center: Vector2,
        /// Endpoint of the major axis relative to the center
        major_axis: Vector2,
        minor_axis_ratio: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Spline {
        degree: i32,
        rational: bool,
        periodic: bool,
        knots: Vec<f64>,
        control_points: Vec<Vector2>,
        /// Empty unless rational
        weights: Vec<f64>,
        /// R2010+
        fit_points: Vec<Vector2>,
        start_tangent: Option<Vector2>,
        end_tangent: Option<Vector2>,
    },
}

impl BoundaryEdge {
    pub fn edge_type(&self) -> i16 {
        match self {
            BoundaryEdge::Line { .. } => 1,
            BoundaryEdge::CircularArc { .. } => 2,
            BoundaryEdge::EllipticArc { .. } => 3,
            BoundaryEdge::Spline { .. } => 4,
        }
    }

    fn write(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        w.write_i16(72, self.edge_type())?;
        match self {
            BoundaryEdge::Line { start, end } => {
                w.write_point2d(10, *start)?;
                w.write_point2d(11, *end)?;
            }
            BoundaryEdge::CircularArc {
                center,
                radius,
                start_angle,
                end_angle,
                counter_clockwise,
            } => {
                w.write_point2d(10, *center)?;
                w.write_double(40, *radius)?;
                w.write_double(50, *start_angle)?;
                w.write_double(51, *end_angle)?;
                w.write_bool(73, *counter_clockwise)?;
            }
            BoundaryEdge::EllipticArc {
                center,
                major_axis,
                minor_axis_ratio,
                start_angle,
                end_angle,
                counter_clockwise,
            } => {
                w.write_point2d(10, *center)?;
                w.write_point2d(11, *major_axis)?;
                w.write_double(40, *minor_axis_ratio)?;
                w.write_double(50, *start_angle)?;
                w.write_double(51, *end_angle)?;
                w.write_bool(73, *counter_clockwise)?;
            }
            BoundaryEdge::Spline {
                degree,
                rational,
                periodic,
                knots,
                control_points,
                weights,
                fit_points,
                start_tangent,
                end_tangent,
            } => {
                w.write_i32(94, *degree)?;
                w.write_bool(73, *rational)?;
                w.write_bool(74, *periodic)?;
                w.write_i32(95, knots.len() as i32)?;
                w.write_i32(96, control_points.len() as i32)?;
                for knot in knots {
                    w.write_double(40, *knot)?;
                }
                for (i, point) in control_points.iter().enumerate() {
                    w.write_point2d(10, *point)?;
                    if *rational {
                        w.write_double(42, weights.get(i).copied().unwrap_or(1.0))?;
                    }
                }
                if config.version >= DxfVersion::R2010 {
                    w.write_i32(97, fit_points.len() as i32)?;
                    for point in fit_points {
                        w.write_point2d(11, *point)?;
                    }
                    if let Some(tangent) = start_tangent {
                        w.write_point2d(12, *tangent)?;
                    }
                    if let Some(tangent) = end_tangent {
                        w.write_point2d(13, *tangent)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// One closed loop of the hatch boundary.
///
/// A path with [`BoundaryPathFlags::POLYLINE`] uses `polyline`; any other
/// path uses `edges`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    pub flags: BoundaryPathFlags,
    pub edges: Vec<BoundaryEdge>,
    pub polyline: Vec<BoundaryVertex>,
    pub is_closed: bool,
    /// Handles of the boundary objects (`330`)
    pub source_handles: Vec<String>,
}

impl BoundaryPath {
    pub fn from_edges(flags: BoundaryPathFlags, edges: Vec<BoundaryEdge>) -> Self {
        BoundaryPath {
            flags: flags - BoundaryPathFlags::POLYLINE,
            edges,
            ..Default::default()
        }
    }

    pub fn from_polyline(flags: BoundaryPathFlags, vertices: Vec<BoundaryVertex>, closed: bool) -> Self {
        BoundaryPath {
            flags: flags | BoundaryPathFlags::POLYLINE,
            polyline: vertices,
            is_closed: closed,
            ..Default::default()
        }
    }

    pub fn is_polyline(&self) -> bool {
        self.flags.contains(BoundaryPathFlags::POLYLINE)
    }

    fn has_bulge(&self) -> bool {
        self.polyline.iter().any(|v| v.bulge != 0.0)
    }

    fn write(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        w.write_i32(92, self.flags.bits())?;
        if self.is_polyline() {
            let has_bulge = self.has_bulge();
            w.write_bool(72, has_bulge)?;
            w.write_bool(73, self.is_closed)?;
            w.write_i32(93, self.polyline.len() as i32)?;
            for vertex in &self.polyline {
                w.write_point2d(10, vertex.location)?;
                if has_bulge {
                    w.write_double(42, vertex.bulge)?;
                }
            }
        } else {
            w.write_i32(93, self.edges.len() as i32)?;
            for edge in &self.edges {
                edge.write(w, config)?;
            }
        }
        w.write_i32(97, self.source_handles.len() as i32)?;
        for handle in &self.source_handles {
            w.write_handle_text(330, handle)?;
        }
        Ok(())
    }
}

/// One line family of a hatch pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HatchPatternLine {
    pub angle: f64,
    pub base_point: Vector2,
    pub offset: Vector2,
    /// Positive dashes, negative gaps, zero dots
    pub dash_lengths: Vec<f64>,
}

/// An area filled with a solid color or a line pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    pub common: EntityCommon,
    /// Z of the `10/20/30` elevation point
    pub elevation: f64,
    pub pattern_name: String,
    pub solid_fill: bool,
    pub associative: bool,
    pub paths: Vec<BoundaryPath>,
    /// 0 odd parity, 1 outermost, 2 entire area
    pub hatch_style: i16,
    pub pattern_type: HatchPatternType,
    pub pattern_angle: f64,
    pub pattern_scale: f64,
    pub pattern_double: bool,
    pub pattern_lines: Vec<HatchPatternLine>,
    pub pixel_size: Option<f64>,
    pub seed_points: Vec<Vector2>,
}

impl Hatch {
    pub fn new() -> Self {
        Hatch {
            common: EntityCommon::new(),
            elevation: 0.0,
            pattern_name: "SOLID".to_string(),
            solid_fill: true,
            associative: false,
            paths: Vec::new(),
            hatch_style: 0,
            pattern_type: HatchPatternType::Predefined,
            pattern_angle: 0.0,
            pattern_scale: 1.0,
            pattern_double: false,
            pattern_lines: Vec::new(),
            pixel_size: None,
            seed_points: Vec::new(),
        }
    }

    pub fn solid(paths: Vec<BoundaryPath>) -> Self {
        Hatch {
            paths,
            ..Self::new()
        }
    }

    pub fn pattern(name: impl Into<String>, lines: Vec<HatchPatternLine>, paths: Vec<BoundaryPath>) -> Self {
        Hatch {
            pattern_name: name.into(),
            solid_fill: false,
            pattern_lines: lines,
            paths,
            ..Self::new()
        }
    }
}

impl Default for Hatch {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Hatch);

fn declared_count(pair: &DxfCodePair) -> Result<usize> {
    let count = pair.as_i32()?;
    usize::try_from(count).map_err(|_| DxfError::range("count", count as i64, 0, i32::MAX as i64))
}

fn read_count(reader: &mut dyn DxfStreamReader, code: i32) -> Result<usize> {
    match next_pair_if(reader, code)? {
        Some(pair) => declared_count(&pair),
        None => Ok(0),
    }
}

fn read_double(reader: &mut dyn DxfStreamReader, code: i32, default: f64) -> Result<f64> {
    match next_pair_if(reader, code)? {
        Some(pair) => pair.as_double(),
        None => Ok(default),
    }
}

fn read_bool(reader: &mut dyn DxfStreamReader, code: i32) -> Result<bool> {
    match next_pair_if(reader, code)? {
        Some(pair) => Ok(pair.as_i16()? != 0),
        None => Ok(false),
    }
}

fn read_point2d(reader: &mut dyn DxfStreamReader, x_code: i32) -> Result<Option<Vector2>> {
    Ok(read_nested_point(reader, x_code, false)?.map(|p| Vector2::new(p.x, p.y)))
}

fn short_run(ctx: &mut ReadContext<'_>, what: &str, declared: usize, read: usize) {
    if declared != read {
        ctx.warn(
            "read_hatch",
            format!("{} declares {} entries but {} were read", what, declared, read),
        );
    }
}

fn read_edge(reader: &mut dyn DxfStreamReader, ctx: &mut ReadContext<'_>) -> Result<Option<BoundaryEdge>> {
    let Some(tag) = next_pair_if(reader, 72)? else {
        return Ok(None);
    };
    let edge = match tag.as_i16()? {
        1 => BoundaryEdge::Line {
            start: read_point2d(reader, 10)?.unwrap_or_default(),
            end: read_point2d(reader, 11)?.unwrap_or_default(),
        },
        2 => BoundaryEdge::CircularArc {
            center: read_point2d(reader, 10)?.unwrap_or_default(),
            radius: read_double(reader, 40, 0.0)?,
            start_angle: read_double(reader, 50, 0.0)?,
            end_angle: read_double(reader, 51, 360.0)?,
            counter_clockwise: read_bool(reader, 73)?,
        },
        3 => BoundaryEdge::EllipticArc {
            center: read_point2d(reader, 10)?.unwrap_or_default(),
            major_axis: read_point2d(reader, 11)?.unwrap_or_default(),
            minor_axis_ratio: read_double(reader, 40, 1.0)?,
            start_angle: read_double(reader, 50, 0.0)?,
            end_angle: read_double(reader, 51, 360.0)?,
            counter_clockwise: read_bool(reader, 73)?,
        },
        4 => {
            let degree = match next_pair_if(reader, 94)? {
                Some(pair) => pair.as_i32()?,
                None => 3,
            };
            let rational = read_bool(reader, 73)?;
            let periodic = read_bool(reader, 74)?;
            let knot_count = read_count(reader, 95)?;
            let control_count = read_count(reader, 96)?;
            let mut knots = Vec::new();
            while let Some(pair) = next_pair_if(reader, 40)? {
                knots.push(pair.as_double()?);
            }
            short_run(ctx, "spline edge knot list", knot_count, knots.len());
            let mut control_points = Vec::new();
            let mut weights = Vec::new();
            while let Some(point) = read_point2d(reader, 10)? {
                control_points.push(point);
                if let Some(weight) = next_pair_if(reader, 42)? {
                    weights.push(weight.as_double()?);
                }
            }
            short_run(ctx, "spline edge control point list", control_count, control_points.len());
            let mut fit_points = Vec::new();
            // Before R2010 a `97` here is the path's source count.
            let fit_count = if ctx.version() >= DxfVersion::R2010 {
                next_pair_if(reader, 97)?
            } else {
                None
            };
            if let Some(pair) = fit_count {
                let fit_count = declared_count(&pair)?;
                while let Some(point) = read_point2d(reader, 11)? {
                    fit_points.push(point);
                }
                short_run(ctx, "spline edge fit point list", fit_count, fit_points.len());
            }
            BoundaryEdge::Spline {
                degree,
                rational,
                periodic,
                knots,
                control_points,
                weights,
                fit_points,
                start_tangent: read_point2d(reader, 12)?,
                end_tangent: read_point2d(reader, 13)?,
            }
        }
        v => return Err(DxfError::range("edge_type", v as i64, 1, 4)),
    };
    Ok(Some(edge))
}

fn read_path(reader: &mut dyn DxfStreamReader, ctx: &mut ReadContext<'_>) -> Result<Option<BoundaryPath>> {
    let Some(flags) = next_pair_if(reader, 92)? else {
        return Ok(None);
    };
    let mut path = BoundaryPath {
        flags: BoundaryPathFlags::from_bits_truncate(flags.as_i32()?),
        ..Default::default()
    };
    if path.is_polyline() {
        let has_bulge = read_bool(reader, 72)?;
        path.is_closed = read_bool(reader, 73)?;
        let count = read_count(reader, 93)?;
        while path.polyline.len() < count {
            let Some(location) = read_point2d(reader, 10)? else {
                break;
            };
            let bulge = if has_bulge { read_double(reader, 42, 0.0)? } else { 0.0 };
            path.polyline.push(BoundaryVertex { location, bulge });
        }
        short_run(ctx, "polyline boundary", count, path.polyline.len());
    } else {
        let count = read_count(reader, 93)?;
        while path.edges.len() < count {
            match read_edge(reader, ctx)? {
                Some(edge) => path.edges.push(edge),
                None => break,
            }
        }
        short_run(ctx, "boundary path", count, path.edges.len());
    }
    let sources = read_count(reader, 97)?;
    while path.source_handles.len() < sources {
        match next_pair_if(reader, 330)? {
            Some(pair) => path.source_handles.push(pair.as_handle()?.to_hex()),
            None => break,
        }
    }
    short_run(ctx, "boundary source list", sources, path.source_handles.len());
    Ok(Some(path))
}

fn read_pattern_line(reader: &mut dyn DxfStreamReader) -> Result<Option<HatchPatternLine>> {
    let Some(angle) = next_pair_if(reader, 53)? else {
        return Ok(None);
    };
    let mut line = HatchPatternLine {
        angle: angle.as_double()?,
        base_point: Vector2::new(read_double(reader, 43, 0.0)?, read_double(reader, 44, 0.0)?),
        offset: Vector2::new(read_double(reader, 45, 0.0)?, read_double(reader, 46, 0.0)?),
        dash_lengths: Vec::new(),
    };
    let dashes = read_count(reader, 79)?;
    while line.dash_lengths.len() < dashes {
        match next_pair_if(reader, 49)? {
            Some(pair) => line.dash_lengths.push(pair.as_double()?),
            None => break,
        }
    }
    Ok(Some(line))
}

impl EntityCodec for Hatch {
    const NAME: &'static str = "HATCH";
    const INTRODUCED: DxfVersion = DxfVersion::R14;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbHatch"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            // X and Y of the elevation point are always zero.
            10 | 20 => {
                pair.as_double()?;
            }
            30 => self.elevation = pair.as_double()?,
            2 => self.pattern_name = pair.as_fixed_string(MAX_NAME_LENGTH).0.trim().to_string(),
            70 => self.solid_fill = pair.as_i16()? != 0,
            71 => self.associative = pair.as_i16()? != 0,
            75 => self.hatch_style = pair.as_i16()?,
            76 => self.pattern_type = HatchPatternType::from_value(pair.as_i16()?)?,
            52 => self.pattern_angle = pair.as_double()?,
            41 => self.pattern_scale = pair.as_double()?,
            77 => self.pattern_double = pair.as_i16()? != 0,
            47 => self.pixel_size = Some(pair.as_double()?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn read_nested(
        &mut self,
        pair: &DxfCodePair,
        reader: &mut dyn DxfStreamReader,
        ctx: &mut ReadContext<'_>,
    ) -> Result<bool> {
        match pair.code {
            91 => {
                let count = declared_count(pair)?;
                while self.paths.len() < count {
                    match read_path(reader, ctx)? {
                        Some(path) => self.paths.push(path),
                        None => break,
                    }
                }
                short_run(ctx, "boundary path list", count, self.paths.len());
            }
            78 => {
                let count = declared_count(pair)?;
                while self.pattern_lines.len() < count {
                    match read_pattern_line(reader)? {
                        Some(line) => self.pattern_lines.push(line),
                        None => break,
                    }
                }
                short_run(ctx, "pattern line list", count, self.pattern_lines.len());
            }
            98 => {
                let count = declared_count(pair)?;
                while self.seed_points.len() < count {
                    match read_point2d(reader, 10)? {
                        Some(point) => self.seed_points.push(point),
                        None => break,
                    }
                }
                short_run(ctx, "seed point list", count, self.seed_points.len());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbHatch", config)?;
        w.write_point3d(10, Vector3::new(0.0, 0.0, self.elevation))?;
        write_extrusion(w, &self.common, config)?;
        w.write_string(2, &self.pattern_name)?;
        w.write_bool(70, self.solid_fill)?;
        w.write_bool(71, self.associative)?;
        w.write_i32(91, self.paths.len() as i32)?;
        for path in &self.paths {
            path.write(w, config)?;
        }
        w.write_i16(75, self.hatch_style)?;
        w.write_i16(76, self.pattern_type as i16)?;
        if !self.solid_fill {
            w.write_double(52, self.pattern_angle)?;
            w.write_double(41, self.pattern_scale)?;
            w.write_bool(77, self.pattern_double)?;
            w.write_i16(78, self.pattern_lines.len() as i16)?;
            for line in &self.pattern_lines {
                w.write_double(53, line.angle)?;
                w.write_double(43, line.base_point.x)?;
                w.write_double(44, line.base_point.y)?;
                w.write_double(45, line.offset.x)?;
                w.write_double(46, line.offset.y)?;
                w.write_i16(79, line.dash_lengths.len() as i16)?;
                for dash in &line.dash_lengths {
                    w.write_double(49, *dash)?;
                }
            }
        }
        if let Some(size) = self.pixel_size {
            w.write_double(47, size)?;
        }
        w.write_i32(98, self.seed_points.len() as i32)?;
        for seed in &self.seed_points {
            w.write_point2d(10, *seed)?;
        }
        Ok(())
    }
}
