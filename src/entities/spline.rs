//! Spline entity

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, read_point_list, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Spline flags on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SplineFlags: i16 {
        const CLOSED = 1;
        const PERIODIC = 2;
        const RATIONAL = 4;
        const PLANAR = 8;
        const LINEAR = 16;
    }
}

/// Counts announced by `72`/`73`/`74`, checked against the lists once the
/// record ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DeclaredCounts {
    knots: Option<i32>,
    control_points: Option<i32>,
    fit_points: Option<i32>,
}

/// NURBS data shared by SPLINE and HELIX.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurve {
    pub flags: SplineFlags,
    pub degree: i16,
    pub knot_tolerance: f64,
    pub control_point_tolerance: f64,
    pub fit_tolerance: f64,
    pub start_tangent: Option<Vector3>,
    pub end_tangent: Option<Vector3>,
    pub knots: Vec<f64>,
    /// One per control point when rational; empty otherwise
    pub weights: Vec<f64>,
    pub control_points: Vec<Vector3>,
    pub fit_points: Vec<Vector3>,
    declared: DeclaredCounts,
}

impl SplineCurve {
    pub fn new() -> Self {
        SplineCurve {
            flags: SplineFlags::empty(),
            degree: 3,
            knot_tolerance: 1e-7,
            control_point_tolerance: 1e-6,
            fit_tolerance: 1e-10,
            start_tangent: None,
            end_tangent: None,
            knots: Vec::new(),
            weights: Vec::new(),
            control_points: Vec::new(),
            fit_points: Vec::new(),
            declared: DeclaredCounts::default(),
        }
    }

    pub fn number_of_knots(&self) -> usize {
        self.knots.len()
    }

    pub fn number_of_control_points(&self) -> usize {
        self.control_points.len()
    }

    pub fn number_of_fit_points(&self) -> usize {
        self.fit_points.len()
    }

    pub(crate) fn read_code(&mut self, pair: &DxfCodePair) -> Result<bool> {
        match pair.code {
            70 => self.flags = SplineFlags::from_bits_truncate(pair.as_i16()?),
            71 => self.degree = pair.as_i16()?,
            72 => self.declared.knots = Some(pair.as_i32()?),
            73 => self.declared.control_points = Some(pair.as_i32()?),
            74 => self.declared.fit_points = Some(pair.as_i32()?),
            42 => self.knot_tolerance = pair.as_double()?,
            43 => self.control_point_tolerance = pair.as_double()?,
            44 => self.fit_tolerance = pair.as_double()?,
            12 | 22 | 32 => read_point(self.start_tangent.get_or_insert(Vector3::ZERO), pair)?,
            13 | 23 | 33 => read_point(self.end_tangent.get_or_insert(Vector3::ZERO), pair)?,
            40 => self.knots.push(pair.as_double()?),
            41 => self.weights.push(pair.as_double()?),
            10 | 20 | 30 => read_point_list(&mut self.control_points, pair)?,
            11 | 21 | 31 => read_point_list(&mut self.fit_points, pair)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Compare the announced counts with what was read. The lists are kept
    /// as read.
    pub(crate) fn check_counts(&mut self, ctx: &mut ReadContext<'_>, operation: &str) {
        let declared = std::mem::take(&mut self.declared);
        let checks = [
            ("knots", declared.knots, self.knots.len()),
            ("control points", declared.control_points, self.control_points.len()),
            ("fit points", declared.fit_points, self.fit_points.len()),
        ];
        for (what, declared, actual) in checks {
            if let Some(declared) = declared {
                if declared < 0 || declared as usize != actual {
                    ctx.warn(
                        operation,
                        format!("spline declares {} {} but {} were read", declared, what, actual),
                    );
                }
            }
        }
    }

    /// Everything after the `AcDbSpline` marker and the normal.
    pub(crate) fn write(&self, w: &mut dyn DxfStreamWriter) -> Result<()> {
        w.write_i16(70, self.flags.bits())?;
        w.write_i16(71, self.degree)?;
        w.write_i32(72, self.knots.len() as i32)?;
        w.write_i32(73, self.control_points.len() as i32)?;
        w.write_i32(74, self.fit_points.len() as i32)?;
        w.write_double(42, self.knot_tolerance)?;
        w.write_double(43, self.control_point_tolerance)?;
        if !self.fit_points.is_empty() {
            w.write_double(44, self.fit_tolerance)?;
        }
        if let Some(tangent) = self.start_tangent {
            w.write_point3d(12, tangent)?;
        }
        if let Some(tangent) = self.end_tangent {
            w.write_point3d(13, tangent)?;
        }
        for knot in &self.knots {
            w.write_double(40, *knot)?;
        }
        for weight in &self.weights {
            w.write_double(41, *weight)?;
        }
        for point in &self.control_points {
            w.write_point3d(10, *point)?;
        }
        for point in &self.fit_points {
            w.write_point3d(11, *point)?;
        }
        Ok(())
    }
}

impl Default for SplineCurve {
    fn default() -> Self {
        Self::new()
    }
}

/// A NURBS curve
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub common: EntityCommon,
    pub curve: SplineCurve,
}

impl Spline {
    pub fn new() -> Self {
        Spline {
            common: EntityCommon::new(),
            curve: SplineCurve::new(),
        }
    }

    /// A non-rational spline from knots and control points.
    pub fn from_control_points(degree: i16, knots: Vec<f64>, control_points: Vec<Vector3>) -> Self {
        let mut spline = Self::new();
        spline.curve.degree = degree;
        spline.curve.knots = knots;
        spline.curve.control_points = control_points;
        spline
    }

    pub fn is_closed(&self) -> bool {
        self.curve.flags.contains(SplineFlags::CLOSED)
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Spline);

impl EntityCodec for Spline {
    const NAME: &'static str = "SPLINE";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbSpline"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        self.curve.read_code(pair)
    }

    fn finish_read(&mut self, ctx: &mut ReadContext<'_>) {
        self.curve.check_counts(ctx, "read_spline");
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbSpline", config)?;
        write_extrusion(w, &self.common, config)?;
        self.curve.write(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    fn sample() -> Spline {
        Spline::from_control_points(
            3,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 2.0, 0.0),
                Vector3::new(3.0, 2.0, 0.0),
                Vector3::new(4.0, 0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_defaults() {
        let spline = Spline::new();
        assert_eq!(spline.curve.degree, 3);
        assert_eq!(spline.curve.knot_tolerance, 1e-7);
        assert_eq!(spline.curve.control_point_tolerance, 1e-6);
        assert_eq!(spline.curve.fit_tolerance, 1e-10);
    }

    #[test]
    fn test_counts_derived_on_write() {
        let out = emit(&sample(), DxfVersion::R14);
        assert!(out.contains(" 72\n6\n 73\n4\n 74\n0\n"));
        assert_eq!(out.matches(" 40\n").count(), 6);
        assert_eq!(out.matches(" 10\n").count(), 4);
    }

    #[test]
    fn test_round_trip() {
        let mut spline = sample();
        spline.curve.flags = SplineFlags::PLANAR;
        spline.curve.start_tangent = Some(Vector3::new(1.0, 0.0, 0.0));
        spline.curve.fit_points = vec![Vector3::ZERO, Vector3::new(4.0, 0.0, 0.0)];
        let back = round_trip(&spline, DxfVersion::R14);
        assert_eq!(back.curve.number_of_knots(), 6);
        assert_eq!(back.curve.number_of_control_points(), 4);
        assert_eq!(back.curve.control_points, spline.curve.control_points);
        assert_eq!(back.curve.start_tangent, spline.curve.start_tangent);
        assert_eq!(back.curve.end_tangent, None);
        assert_eq!(back.curve.fit_points, spline.curve.fit_points);
        assert_eq!(back.curve.flags, SplineFlags::PLANAR);
    }

    #[test]
    fn test_count_mismatch_keeps_values() {
        let input = "  0\nSPLINE\n100\nAcDbSpline\n 71\n3\n 72\n8\n 73\n1\n 40\n0.0\n 40\n1.0\n 10\n1.0\n 20\n2.0\n 30\n3.0\n";
        let (spline, diagnostics) = parse::<Spline>(input, DxfVersion::R14);
        assert_eq!(spline.curve.knots, vec![0.0, 1.0]);
        assert_eq!(spline.curve.control_points, vec![Vector3::new(1.0, 2.0, 3.0)]);
        assert!(diagnostics.contains("spline declares 8 knots but 2 were read"));
        assert!(!diagnostics.contains("control points but"));
    }

    #[test]
    fn test_thickness_does_not_touch_knots() {
        let input = "  0\nSPLINE\n 39\n2.0\n 48\n0.5\n 72\n1\n 40\n0.25\n";
        let (spline, diagnostics) = parse::<Spline>(input, DxfVersion::R14);
        assert_eq!(spline.curve.knots, vec![0.25]);
        assert_eq!(spline.common.thickness, 2.0);
        assert_eq!(spline.common.linetype_scale, 0.5);
        assert!(!diagnostics.contains("spline declares"));
    }
}
