//! Donut: a filled ring written as a closed wide POLYLINE

use super::polyline::{Polyline, PolylineFlags, Vertex};
use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::DxfStreamWriter;
use crate::types::{DxfVersion, Vector3};

/// A ring given by its center and diameters. There is no DONUT record on
/// the wire: it is written as a two-vertex closed POLYLINE with bulge 1 and
/// is read back as that polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Donut {
    pub common: EntityCommon,
    /// Center; Z is the polyline elevation
    pub center: Vector3,
    pub inside_diameter: f64,
    pub outside_diameter: f64,
}

impl Donut {
    pub fn new() -> Self {
        Donut {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            inside_diameter: 0.5,
            outside_diameter: 1.0,
        }
    }

    pub fn from_diameters(center: Vector3, inside_diameter: f64, outside_diameter: f64) -> Self {
        Donut {
            center,
            inside_diameter,
            outside_diameter,
            ..Self::new()
        }
    }

    /// The polyline this donut is written as.
    pub fn to_polyline(&self) -> Polyline {
        let width = (self.outside_diameter - self.inside_diameter) / 2.0;
        let radius = (self.outside_diameter + self.inside_diameter) / 4.0;
        let mut polyline = Polyline::new();
        polyline.common = self.common.clone();
        polyline.elevation = self.center.z;
        polyline.flags = PolylineFlags::CLOSED;
        polyline.default_start_width = width;
        polyline.default_end_width = width;
        for x in [self.center.x - radius, self.center.x + radius] {
            let mut vertex = Vertex::with_bulge(Vector3::new(x, self.center.y, 0.0), 1.0);
            vertex.common.layer = self.common.layer.clone();
            vertex.start_width = width;
            vertex.end_width = width;
            polyline.add_vertex(vertex);
        }
        polyline.seqend.common.layer = self.common.layer.clone();
        polyline
    }
}

impl Default for Donut {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Donut);

impl EntityCodec for Donut {
    const NAME: &'static str = "DONUT";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &[];

    fn dxf_name(&self, _version: DxfVersion) -> &'static str {
        Polyline::NAME
    }

    fn read_code(&mut self, _pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.inside_diameter < 0.0 || self.outside_diameter <= self.inside_diameter {
            return Err(DxfError::validation(
                Self::NAME,
                format!(
                    "diameters {} / {} do not describe a ring",
                    self.inside_diameter, self.outside_diameter
                ),
            ));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        self.to_polyline().write_body(w, config)
    }

    fn write_children(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        self.to_polyline().write_children(w, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse};

    #[test]
    fn test_donut_written_as_polyline() {
        let donut = Donut::from_diameters(Vector3::new(5.0, 5.0, 0.0), 2.0, 4.0);
        let out = emit(&donut, DxfVersion::R12);
        assert!(out.starts_with("  0\nPOLYLINE\n"));
        assert!(out.contains(" 70\n1\n 40\n1.000000\n 41\n1.000000\n"));

        let (polyline, _) = parse::<Polyline>(&out, DxfVersion::R12);
        assert!(polyline.is_closed());
        assert_eq!(polyline.vertices.len(), 2);
        assert_eq!(polyline.vertices[0].location, Vector3::new(3.5, 5.0, 0.0));
        assert_eq!(polyline.vertices[1].location, Vector3::new(6.5, 5.0, 0.0));
        assert!(polyline.vertices.iter().all(|v| v.bulge == 1.0));
    }

    #[test]
    fn test_inverted_diameters_refused() {
        let donut = Donut::from_diameters(Vector3::ZERO, 3.0, 1.0);
        assert!(donut.validate(&DxfConfiguration::default()).is_err());
    }
}
