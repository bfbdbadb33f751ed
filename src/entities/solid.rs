//! Filled quadrilaterals: TRACE and SOLID

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{read_point, write_extrusion, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};

/// Corner codes `10`..`13`.
fn read_corners(corners: &mut [Vector3; 4], pair: &DxfCodePair) -> Result<bool> {
    let index = match pair.code {
        10 | 20 | 30 => 0,
        11 | 21 | 31 => 1,
        12 | 22 | 32 => 2,
        13 | 23 | 33 => 3,
        _ => return Ok(false),
    };
    read_point(&mut corners[index], pair)?;
    Ok(true)
}

fn write_corners(w: &mut dyn DxfStreamWriter, corners: &[Vector3; 4]) -> Result<()> {
    for (i, corner) in corners.iter().enumerate() {
        w.write_point3d(10 + i as i32, *corner)?;
    }
    Ok(())
}

macro_rules! quad_entity {
    ($(#[$doc:meta])* $ty:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            pub common: EntityCommon,
            /// Corners in wire order; the third and fourth cross over
            pub corners: [Vector3; 4],
        }

        impl $ty {
            pub fn new() -> Self {
                $ty {
                    common: EntityCommon::new(),
                    corners: [Vector3::ZERO; 4],
                }
            }

            pub fn from_corners(corners: [Vector3; 4]) -> Self {
                $ty {
                    corners,
                    ..Self::new()
                }
            }

            /// A triangle repeats its third corner.
            pub fn is_triangle(&self) -> bool {
                self.corners[2] == self.corners[3]
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl_entity!($ty);

        impl EntityCodec for $ty {
            const NAME: &'static str = $name;
            const INTRODUCED: DxfVersion = DxfVersion::R10;
            const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbTrace"];

            fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
                read_corners(&mut self.corners, pair)
            }

            fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
                write_marker(w, "AcDbTrace", config)?;
                write_corners(w, &self.corners)?;
                write_extrusion(w, &self.common, config)
            }
        }
    };
}

quad_entity!(
    /// A wide line segment
    Trace,
    "TRACE"
);

quad_entity!(
    /// A filled triangle or quadrilateral
    Solid,
    "SOLID"
);
