//! Modeler geometry entities: 3DSOLID, BODY and REGION
//!
//! All three carry an opaque proprietary description on chained `1` lines
//! (with continuation lines on `3`). The text is kept verbatim so a read
//! followed by a write reproduces it byte for byte.

use super::EntityCommon;
use crate::error::Result;
use crate::io::dxf::codec::{write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::DxfVersion;

/// Current modeler format version.
pub const MODELER_FORMAT_VERSION: i16 = 1;

/// The proprietary data body shared by the modeler entities.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelerGeometry {
    /// `70`
    pub version: i16,
    /// Lines on code `1`, in stream order
    pub proprietary_data: Vec<String>,
    /// Lines on code `3`, in stream order
    pub additional_data: Vec<String>,
}

impl ModelerGeometry {
    pub fn new() -> Self {
        ModelerGeometry {
            version: MODELER_FORMAT_VERSION,
            proprietary_data: Vec::new(),
            additional_data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.proprietary_data.is_empty() && self.additional_data.is_empty()
    }

    fn read_code(&mut self, pair: &DxfCodePair) -> Result<bool> {
        match pair.code {
            70 => self.version = pair.as_i16()?,
            1 => self.proprietary_data.push(pair.as_string()),
            3 => self.additional_data.push(pair.as_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbModelerGeometry", config)?;
        w.write_i16(70, self.version)?;
        for line in &self.proprietary_data {
            w.write_string(1, line)?;
        }
        for line in &self.additional_data {
            w.write_string(3, line)?;
        }
        Ok(())
    }
}

impl Default for ModelerGeometry {
    fn default() -> Self {
        Self::new()
    }
}

/// A 3D solid
#[derive(Debug, Clone, PartialEq)]
pub struct Solid3D {
    pub common: EntityCommon,
    pub geometry: ModelerGeometry,
    /// Soft owner reference to the history object (`350`, R2007+)
    pub history_handle: String,
}

impl Solid3D {
    pub fn new() -> Self {
        Solid3D {
            common: EntityCommon::new(),
            geometry: ModelerGeometry::new(),
            history_handle: String::new(),
        }
    }

    pub fn with_data(proprietary_data: Vec<String>) -> Self {
        let mut solid = Self::new();
        solid.geometry.proprietary_data = proprietary_data;
        solid
    }
}

impl Default for Solid3D {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Solid3D);

impl EntityCodec for Solid3D {
    const NAME: &'static str = "3DSOLID";
    const INTRODUCED: DxfVersion = DxfVersion::R13;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbModelerGeometry", "AcDb3dSolid"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            350 => {
                self.history_handle = pair.as_handle()?.to_hex();
                Ok(true)
            }
            _ => self.geometry.read_code(pair),
        }
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        self.geometry.write(w, config)?;
        if config.version >= DxfVersion::R2007 {
            w.write_string(100, "AcDb3dSolid")?;
            w.write_handle_text(350, &self.history_handle)?;
        }
        Ok(())
    }
}

macro_rules! modeler_entity {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            pub common: EntityCommon,
            pub geometry: ModelerGeometry,
        }

        impl $ty {
            pub fn new() -> Self {
                $ty {
                    common: EntityCommon::new(),
                    geometry: ModelerGeometry::new(),
                }
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
            const INTRODUCED: DxfVersion = DxfVersion::R13;
            const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbModelerGeometry"];

            fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
                self.geometry.read_code(pair)
            }

            fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
                self.geometry.write(w, config)
            }
        }
    };
}

modeler_entity!(
    /// An unbounded modeler body
    Body,
    "BODY"
);

modeler_entity!(
    /// A closed planar modeler area
    Region,
    "REGION"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    const SAT: [&str; 3] = [
        "21200 115 1 0",
        "16 Autodesk AutoCAD 19 ASM 217.0.0.1304 NT 0",
        "1 9.9999999999999995e-07 1e-10 ",
    ];

    #[test]
    fn test_proprietary_data_preserved() {
        let mut input = String::from("  0\n3DSOLID\n  5\n2a\n100\nAcDbEntity\n  8\n0\n100\nAcDbModelerGeometry\n 70\n1\n");
        for line in SAT {
            input.push_str(&format!("  1\n{}\n", line));
        }
        let (solid, diagnostics) = parse::<Solid3D>(&input, DxfVersion::R14);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.into_vec());
        assert_eq!(solid.geometry.proprietary_data.len(), 3);
        assert!(solid.geometry.additional_data.is_empty());

        let out = emit(&solid, DxfVersion::R14);
        for line in SAT {
            assert!(out.contains(&format!("  1\n{}\n", line)));
        }
        assert!(!out.contains("  3\n"));
        assert_eq!(solid.geometry.proprietary_data[2], SAT[2]);
        assert_eq!(round_trip(&solid, DxfVersion::R14), solid);
    }

    #[test]
    fn test_history_handle_gated() {
        let mut solid = Solid3D::with_data(vec!["data".into()]);
        solid.history_handle = "1f".into();
        assert!(!emit(&solid, DxfVersion::R2004).contains("AcDb3dSolid"));
        let out = emit(&solid, DxfVersion::R2007);
        assert!(out.contains("100\nAcDb3dSolid\n350\n1f\n"));
        assert_eq!(round_trip(&solid, DxfVersion::R2007), solid);
    }

    #[test]
    fn test_body_and_region() {
        let mut body = Body::new();
        body.geometry.proprietary_data = vec!["abc".into()];
        body.geometry.additional_data = vec!["def".into()];
        let out = emit(&body, DxfVersion::R2000);
        assert!(out.starts_with("  0\nBODY\n"));
        assert!(out.find("  1\nabc").unwrap() < out.find("  3\ndef").unwrap());
        assert_eq!(round_trip(&body, DxfVersion::R2000), body);

        let region = Region::new();
        assert!(region.geometry.is_empty());
        assert_eq!(round_trip(&region, DxfVersion::R2000), region);
    }
}
