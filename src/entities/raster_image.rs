//! Raster image entity (IMAGE)

use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{read_point, read_point2d, write_marker, EntityCodec, ReadContext};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Image display properties on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ImageDisplayFlags: i16 {
        const SHOW_IMAGE = 1;
        const SHOW_NOT_ALIGNED = 2;
        const USE_CLIPPING = 4;
        const TRANSPARENCY_ON = 8;
    }
}

/// Clipping boundary kind on code `71`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum ClipBoundaryType {
    /// Two opposite corners
    #[default]
    Rectangular = 1,
    Polygonal = 2,
}

impl ClipBoundaryType {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            1 => Ok(Self::Rectangular),
            2 => Ok(Self::Polygonal),
            v => Err(DxfError::range("clip_boundary_type", v as i64, 1, 2)),
        }
    }
}

/// A raster image placed through an IMAGEDEF object
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub common: EntityCommon,
    pub class_version: i32,
    pub insertion_point: Vector3,
    /// One pixel along the image X axis
    pub u_vector: Vector3,
    /// One pixel along the image Y axis
    pub v_vector: Vector3,
    /// Width and height in pixels
    pub size: Vector2,
    /// Hard reference to the IMAGEDEF object (`340`)
    pub definition_handle: String,
    pub flags: ImageDisplayFlags,
    pub clipping: bool,
    /// 0..=100
    pub brightness: u8,
    /// 0..=100
    pub contrast: u8,
    /// 0..=100
    pub fade: u8,
    /// Hard reference to the IMAGEDEF_REACTOR object (`360`)
    pub reactor_handle: String,
    pub clip_boundary_type: ClipBoundaryType,
    pub clip_boundary: Vec<Vector2>,
}

impl RasterImage {
    pub fn new() -> Self {
        RasterImage {
            common: EntityCommon::new(),
            class_version: 0,
            insertion_point: Vector3::ZERO,
            u_vector: Vector3::UNIT_X,
            v_vector: Vector3::UNIT_Y,
            size: Vector2::new(1.0, 1.0),
            definition_handle: String::new(),
            flags: ImageDisplayFlags::SHOW_IMAGE,
            clipping: false,
            brightness: 50,
            contrast: 50,
            fade: 0,
            reactor_handle: String::new(),
            clip_boundary_type: ClipBoundaryType::Rectangular,
            clip_boundary: Vec::new(),
        }
    }

    pub fn with_definition(definition_handle: impl Into<String>, insertion_point: Vector3, size: Vector2) -> Self {
        RasterImage {
            definition_handle: definition_handle.into(),
            insertion_point,
            size,
            ..Self::new()
        }
    }

    pub fn set_brightness(&mut self, value: i16) -> Result<&mut Self> {
        self.brightness = percentage("brightness", value)?;
        Ok(self)
    }

    pub fn set_contrast(&mut self, value: i16) -> Result<&mut Self> {
        self.contrast = percentage("contrast", value)?;
        Ok(self)
    }

    pub fn set_fade(&mut self, value: i16) -> Result<&mut Self> {
        self.fade = percentage("fade", value)?;
        Ok(self)
    }

    /// Clip to the rectangle spanned by two opposite corners.
    pub fn clip_to_rectangle(&mut self, first: Vector2, second: Vector2) {
        self.clip_boundary_type = ClipBoundaryType::Rectangular;
        self.clip_boundary = vec![first, second];
        self.clipping = true;
        self.flags |= ImageDisplayFlags::USE_CLIPPING;
    }
}

fn percentage(field: &'static str, value: i16) -> Result<u8> {
    match value {
        0..=100 => Ok(value as u8),
        v => Err(DxfError::range(field, v as i64, 0, 100)),
    }
}

impl Default for RasterImage {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(RasterImage);

impl EntityCodec for RasterImage {
    const NAME: &'static str = "IMAGE";
    const INTRODUCED: DxfVersion = DxfVersion::R14;
    const SUBCLASS_MARKERS: &'static [&'static str] = &["AcDbRasterImage"];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            90 => self.class_version = pair.as_i32()?,
            10 | 20 | 30 => read_point(&mut self.insertion_point, pair)?,
            11 | 21 | 31 => read_point(&mut self.u_vector, pair)?,
            12 | 22 | 32 => read_point(&mut self.v_vector, pair)?,
            13 | 23 => read_point2d(&mut self.size, pair)?,
            340 => self.definition_handle = pair.as_handle()?.to_hex(),
            70 => self.flags = ImageDisplayFlags::from_bits_truncate(pair.as_i16()?),
            280 => self.clipping = pair.as_i16()? != 0,
            281 => {
                self.set_brightness(pair.as_i16()?)?;
            }
            282 => {
                self.set_contrast(pair.as_i16()?)?;
            }
            283 => {
                self.set_fade(pair.as_i16()?)?;
            }
            360 => self.reactor_handle = pair.as_handle()?.to_hex(),
            71 => self.clip_boundary_type = ClipBoundaryType::from_value(pair.as_i16()?)?,
            // The vertex count is implied by the 14/24 list.
            91 => {
                pair.as_i32()?;
            }
            14 => self.clip_boundary.push(Vector2::new(pair.as_double()?, 0.0)),
            24 => match self.clip_boundary.last_mut() {
                Some(last) => last.y = pair.as_double()?,
                None => self.clip_boundary.push(Vector2::new(0.0, pair.as_double()?)),
            },
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.clip_boundary_type == ClipBoundaryType::Rectangular
            && !self.clip_boundary.is_empty()
            && self.clip_boundary.len() != 2
        {
            return Err(DxfError::validation(
                Self::NAME,
                format!(
                    "rectangular clip boundary needs 2 vertices, found {}",
                    self.clip_boundary.len()
                ),
            ));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbRasterImage", config)?;
        w.write_i32(90, self.class_version)?;
        w.write_point3d(10, self.insertion_point)?;
        w.write_point3d(11, self.u_vector)?;
        w.write_point3d(12, self.v_vector)?;
        w.write_point2d(13, self.size)?;
        w.write_handle_text(340, &self.definition_handle)?;
        w.write_i16(70, self.flags.bits())?;
        w.write_bool(280, self.clipping)?;
        w.write_i16(281, self.brightness as i16)?;
        w.write_i16(282, self.contrast as i16)?;
        w.write_i16(283, self.fade as i16)?;
        w.write_handle_text(360, &self.reactor_handle)?;
        if !self.clip_boundary.is_empty() {
            w.write_i16(71, self.clip_boundary_type as i16)?;
            w.write_i32(91, self.clip_boundary.len() as i32)?;
            for vertex in &self.clip_boundary {
                w.write_point2d(14, *vertex)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::codec::test_support::{emit, parse, round_trip};

    fn sample() -> RasterImage {
        RasterImage::with_definition("2e", Vector3::new(5.0, 5.0, 0.0), Vector2::new(640.0, 480.0))
    }

    #[test]
    fn test_round_trip() {
        let mut image = sample();
        image.reactor_handle = "2f".into();
        image.set_brightness(70).unwrap().set_fade(10).unwrap();
        image.clip_to_rectangle(Vector2::new(-0.5, -0.5), Vector2::new(639.5, 479.5));
        let out = emit(&image, DxfVersion::R2000);
        assert!(out.contains("340\n2e\n"));
        assert!(out.contains(" 91\n2\n 14\n-0.500000\n 24\n-0.500000\n"));
        assert_eq!(round_trip(&image, DxfVersion::R2000), image);
    }

    #[test]
    fn test_percentage_range() {
        let mut image = sample();
        assert!(image.set_contrast(101).is_err());
        assert!(image.set_brightness(-1).is_err());
        assert_eq!(image, sample());
    }

    #[test]
    fn test_rectangular_clip_needs_two_vertices() {
        let mut image = sample();
        image.clip_boundary = vec![Vector2::new(0.0, 0.0); 3];
        let mut w = crate::io::dxf::writer::DxfTextWriter::new(Vec::new());
        let err = crate::io::dxf::codec::write_entity(&mut w, &image, &DxfConfiguration::new(DxfVersion::R2000))
            .unwrap_err();
        assert!(matches!(err, DxfError::Validation { entity: "IMAGE", .. }));
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn test_bad_brightness_on_read_keeps_default() {
        let input = "  0\nIMAGE\n100\nAcDbRasterImage\n281\n150\n";
        let (image, diagnostics) = parse::<RasterImage>(input, DxfVersion::R2000);
        assert_eq!(image.brightness, 50);
        assert!(diagnostics.contains("brightness = 150"));
    }
}
