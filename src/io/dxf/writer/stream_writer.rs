//! DXF stream writer trait

use crate::error::Result;
use crate::io::dxf::values;
use crate::types::{Handle, Vector2, Vector3};

/// Trait for writing DXF code/value pairs.
///
/// Implementors provide the raw pair emission; the typed writers format
/// values the way the wire expects them.
pub trait DxfStreamWriter {
    /// Write one pair with already formatted value text.
    fn write_pair(&mut self, code: i32, value: &str) -> Result<()>;

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;

    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_pair(code, value)
    }

    /// 8-bit value (codes 280–289)
    fn write_byte(&mut self, code: i32, value: u8) -> Result<()> {
        self.write_pair(code, &value.to_string())
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_pair(code, &value.to_string())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_pair(code, &value.to_string())
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.write_pair(code, &value.to_string())
    }

    /// Six fractional digits.
    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_pair(code, &values::format_double(value))
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.write_pair(code, if value { "1" } else { "0" })
    }

    /// Lowercase hex.
    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_pair(code, &values::format_handle(handle))
    }

    /// One chunk of binary data as uppercase hex pairs.
    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        self.write_pair(code, &values::format_binary(data))
    }
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write a 2D point (codes 10/20 or similar)
    fn write_point2d(&mut self, x_code: i32, point: Vector2) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        Ok(())
    }

    /// Write a 3D point (codes 10/20/30 or similar)
    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, point.z)?;
        Ok(())
    }

    /// Write a subclass marker
    fn write_subclass(&mut self, marker: &str) -> Result<()> {
        self.write_string(100, marker)
    }

    /// Write a handle reference kept as text, skipping it when empty.
    fn write_handle_text(&mut self, code: i32, handle: &str) -> Result<()> {
        if handle.is_empty() {
            return Ok(());
        }
        match Handle::from_hex(handle) {
            Some(h) => self.write_handle(code, h),
            None => self.write_string(code, handle),
        }
    }

    /// Split `data` into chained `310`-style chunks.
    fn write_binary_chunks(&mut self, code: i32, data: &[u8]) -> Result<()> {
        for chunk in data.chunks(values::BINARY_CHUNK_SIZE) {
            self.write_binary(code, chunk)?;
        }
        Ok(())
    }

    /// Write section start
    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)?;
        Ok(())
    }

    /// Write section end
    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write end of file
    fn write_eof(&mut self) -> Result<()> {
        self.write_string(0, "EOF")
    }
}

// Auto-implement the extension trait for all stream writers
impl<T: DxfStreamWriter + ?Sized> DxfStreamWriterExt for T {}

/// Pairs held in memory until they are known to be complete.
///
/// A record is rendered here first and replayed onto the real writer only
/// once its codec has succeeded, so a refused record leaves no partial
/// output behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairBuffer {
    pairs: Vec<(i32, String)>,
}

impl PairBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Move the pairs of `other` to the end of this buffer.
    pub fn append(&mut self, other: &mut PairBuffer) {
        self.pairs.append(&mut other.pairs);
    }

    /// Emit every buffered pair onto `w`, in order.
    pub fn replay(&self, w: &mut dyn DxfStreamWriter) -> Result<()> {
        for (code, value) in &self.pairs {
            w.write_pair(*code, value)?;
        }
        Ok(())
    }
}

impl DxfStreamWriter for PairBuffer {
    fn write_pair(&mut self, code: i32, value: &str) -> Result<()> {
        self.pairs.push((code, value.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_buffer_replays_in_order() {
        let mut head = PairBuffer::new();
        head.write_section_start("ENTITIES").unwrap();
        let mut body = PairBuffer::new();
        body.write_point2d(10, Vector2::new(1.0, 2.0)).unwrap();
        head.append(&mut body);
        assert!(body.is_empty());
        assert_eq!(head.len(), 4);

        let mut copy = PairBuffer::new();
        head.replay(&mut copy).unwrap();
        assert_eq!(copy, head);
    }
}
