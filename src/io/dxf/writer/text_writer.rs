//! ASCII DXF writer

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// ASCII DXF stream writer.
///
/// Every pair is two `\n`-terminated lines: the code right-aligned in a
/// three-character field, then the value text.
pub struct DxfTextWriter<W: Write> {
    writer: W,
    /// Output encoding for values; `None` writes UTF-8.
    encoding: Option<&'static Encoding>,
    pairs_written: usize,
}

impl DxfTextWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DxfTextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            encoding: None,
            pairs_written: 0,
        }
    }

    /// Encode value text with `encoding` (e.g. a Windows code page).
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Write a DXF code with proper formatting (right-aligned in 3-character field)
    fn write_code(&mut self, code: i32) -> Result<()> {
        if code < 10 {
            writeln!(self.writer, "  {}", code)?;
        } else if code < 100 {
            writeln!(self.writer, " {}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    fn write_value(&mut self, value: &str) -> Result<()> {
        match self.encoding {
            Some(enc) if enc != encoding_rs::UTF_8 => {
                let (bytes, _, _) = enc.encode(value);
                self.writer.write_all(&bytes)?;
            }
            _ => self.writer.write_all(value.as_bytes())?,
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Number of pairs emitted so far.
    pub fn pairs_written(&self) -> usize {
        self.pairs_written
    }

    /// Flush and release the underlying writer.
    pub fn close(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Get the inner writer without flushing
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_pair(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        self.write_value(value)?;
        self.pairs_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::writer::DxfStreamWriterExt;
    use crate::types::{Handle, Vector3};

    fn render(f: impl FnOnce(&mut DxfTextWriter<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buf);
            f(&mut writer);
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_string() {
        let out = render(|w| w.write_string(0, "LINE").unwrap());
        assert_eq!(out, "  0\nLINE\n");
    }

    #[test]
    fn test_write_code_formatting() {
        let out = render(|w| {
            w.write_i16(5, 100).unwrap();
            w.write_i16(62, 7).unwrap();
            w.write_i16(100, 1).unwrap();
            w.write_i16(1070, 2).unwrap();
        });
        assert_eq!(out, "  5\n100\n 62\n7\n100\n1\n1070\n2\n");
    }

    #[test]
    fn test_write_point3d() {
        let out = render(|w| w.write_point3d(10, Vector3::new(1.0, 2.0, 3.0)).unwrap());
        assert_eq!(out, " 10\n1.000000\n 20\n2.000000\n 30\n3.000000\n");
    }

    #[test]
    fn test_write_handle() {
        let out = render(|w| w.write_handle(5, Handle::new(255)).unwrap());
        assert_eq!(out, "  5\nff\n");
    }

    #[test]
    fn test_binary_chunks() {
        let data = vec![0xABu8; 130];
        let out = render(|w| w.write_binary_chunks(310, &data).unwrap());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].len(), 254);
        assert_eq!(lines[3], "ABABAB");
    }

    #[test]
    fn test_encoded_output() {
        let mut buf = Vec::new();
        {
            let mut w = DxfTextWriter::new(&mut buf).with_encoding(encoding_rs::WINDOWS_1252);
            w.write_string(1, "Café").unwrap();
        }
        assert_eq!(buf, b"  1\nCaf\xE9\n");
    }

    #[test]
    fn test_pairs_written() {
        let mut w = DxfTextWriter::new(Vec::new());
        w.write_string(0, "EOF").unwrap();
        assert_eq!(w.pairs_written(), 1);
        let inner = w.close().unwrap();
        assert_eq!(inner, b"  0\nEOF\n");
    }
}
