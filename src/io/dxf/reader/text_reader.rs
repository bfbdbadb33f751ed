//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line-pair reader over an ASCII DXF stream.
///
/// Each pair is two lines: the decimal group code, then the raw value.
/// CRLF and LF endings are equivalent; trailing whitespace on the value line
/// is dropped, leading whitespace is kept. The code line may be padded on
/// either side.
pub struct DxfTextReader<R: BufRead> {
    reader: R,
    line_number: usize,
    pushed_back: Vec<DxfCodePair>,
    /// Non-UTF8 fallback encoding.  `None` means use Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
    source_name: Option<String>,
    buffer: Vec<u8>,
}

impl DxfTextReader<BufReader<File>> {
    /// Open a file for reading.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = Self::new(BufReader::new(file));
        reader.source_name = Some(path.display().to_string());
        Ok(reader)
    }
}

impl<R: BufRead> DxfTextReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            pushed_back: Vec::new(),
            encoding: None,
            source_name: None,
            buffer: Vec::with_capacity(256),
        }
    }

    /// Decode non-UTF-8 lines with `encoding` instead of Latin-1.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Switch the fallback encoding mid-stream, e.g. after `$DWGCODEPAGE`.
    pub fn set_encoding(&mut self, encoding: Option<&'static Encoding>) {
        self.encoding = encoding;
    }

    /// Name reported in diagnostics.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Read one physical line without its terminator.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let n = self.reader.read_until(b'\n', &mut self.buffer)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        while matches!(self.buffer.last(), Some(b'\n') | Some(b'\r')) {
            self.buffer.pop();
        }
        if self.line_number == 1 && self.buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
            self.buffer.drain(..3);
        }

        // Try UTF-8 first, then use configured encoding or Latin-1 fallback
        let line = match std::str::from_utf8(&self.buffer) {
            Ok(s) => s.to_string(),
            Err(_) => match self.encoding {
                Some(enc) => {
                    let (decoded, _, _) = enc.decode(&self.buffer);
                    decoded.into_owned()
                }
                None => self.buffer.iter().map(|&b| b as char).collect(),
            },
        };
        Ok(Some(line))
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code_line = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };

        let code = code_line
            .trim()
            .parse::<i32>()
            .map_err(|_| DxfError::InvalidCode {
                line: self.line_number,
                text: code_line.clone(),
            })?;

        // Value lines keep their blanks; only the terminator is dropped.
        let value = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(DxfError::UnexpectedEof {
                    code,
                    line: self.line_number,
                })
            }
        };

        Ok(Some(DxfCodePair::new(code, value, self.line_number)))
    }
}

impl<R: BufRead> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.pushed_back.pop() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn peek_code(&mut self) -> Result<Option<i32>> {
        if let Some(pair) = self.pushed_back.last() {
            return Ok(Some(pair.code));
        }
        match self.read_pair_internal()? {
            Some(pair) => {
                let code = pair.code;
                self.pushed_back.push(pair);
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.pushed_back.push(pair);
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}
