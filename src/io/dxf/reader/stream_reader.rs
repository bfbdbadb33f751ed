//! DXF stream reader trait and the code/value pair

use crate::error::Result;
use crate::io::dxf::group_code::GroupCodeValueType;
use crate::io::dxf::values;
use crate::types::Handle;

/// A DXF code/value pair as read from the stream.
///
/// The value is kept as raw text; typed accessors parse it on demand and
/// report a [`crate::DxfError::Parse`] carrying the code and line.
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The group code
    pub code: i32,
    /// Raw value text, trailing whitespace removed
    pub value: String,
    /// Line number of the value line (1-based)
    pub line: usize,
    /// Scalar domain selected by the code
    pub value_type: GroupCodeValueType,
}

impl DxfCodePair {
    pub fn new(code: i32, value: impl Into<String>, line: usize) -> Self {
        Self {
            code,
            value: value.into(),
            line,
            value_type: GroupCodeValueType::from_code(code),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_string(&self) -> String {
        self.value.clone()
    }

    /// The value cut to `max_len` characters; the flag reports truncation.
    pub fn as_fixed_string(&self, max_len: usize) -> (String, bool) {
        values::parse_fixed_string(&self.value, max_len)
    }

    pub fn as_double(&self) -> Result<f64> {
        values::parse_double(self.code, self.line, &self.value)
    }

    pub fn as_i16(&self) -> Result<i16> {
        values::parse_i16(self.code, self.line, &self.value)
    }

    pub fn as_i32(&self) -> Result<i32> {
        values::parse_i32(self.code, self.line, &self.value)
    }

    pub fn as_i64(&self) -> Result<i64> {
        values::parse_i64(self.code, self.line, &self.value)
    }

    pub fn as_u8(&self) -> Result<u8> {
        values::parse_u8(self.code, self.line, &self.value)
    }

    pub fn as_bool(&self) -> Result<bool> {
        values::parse_bool(self.code, self.line, &self.value)
    }

    pub fn as_handle(&self) -> Result<Handle> {
        values::parse_handle(self.code, self.line, &self.value)
    }

    pub fn as_binary(&self) -> Result<Vec<u8>> {
        values::parse_binary(self.code, self.line, &self.value)
    }

    /// `0 <name>` with the given name.
    pub fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.value.trim() == name
    }

    /// `0 EOF`, or the older spelling `0 ENDFILE`.
    pub fn is_end_of_file(&self) -> bool {
        self.is_marker("EOF") || self.is_marker("ENDFILE")
    }

    /// `0 ENDSEC` or an end-of-file marker.
    pub fn ends_section(&self) -> bool {
        self.is_marker("ENDSEC") || self.is_end_of_file()
    }
}

/// What the next read produced, at the granularity of the file framing.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    Pair(DxfCodePair),
    /// `0 ENDSEC`
    EndOfSection,
    /// `0 EOF` or the physical end of the stream
    Eof,
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair; `None` at the end of the stream.
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>>;

    /// Push a pair back to be returned by the next `read_pair`.
    fn push_back(&mut self, pair: DxfCodePair);

    /// Number of lines consumed so far.
    fn line_number(&self) -> usize;

    /// Name of the underlying file, when there is one.
    fn source_name(&self) -> Option<&str>;

    /// Read the next pair, classifying section and file terminators.
    fn next_item(&mut self) -> Result<StreamItem> {
        match self.read_pair()? {
            None => Ok(StreamItem::Eof),
            Some(pair) if pair.is_marker("ENDSEC") => Ok(StreamItem::EndOfSection),
            Some(pair) if pair.is_end_of_file() => Ok(StreamItem::Eof),
            Some(pair) => Ok(StreamItem::Pair(pair)),
        }
    }

    /// Consume pairs up to (not including) the next `0` code.
    ///
    /// Returns the number of pairs skipped.
    fn skip_to_next_marker(&mut self) -> Result<usize> {
        let mut skipped = 0;
        while let Some(pair) = self.read_pair()? {
            if pair.code == 0 {
                self.push_back(pair);
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DxfError;

    #[test]
    fn test_typed_accessors() {
        let pair = DxfCodePair::new(70, "42", 8);
        assert_eq!(pair.as_i16().unwrap(), 42);
        assert_eq!(pair.value_type, GroupCodeValueType::Int16);

        let pair = DxfCodePair::new(10, "1.5", 2);
        assert_eq!(pair.as_double().unwrap(), 1.5);
    }

    #[test]
    fn test_bad_value_reports_line() {
        let pair = DxfCodePair::new(40, "wide", 17);
        match pair.as_double() {
            Err(DxfError::Parse { code: 40, line: 17, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_marker() {
        assert!(DxfCodePair::new(0, "LINE", 1).is_marker("LINE"));
        assert!(!DxfCodePair::new(8, "LINE", 1).is_marker("LINE"));
        assert!(DxfCodePair::new(0, "ENDFILE", 1).is_end_of_file());
        assert!(DxfCodePair::new(0, "ENDSEC", 1).ends_section());
        assert!(!DxfCodePair::new(1, "EOF", 1).ends_section());
    }
}
