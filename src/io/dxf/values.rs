//! Parse and format the scalar domains behind each group code
//!
//! Parsing is strict: surrounding whitespace is ignored, anything else that
//! does not match the expected shape is a [`DxfError::Parse`].

use crate::error::{DxfError, Result};
use crate::types::Handle;

/// Longest symbol-table name (layer, linetype, style) kept on read.
pub const MAX_NAME_LENGTH: usize = 255;

/// Longest single text value kept on read.
pub const MAX_STRING_LENGTH: usize = 2049;

/// Bytes carried by one `310` binary chunk line.
pub const BINARY_CHUNK_SIZE: usize = 127;

fn parse_error(code: i32, line: usize, text: &str) -> DxfError {
    DxfError::Parse {
        code,
        line,
        text: text.to_string(),
    }
}

pub fn parse_double(code: i32, line: usize, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(parse_error(code, line, text)),
    }
}

pub fn parse_i16(code: i32, line: usize, text: &str) -> Result<i16> {
    text.trim()
        .parse::<i16>()
        .map_err(|_| parse_error(code, line, text))
}

pub fn parse_i32(code: i32, line: usize, text: &str) -> Result<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| parse_error(code, line, text))
}

pub fn parse_i64(code: i32, line: usize, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| parse_error(code, line, text))
}

/// 8-bit values (280–289). Some writers emit them as signed shorts, so a
/// value in `-128..0` is accepted and reinterpreted.
pub fn parse_u8(code: i32, line: usize, text: &str) -> Result<u8> {
    let v = parse_i16(code, line, text)?;
    match v {
        0..=255 => Ok(v as u8),
        -128..=-1 => Ok(v as i8 as u8),
        _ => Err(parse_error(code, line, text)),
    }
}

/// Boolean flags (290–299): any non-zero integer is true.
pub fn parse_bool(code: i32, line: usize, text: &str) -> Result<bool> {
    parse_i16(code, line, text).map(|v| v != 0)
}

pub fn parse_handle(code: i32, line: usize, text: &str) -> Result<Handle> {
    Handle::from_hex(text).ok_or_else(|| parse_error(code, line, text))
}

/// Hex pairs of a binary chunk (310–319, 1004).
pub fn parse_binary(code: i32, line: usize, text: &str) -> Result<Vec<u8>> {
    let hex = text.trim();
    if hex.len() % 2 != 0 {
        return Err(parse_error(code, line, text));
    }
    let mut out = Vec::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks(2) {
        let digits = std::str::from_utf8(pair).map_err(|_| parse_error(code, line, text))?;
        let byte = u8::from_str_radix(digits, 16).map_err(|_| parse_error(code, line, text))?;
        out.push(byte);
    }
    Ok(out)
}

/// Keep at most `max_len` characters. Returns the kept text and whether
/// anything was cut.
pub fn parse_fixed_string(text: &str, max_len: usize) -> (String, bool) {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => (text[..cut].to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Six fractional digits, as C's `%f`.
pub fn format_double(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn format_handle(handle: Handle) -> String {
    handle.to_hex()
}

/// Uppercase hex pairs.
pub fn format_binary(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push_str(&format!("{:02X}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_double(10, 1, " 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_double(42, 1, "1e-7").unwrap(), 1e-7);
        assert!(parse_double(10, 3, "abc").is_err());
        assert!(parse_double(10, 3, "inf").is_err());
    }

    #[test]
    fn test_parse_error_carries_location() {
        match parse_i16(70, 9, "x1") {
            Err(DxfError::Parse { code, line, text }) => {
                assert_eq!(code, 70);
                assert_eq!(line, 9);
                assert_eq!(text, "x1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_integers_are_strict() {
        assert_eq!(parse_i16(62, 1, "  256").unwrap(), 256);
        assert!(parse_i16(62, 1, "1.0").is_err());
        assert!(parse_i16(62, 1, "70000").is_err());
        assert_eq!(parse_i32(90, 1, "70000").unwrap(), 70000);
        assert_eq!(parse_i64(160, 1, "-5").unwrap(), -5);
    }

    #[test]
    fn test_parse_u8() {
        assert_eq!(parse_u8(280, 1, "3").unwrap(), 3);
        assert_eq!(parse_u8(280, 1, "-1").unwrap(), 255);
        assert!(parse_u8(280, 1, "300").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(290, 1, "1").unwrap());
        assert!(!parse_bool(290, 1, "0").unwrap());
    }

    #[test]
    fn test_handles() {
        assert_eq!(parse_handle(5, 1, "5A").unwrap(), Handle::new(0x5a));
        assert!(parse_handle(5, 1, "zz").is_err());
        assert_eq!(format_handle(Handle::new(0x5a)), "5a");
    }

    #[test]
    fn test_binary() {
        assert_eq!(parse_binary(310, 1, "00FFa0").unwrap(), vec![0x00, 0xff, 0xa0]);
        assert!(parse_binary(310, 1, "ABC").is_err());
        assert!(parse_binary(310, 1, "GG").is_err());
        assert_eq!(format_binary(&[0x0a, 0xff]), "0AFF");
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(0.0), "0.000000");
        assert_eq!(format_double(10.0), "10.000000");
        assert_eq!(format_double(-1.25), "-1.250000");
        assert_eq!(format_double(1e-7), "0.000000");
    }

    #[test]
    fn test_fixed_string() {
        assert_eq!(parse_fixed_string("LAYER", 255), ("LAYER".to_string(), false));
        assert_eq!(parse_fixed_string("abcdef", 3), ("abc".to_string(), true));
        assert_eq!(parse_fixed_string("äöü", 2), ("äö".to_string(), true));
    }
}
