//! Group code ranges
//!
//! The numeric code of a tag pair selects the scalar domain of its value.

/// Scalar domain of a group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Free text (0–9, 100–102, 300–309, 410–419, 430–439, 470–479, 1000–1003)
    String,
    /// 64-bit float (10–59, 110–149, 210–239, 460–469, 1010–1059)
    Double,
    /// 16-bit integer (60–79, 170–179, 270–279, 370–389, 400–409, 1060–1070)
    Int16,
    /// 32-bit integer (90–99, 420–429, 440–459, 1071)
    Int32,
    /// 64-bit integer (160–169)
    Int64,
    /// 8-bit integer (280–289)
    Byte,
    /// Boolean flag (290–299)
    Bool,
    /// Hex handle text (5, 105, 320–369, 390–399, 480–481, 1005)
    Handle,
    /// Hex-encoded binary chunk (310–319, 1004)
    Binary,
    /// `999` comment
    Comment,
    /// Code outside every documented range
    Unknown,
}

impl GroupCodeValueType {
    pub fn from_code(code: i32) -> Self {
        use GroupCodeValueType::*;
        match code {
            5 | 105 => Handle,
            0..=9 => String,
            10..=59 => Double,
            60..=79 => Int16,
            90..=99 => Int32,
            100..=102 => String,
            110..=149 => Double,
            160..=169 => Int64,
            170..=179 => Int16,
            210..=239 => Double,
            270..=279 => Int16,
            280..=289 => Byte,
            290..=299 => Bool,
            300..=309 => String,
            310..=319 => Binary,
            320..=369 => Handle,
            370..=389 => Int16,
            390..=399 => Handle,
            400..=409 => Int16,
            410..=419 => String,
            420..=429 => Int32,
            430..=439 => String,
            440..=459 => Int32,
            460..=469 => Double,
            470..=479 => String,
            480..=481 => Handle,
            999 => Comment,
            1000..=1003 => String,
            1004 => Binary,
            1005 => Handle,
            1010..=1059 => Double,
            1060..=1070 => Int16,
            1071 => Int32,
            _ => Unknown,
        }
    }

    /// Whether values of this domain are numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            GroupCodeValueType::Double
                | GroupCodeValueType::Int16
                | GroupCodeValueType::Int32
                | GroupCodeValueType::Int64
                | GroupCodeValueType::Byte
                | GroupCodeValueType::Bool
        )
    }
}

/// Axis (0 = X, 1 = Y, 2 = Z) of a coordinate code, if it is one.
///
/// Coordinates come in triples `n`, `n + 10`, `n + 20` within the 10–39,
/// 210–239 and 1010–1039 blocks.
pub fn coordinate_axis(code: i32) -> Option<usize> {
    let base = match code {
        10..=39 => code - 10,
        210..=239 => code - 210,
        1010..=1039 => code - 1010,
        _ => return None,
    };
    Some((base / 10) as usize)
}

/// The X code of the triple a coordinate code belongs to.
pub fn coordinate_group(code: i32) -> Option<i32> {
    coordinate_axis(code).map(|axis| code - 10 * axis as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(GroupCodeValueType::from_code(0), GroupCodeValueType::String);
        assert_eq!(GroupCodeValueType::from_code(5), GroupCodeValueType::Handle);
        assert_eq!(GroupCodeValueType::from_code(10), GroupCodeValueType::Double);
        assert_eq!(GroupCodeValueType::from_code(62), GroupCodeValueType::Int16);
        assert_eq!(GroupCodeValueType::from_code(92), GroupCodeValueType::Int32);
        assert_eq!(GroupCodeValueType::from_code(160), GroupCodeValueType::Int64);
        assert_eq!(GroupCodeValueType::from_code(284), GroupCodeValueType::Byte);
        assert_eq!(GroupCodeValueType::from_code(290), GroupCodeValueType::Bool);
        assert_eq!(GroupCodeValueType::from_code(310), GroupCodeValueType::Binary);
        assert_eq!(GroupCodeValueType::from_code(330), GroupCodeValueType::Handle);
        assert_eq!(GroupCodeValueType::from_code(370), GroupCodeValueType::Int16);
        assert_eq!(GroupCodeValueType::from_code(420), GroupCodeValueType::Int32);
        assert_eq!(GroupCodeValueType::from_code(999), GroupCodeValueType::Comment);
        assert_eq!(GroupCodeValueType::from_code(1071), GroupCodeValueType::Int32);
        assert_eq!(GroupCodeValueType::from_code(80), GroupCodeValueType::Unknown);
    }

    #[test]
    fn test_coordinate_axis() {
        assert_eq!(coordinate_axis(10), Some(0));
        assert_eq!(coordinate_axis(21), Some(1));
        assert_eq!(coordinate_axis(33), Some(2));
        assert_eq!(coordinate_axis(230), Some(2));
        assert_eq!(coordinate_axis(1020), Some(1));
        assert_eq!(coordinate_axis(40), None);
        assert_eq!(coordinate_group(31), Some(11));
        assert_eq!(coordinate_group(1033), Some(1013));
    }
}
