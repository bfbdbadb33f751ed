//! Extended data (XDATA)
//!
//! Application-specific data attached to an entity or object, stored on
//! group codes 1000–1071 after a `1001` application name.

use crate::types::{Handle, Vector3};

/// One XDATA value.
#[derive(Debug, Clone, PartialEq)]
pub enum XDataValue {
    /// 1000
    String(String),
    /// 1002, `{` or `}`
    ControlString(String),
    /// 1003
    LayerName(String),
    /// 1004
    BinaryData(Vec<u8>),
    /// 1005
    Handle(Handle),
    /// 1010/1020/1030
    Point3D(Vector3),
    /// 1011/1021/1031
    Position3D(Vector3),
    /// 1012/1022/1032
    Displacement3D(Vector3),
    /// 1013/1023/1033
    Direction3D(Vector3),
    /// 1040
    Real(f64),
    /// 1041
    Distance(f64),
    /// 1042
    ScaleFactor(f64),
    /// 1070
    Integer16(i16),
    /// 1071
    Integer32(i32),
}

impl XDataValue {
    /// Group code of the value (the X code for points).
    pub fn code(&self) -> i32 {
        match self {
            XDataValue::String(_) => 1000,
            XDataValue::ControlString(_) => 1002,
            XDataValue::LayerName(_) => 1003,
            XDataValue::BinaryData(_) => 1004,
            XDataValue::Handle(_) => 1005,
            XDataValue::Point3D(_) => 1010,
            XDataValue::Position3D(_) => 1011,
            XDataValue::Displacement3D(_) => 1012,
            XDataValue::Direction3D(_) => 1013,
            XDataValue::Real(_) => 1040,
            XDataValue::Distance(_) => 1041,
            XDataValue::ScaleFactor(_) => 1042,
            XDataValue::Integer16(_) => 1070,
            XDataValue::Integer32(_) => 1071,
        }
    }

    /// Mutable access to the point of a point-valued entry.
    pub(crate) fn point_mut(&mut self) -> Option<&mut Vector3> {
        match self {
            XDataValue::Point3D(p)
            | XDataValue::Position3D(p)
            | XDataValue::Displacement3D(p)
            | XDataValue::Direction3D(p) => Some(p),
            _ => None,
        }
    }
}

/// XDATA attached for one registered application.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedDataRecord {
    /// Registered application name (1001)
    pub application_name: String,
    pub values: Vec<XDataValue>,
}

impl ExtendedDataRecord {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            values: Vec::new(),
        }
    }

    pub fn add_value(&mut self, value: XDataValue) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All XDATA records of one entity or object, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedData {
    records: Vec<ExtendedDataRecord>,
}

impl ExtendedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: ExtendedDataRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExtendedDataRecord] {
        &self.records
    }

    /// The record being filled while reading.
    pub(crate) fn last_record_mut(&mut self) -> Option<&mut ExtendedDataRecord> {
        self.records.last_mut()
    }

    pub fn get_record(&self, application_name: &str) -> Option<&ExtendedDataRecord> {
        self.records
            .iter()
            .find(|r| r.application_name.eq_ignore_ascii_case(application_name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lookup_ignores_case() {
        let mut xdata = ExtendedData::new();
        let mut record = ExtendedDataRecord::new("ACAD");
        record.add_value(XDataValue::Real(2.5));
        xdata.add_record(record);

        assert_eq!(xdata.len(), 1);
        assert!(xdata.get_record("acad").is_some());
        assert!(xdata.get_record("OTHER").is_none());
    }

    #[test]
    fn test_value_codes() {
        assert_eq!(XDataValue::String("x".into()).code(), 1000);
        assert_eq!(XDataValue::Direction3D(Vector3::UNIT_Z).code(), 1013);
        assert_eq!(XDataValue::Integer32(1).code(), 1071);
    }
}
