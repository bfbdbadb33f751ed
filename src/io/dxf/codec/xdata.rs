//! Extended data read/write

use crate::error::Result;
use crate::io::dxf::group_code::{coordinate_axis, coordinate_group};
use crate::io::dxf::reader::DxfCodePair;
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::Vector3;
use crate::xdata::{ExtendedData, ExtendedDataRecord, XDataValue};

/// Add one XDATA pair. `Ok(false)` when the pair cannot be placed (no
/// `1001` yet, a stray Y/Z coordinate, or a code outside the XDATA range).
pub fn read_xdata_pair(xdata: &mut ExtendedData, pair: &DxfCodePair) -> Result<bool> {
    if pair.code == 1001 {
        xdata.add_record(ExtendedDataRecord::new(pair.value.trim()));
        return Ok(true);
    }
    let Some(record) = xdata.last_record_mut() else {
        return Ok(false);
    };

    // Y and Z of a point continue the preceding value.
    if let (Some(axis @ 1..=2), Some(group)) = (coordinate_axis(pair.code), coordinate_group(pair.code)) {
        let value = pair.as_double()?;
        return Ok(match record.values.last_mut() {
            Some(last) if last.code() == group => match last.point_mut() {
                Some(point) => {
                    point.set_axis(axis, value);
                    true
                }
                None => false,
            },
            _ => false,
        });
    }

    let value = match pair.code {
        1000 => XDataValue::String(pair.as_string()),
        1002 => XDataValue::ControlString(pair.value.trim().to_string()),
        1003 => XDataValue::LayerName(pair.as_string()),
        1004 => XDataValue::BinaryData(pair.as_binary()?),
        1005 => XDataValue::Handle(pair.as_handle()?),
        1010 => XDataValue::Point3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
        1011 => XDataValue::Position3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
        1012 => XDataValue::Displacement3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
        1013 => XDataValue::Direction3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
        1040 => XDataValue::Real(pair.as_double()?),
        1041 => XDataValue::Distance(pair.as_double()?),
        1042 => XDataValue::ScaleFactor(pair.as_double()?),
        1070 => XDataValue::Integer16(pair.as_i16()?),
        1071 => XDataValue::Integer32(pair.as_i32()?),
        _ => return Ok(false),
    };
    record.add_value(value);
    Ok(true)
}

/// Write every record, each introduced by its `1001` application name.
pub fn write_extended_data(w: &mut dyn DxfStreamWriter, xdata: &ExtendedData) -> Result<()> {
    for record in xdata.records() {
        w.write_string(1001, &record.application_name)?;
        for value in &record.values {
            let code = value.code();
            match value {
                XDataValue::String(s) | XDataValue::ControlString(s) | XDataValue::LayerName(s) => {
                    w.write_string(code, s)?
                }
                XDataValue::BinaryData(data) => w.write_binary(code, data)?,
                XDataValue::Handle(h) => w.write_handle(code, *h)?,
                XDataValue::Point3D(p)
                | XDataValue::Position3D(p)
                | XDataValue::Displacement3D(p)
                | XDataValue::Direction3D(p) => w.write_point3d(code, *p)?,
                XDataValue::Real(v) | XDataValue::Distance(v) | XDataValue::ScaleFactor(v) => {
                    w.write_double(code, *v)?
                }
                XDataValue::Integer16(v) => w.write_i16(code, *v)?,
                XDataValue::Integer32(v) => w.write_i32(code, *v)?,
            }
        }
    }
    Ok(())
}
