//! I/O module for reading and writing DXF streams

pub mod dxf;

pub use dxf::{DxfConfiguration, DxfReader, DxfWriter};
