//! DXF (Drawing Exchange Format) reading and writing

pub mod code_page;
pub mod codec;
pub mod config;
pub mod group_code;
pub mod reader;
pub mod values;
pub mod writer;

pub use config::DxfConfiguration;
pub use group_code::GroupCodeValueType;
pub use reader::{DxfCodePair, DxfReader, DxfStreamReader, DxfTextReader, StreamItem};
pub use writer::{
    DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter, DxfWriter, InvalidEntityPolicy, PairBuffer,
};
