//! # dxf-codec
//!
//! A pure Rust library for reading and writing the entities of DXF drawing
//! files, from Release 10 through AutoCAD 2010.
//!
//! ## Features
//!
//! - Line-pair ASCII reader and writer with code-page aware text decoding
//! - Codecs for 30 entity kinds, from LINE and POLYLINE to HATCH and MULTILEADER
//! - Version-gated emission: the same entity writes the right tags for R10..R2010
//! - Extended data (XDATA) on every entity and object
//! - Recoverable diagnostics collected per read instead of aborting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_codec::{Drawing, DxfConfiguration, DxfVersion};
//!
//! let drawing = Drawing::read_file("sample.dxf", DxfConfiguration::default())?;
//! for entity in &drawing.entities {
//!     println!("{} on layer {}", entity.name(), entity.common().layer);
//! }
//! for warning in &drawing.notifications {
//!     eprintln!("{}", warning);
//! }
//!
//! drawing.write_file("out.dxf", DxfConfiguration::new(DxfVersion::R14))?;
//! # Ok::<(), dxf_codec::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf::DxfStreamReader`] / [`io::dxf::DxfStreamWriter`] - tag pair streams
//! - [`io::dxf::codec::EntityCodec`] - per-kind read/write schema
//! - [`EntityType`] - tagged variant over every supported kind
//! - [`Drawing`] - owning entity and object lists

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod drawing;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod objects;
pub mod types;
pub mod xdata;

pub use error::{DxfError, Result};
pub use types::{Color, DxfVersion, Handle, LineWeight, Transparency, Vector2, Vector3};

pub use entities::{
    Arc, Circle, Ellipse, Entity, EntityCommon, EntityKind, EntityList, EntityType, Insert, Line,
    LwPolyline, MText, Point, Polyline, Spline, Text,
};

pub use drawing::Drawing;
pub use notification::{DiagnosticSink, Notification, NotificationCollection, NotificationType};

pub use io::dxf::{DxfConfiguration, DxfReader, DxfWriter, InvalidEntityPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_drawing_creation() {
        let drawing = Drawing::new(DxfVersion::R14);
        assert_eq!(drawing.version, DxfVersion::R14);
        assert!(drawing.entities.is_empty());
        assert_eq!(Drawing::default().version, DxfVersion::R12);
    }
}
