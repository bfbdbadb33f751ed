//! Shared test utilities for dxf-codec integration tests.
//!
//! Emit/parse helpers over in-memory streams and small entity builders,
//! imported by every test crate via `mod common;`.

#![allow(dead_code)]

use dxf_codec::entities::{Circle, EntityType, Line, Point};
use dxf_codec::io::dxf::codec::dispatch::read_next_entity;
use dxf_codec::io::dxf::codec::ReadContext;
use dxf_codec::io::dxf::{DxfTextReader, DxfTextWriter};
use dxf_codec::{Drawing, DxfConfiguration, DxfReader, DxfVersion, Handle, NotificationCollection, Vector3};
use std::io::Cursor;

/// Versions exercised by round-trip tests, oldest first.
pub const VERSIONS: [DxfVersion; 9] = DxfVersion::ALL;

/// Emit one entity with no section framing.
pub fn emit(entity: &EntityType, version: DxfVersion) -> String {
    let mut w = DxfTextWriter::new(Vec::new());
    entity
        .write(&mut w, &DxfConfiguration::new(version))
        .expect("entity should be writable");
    String::from_utf8(w.into_inner()).expect("output is UTF-8")
}

/// Decode every entity of a bare entity stream.
pub fn parse_entities(text: &str, version: DxfVersion) -> (Vec<EntityType>, NotificationCollection) {
    let mut reader = DxfTextReader::new(Cursor::new(text.as_bytes().to_vec()));
    let mut sink = NotificationCollection::new();
    let mut entities = Vec::new();
    {
        let mut ctx = ReadContext::new(DxfConfiguration::new(version), &mut sink);
        while let Some(entity) = read_next_entity(&mut reader, &mut ctx).expect("stream should decode") {
            entities.push(entity);
        }
    }
    (entities, sink)
}

/// Emit then parse one entity.
pub fn round_trip(entity: &EntityType, version: DxfVersion) -> EntityType {
    let (mut entities, diagnostics) = parse_entities(&emit(entity, version), version);
    assert_eq!(entities.len(), 1, "diagnostics: {:?}", diagnostics);
    entities.remove(0)
}

/// Read a complete DXF text.
pub fn read_drawing(text: &str) -> Drawing {
    DxfReader::from_reader(Cursor::new(text.as_bytes().to_vec()))
        .read()
        .expect("drawing should decode")
}

pub fn line(handle: u64, start: Vector3, end: Vector3) -> EntityType {
    let mut line = Line::from_points(start, end);
    line.common.handle = Some(Handle::new(handle));
    line.into()
}

pub fn circle(center: Vector3, radius: f64) -> EntityType {
    Circle::from_center_radius(center, radius).into()
}

pub fn point(location: Vector3) -> EntityType {
    Point::at(location).into()
}
