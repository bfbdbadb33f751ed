//! Name-to-codec dispatch for the ENTITIES and OBJECTS sections

use super::object::read_object;
use super::{read_entity, EntityCodec, ReadContext};
use crate::entities::*;
use crate::error::Result;
use crate::io::dxf::reader::DxfStreamReader;
use crate::objects::{Dictionary, ObjectPtr, ObjectType};
use ahash::AHashMap;
use once_cell::sync::Lazy;

type EntityReadFn = fn(&mut dyn DxfStreamReader, &mut ReadContext<'_>) -> Result<EntityType>;
type ObjectReadFn = fn(&mut dyn DxfStreamReader, &mut ReadContext<'_>) -> Result<ObjectType>;

fn read_as<E>(reader: &mut dyn DxfStreamReader, ctx: &mut ReadContext<'_>) -> Result<EntityType>
where
    E: EntityCodec + Into<EntityType>,
{
    read_entity::<E>(reader, ctx).map(Into::into)
}

static ENTITY_READERS: Lazy<AHashMap<&'static str, EntityReadFn>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, EntityReadFn> = AHashMap::new();
    map.insert("LINE", read_as::<Line>);
    map.insert("3DLINE", read_as::<Line3D>);
    map.insert("POINT", read_as::<Point>);
    map.insert("CIRCLE", read_as::<Circle>);
    map.insert("ARC", read_as::<Arc>);
    map.insert("TRACE", read_as::<Trace>);
    map.insert("SOLID", read_as::<Solid>);
    map.insert("3DFACE", read_as::<Face3D>);
    map.insert("SHAPE", read_as::<Shape>);
    map.insert("TEXT", read_as::<Text>);
    map.insert("ATTDEF", read_as::<AttributeDefinition>);
    map.insert("ATTRIB", read_as::<Attribute>);
    map.insert("INSERT", read_as::<Insert>);
    map.insert("POLYLINE", read_as::<Polyline>);
    map.insert("DIMENSION", read_as::<Dimension>);
    map.insert("LWPOLYLINE", read_as::<LwPolyline>);
    map.insert("SPLINE", read_as::<Spline>);
    map.insert("ELLIPSE", read_as::<Ellipse>);
    map.insert("RAY", read_as::<Ray>);
    map.insert("XLINE", read_as::<XLine>);
    map.insert("MTEXT", read_as::<MText>);
    map.insert("LEADER", read_as::<Leader>);
    map.insert("3DSOLID", read_as::<Solid3D>);
    map.insert("BODY", read_as::<Body>);
    map.insert("REGION", read_as::<Region>);
    map.insert("HATCH", read_as::<Hatch>);
    map.insert("IMAGE", read_as::<RasterImage>);
    map.insert("MULTILEADER", read_as::<MultiLeader>);
    map.insert("MLEADER", read_as::<MultiLeader>);
    map.insert("HELIX", read_as::<Helix>);
    map
});

static OBJECT_READERS: Lazy<AHashMap<&'static str, ObjectReadFn>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, ObjectReadFn> = AHashMap::new();
    map.insert("DICTIONARY", |r, ctx| read_object::<Dictionary>(r, ctx).map(ObjectType::Dictionary));
    map.insert("OBJECT_PTR", |r, ctx| read_object::<ObjectPtr>(r, ctx).map(ObjectType::ObjectPtr));
    map
});

/// Whether `name` has an entity codec.
pub fn is_known_entity(name: &str) -> bool {
    ENTITY_READERS.contains_key(name)
}

/// Read the body of the entity called `name`, whose `0` pair has been
/// consumed. Unknown names are skipped up to the next `0` and `Ok(None)`
/// is returned.
pub fn read_entity_named(
    name: &str,
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<Option<EntityType>> {
    match ENTITY_READERS.get(name) {
        Some(read) => read(reader, ctx).map(Some),
        None => {
            let skipped = reader.skip_to_next_marker()?;
            let message = match name {
                "VERTEX" | "SEQEND" => format!("{} outside a POLYLINE or INSERT skipped", name),
                _ => format!("unsupported entity {} skipped ({} pairs)", name, skipped),
            };
            if matches!(name, "VERTEX" | "SEQEND") {
                ctx.warn("read_entity", message);
            } else {
                ctx.not_implemented("read_entity", message);
            }
            Ok(None)
        }
    }
}

/// Read the next supported entity of a section.
///
/// Stops with `Ok(None)` at `ENDSEC`, `EOF` (both pushed back) or the end
/// of the stream.
pub fn read_next_entity(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<Option<EntityType>> {
    while let Some(pair) = reader.read_pair()? {
        ctx.set_line(pair.line);
        if pair.code != 0 {
            ctx.warn(
                "read_entity",
                format!("group code {} outside an entity skipped", pair.code),
            );
            reader.skip_to_next_marker()?;
            continue;
        }
        if pair.ends_section() {
            reader.push_back(pair);
            return Ok(None);
        }
        let name = pair.value.trim().to_string();
        if let Some(entity) = read_entity_named(&name, reader, ctx)? {
            return Ok(Some(entity));
        }
    }
    Ok(None)
}

/// Read the next supported object of the OBJECTS section.
pub fn read_next_object(
    reader: &mut dyn DxfStreamReader,
    ctx: &mut ReadContext<'_>,
) -> Result<Option<ObjectType>> {
    while let Some(pair) = reader.read_pair()? {
        ctx.set_line(pair.line);
        if pair.code != 0 {
            ctx.warn(
                "read_object",
                format!("group code {} outside an object skipped", pair.code),
            );
            reader.skip_to_next_marker()?;
            continue;
        }
        if pair.ends_section() {
            reader.push_back(pair);
            return Ok(None);
        }
        let name = pair.value.trim().to_string();
        match OBJECT_READERS.get(name.as_str()) {
            Some(read) => return read(reader, ctx).map(Some),
            None => {
                let skipped = reader.skip_to_next_marker()?;
                ctx.not_implemented(
                    "read_object",
                    format!("unsupported object {} skipped ({} pairs)", name, skipped),
                );
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::config::DxfConfiguration;
    use crate::io::dxf::reader::DxfTextReader;
    use crate::notification::{NotificationCollection, NotificationType};
    use crate::types::DxfVersion;
    use std::io::Cursor;

    fn read_all(text: &str, version: DxfVersion) -> (Vec<EntityType>, NotificationCollection) {
        let mut reader = DxfTextReader::new(Cursor::new(text.as_bytes().to_vec()));
        let mut sink = NotificationCollection::new();
        let mut entities = Vec::new();
        {
            let mut ctx = ReadContext::new(DxfConfiguration::new(version), &mut sink);
            while let Some(entity) = read_next_entity(&mut reader, &mut ctx).unwrap() {
                entities.push(entity);
            }
        }
        (entities, sink)
    }

    #[test]
    fn test_every_kind_is_registered() {
        for kind in EntityKind::ALL {
            if *kind == EntityKind::Donut {
                assert!(!is_known_entity(kind.name()));
            } else {
                assert!(is_known_entity(kind.name()), "{}", kind.name());
            }
        }
        assert!(is_known_entity("MLEADER"));
    }

    #[test]
    fn test_unknown_entity_is_skipped() {
        let text = "  0\nWIPEOUT\n  8\n0\n 10\n1.0\n  0\nPOINT\n 10\n2.0\n 20\n3.0\n 30\n0.0\n  0\nENDSEC\n";
        let (entities, diagnostics) = read_all(text, DxfVersion::R2000);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind(), EntityKind::Point);
        assert!(diagnostics.has_type(NotificationType::NotImplemented));
        assert!(diagnostics.contains("unsupported entity WIPEOUT skipped (2 pairs)"));
    }

    #[test]
    fn test_orphan_vertex_is_skipped() {
        let text = "  0\nVERTEX\n 10\n1.0\n  0\nSEQEND\n  0\nLINE\n 10\n0.0\n 11\n1.0\n";
        let (entities, diagnostics) = read_all(text, DxfVersion::R12);
        assert_eq!(entities.len(), 1);
        assert!(diagnostics.contains("VERTEX outside a POLYLINE or INSERT skipped"));
        assert!(diagnostics.contains("SEQEND outside a POLYLINE or INSERT skipped"));
    }

    #[test]
    fn test_mleader_alias() {
        let text = "  0\nMLEADER\n100\nAcDbEntity\n  8\n0\n100\nAcDbMLeader\n270\n2\n  0\nEOF\n";
        let (entities, _) = read_all(text, DxfVersion::R2007);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name(), "MULTILEADER");
    }

    #[test]
    fn test_objects() {
        let text = "  0\nDICTIONARY\n  5\nc\n100\nAcDbDictionary\n  3\nA\n350\nd\n  0\nLAYOUT\n  5\n1a\n  0\nOBJECT_PTR\n  5\n1b\n  0\nENDSEC\n";
        let mut reader = DxfTextReader::new(Cursor::new(text.as_bytes().to_vec()));
        let mut sink = NotificationCollection::new();
        let mut objects = Vec::new();
        {
            let mut ctx = ReadContext::new(DxfConfiguration::new(DxfVersion::R2000), &mut sink);
            while let Some(object) = read_next_object(&mut reader, &mut ctx).unwrap() {
                objects.push(object);
            }
        }
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name(), "DICTIONARY");
        assert_eq!(objects[1].name(), "OBJECT_PTR");
        assert!(sink.contains("unsupported object LAYOUT skipped"));
    }
}
