//! Drawing: the owning collections a DXF stream decodes into

use crate::entities::{EntityKind, EntityList, EntityType};
use crate::error::Result;
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::DxfReader;
use crate::io::dxf::writer::DxfWriter;
use crate::notification::{NotificationCollection, NotificationType};
use crate::objects::ObjectType;
use crate::types::{DxfVersion, Handle};
use std::path::Path;

/// Entities and objects of one DXF stream, in file order.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// Declared (`$ACADVER`) or configured version.
    pub version: DxfVersion,
    /// `$DWGCODEPAGE` as read, if the header had one.
    pub code_page: Option<String>,
    pub entities: EntityList<EntityType>,
    pub objects: EntityList<ObjectType>,
    /// Diagnostics raised while reading.
    pub notifications: NotificationCollection,
}

impl Drawing {
    pub fn new(version: DxfVersion) -> Self {
        Drawing {
            version,
            ..Default::default()
        }
    }

    /// Read a DXF file. The configuration's version applies until the
    /// header declares one.
    pub fn read_file<P: AsRef<Path>>(path: P, config: DxfConfiguration) -> Result<Self> {
        DxfReader::from_file(path)?.with_configuration(config).read()
    }

    /// Write this drawing under `config.version` and return the write
    /// diagnostics.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, config: DxfConfiguration) -> Result<NotificationCollection> {
        DxfWriter::new(config).write_to_file(self, path)
    }

    /// Append an entity and return its index.
    pub fn add_entity(&mut self, entity: EntityType) -> usize {
        self.entities.append(entity)
    }

    /// Append an object and return its index.
    pub fn add_object(&mut self, object: ObjectType) -> usize {
        self.objects.append(object)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// First entity carrying `handle`.
    pub fn get_entity(&self, handle: Handle) -> Option<&EntityType> {
        self.entities
            .iter()
            .find(|e| e.common().handle == Some(handle))
    }

    pub fn get_entity_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        self.entities
            .iter_mut()
            .find(|e| e.common().handle == Some(handle))
    }

    /// Entities of one kind, in file order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &EntityType> {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    /// One past the largest handle in use, for assigning fresh handles.
    /// `None` once the handle space is exhausted.
    pub fn next_handle(&self) -> Option<Handle> {
        let entity_max = self.entities.iter().filter_map(|e| e.common().handle);
        let object_max = self.objects.iter().filter_map(|o| o.common().handle);
        let max = entity_max
            .chain(object_max)
            .map(|h| h.value())
            .max()
            .unwrap_or(0);
        max.checked_add(1).map(Handle::new)
    }

    /// Drop every entity and object. Returns how many entities were
    /// released; an already empty drawing is reported as a warning.
    pub fn free_all(&mut self) -> usize {
        if self.entities.is_empty() && self.objects.is_empty() {
            self.notifications.push(
                NotificationType::Warning,
                "free_all",
                "entity list is already empty",
            );
            return 0;
        }
        self.objects.clear();
        self.entities.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line};
    use crate::types::Vector3;

    fn line(handle: u64) -> EntityType {
        let mut line = Line::from_points(Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));
        line.common.handle = Some(Handle::new(handle));
        line.into()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut drawing = Drawing::new(DxfVersion::R12);
        assert_eq!(drawing.add_entity(line(0x10)), 0);
        assert_eq!(drawing.add_entity(Circle::new().into()), 1);
        assert_eq!(drawing.add_entity(line(0x11)), 2);
        let kinds: Vec<_> = drawing.entities.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EntityKind::Line, EntityKind::Circle, EntityKind::Line]);
        assert_eq!(drawing.entities_of(EntityKind::Line).count(), 2);
    }

    #[test]
    fn test_handle_lookup() {
        let mut drawing = Drawing::new(DxfVersion::R12);
        drawing.add_entity(line(0x5a));
        drawing.add_entity(line(0x20));
        assert!(drawing.get_entity(Handle::new(0x5a)).is_some());
        assert!(drawing.get_entity(Handle::new(0x99)).is_none());
        assert_eq!(drawing.next_handle(), Some(Handle::new(0x5b)));
        assert_eq!(Drawing::new(DxfVersion::R12).next_handle(), Some(Handle::new(1)));
    }

    #[test]
    fn test_next_handle_at_the_top_of_the_range() {
        let mut drawing = Drawing::new(DxfVersion::R12);
        let top = Handle::from_hex("FFFFFFFFFFFFFFFF").unwrap();
        drawing.add_entity(line(top.value()));
        assert_eq!(drawing.next_handle(), None);
    }

    #[test]
    fn test_free_all() {
        let mut drawing = Drawing::new(DxfVersion::R12);
        drawing.add_entity(line(1));
        drawing.add_entity(line(2));
        assert_eq!(drawing.free_all(), 2);
        assert!(drawing.entities.is_empty());
        assert!(drawing.notifications.is_empty());

        assert_eq!(drawing.free_all(), 0);
        assert!(drawing.notifications.has_type(NotificationType::Warning));
        assert!(drawing.notifications.contains("already empty"));
    }
}
