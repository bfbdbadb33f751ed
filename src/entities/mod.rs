//! Drawable entity types, their shared header, and the owning collection

use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{write_entity, EntityCodec};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::writer::DxfStreamWriter;
use crate::types::{Color, DxfVersion, Handle, LineWeight, Transparency, Vector3};
use crate::xdata::ExtendedData;

/// Implements [`Entity`] for a kind that keeps its header in `self.common`.
macro_rules! impl_entity {
    ($ty:ty) => {
        impl $crate::entities::Entity for $ty {
            fn common(&self) -> &$crate::entities::EntityCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::entities::EntityCommon {
                &mut self.common
            }

            fn entity_type(&self) -> &'static str {
                <$ty as $crate::io::dxf::codec::EntityCodec>::NAME
            }
        }
    };
}

pub mod arc;
pub mod attribute_definition;
pub mod attribute_entity;
pub mod circle;
pub mod dimension;
pub mod donut;
pub mod ellipse;
pub mod face3d;
pub mod hatch;
pub mod helix;
pub mod insert;
pub mod leader;
pub mod line;
pub mod lwpolyline;
pub mod mtext;
pub mod multileader;
pub mod point;
pub mod polyline;
pub mod raster_image;
pub mod ray;
pub mod seqend;
pub mod shape;
pub mod solid;
pub mod solid3d;
pub mod spline;
pub mod text;
pub mod xline;

pub use arc::Arc;
pub use attribute_definition::{AttributeDefinition, AttributeFlags};
pub use attribute_entity::Attribute;
pub use circle::Circle;
pub use dimension::{Dimension, DimensionType};
pub use donut::Donut;
pub use ellipse::Ellipse;
pub use face3d::{Face3D, InvisibleEdgeFlags};
pub use hatch::{
    BoundaryEdge, BoundaryPath, BoundaryPathFlags, BoundaryVertex, Hatch, HatchPatternLine,
    HatchPatternType,
};
pub use helix::Helix;
pub use insert::Insert;
pub use leader::{HooklineDirection, Leader, LeaderCreationType, LeaderPathType};
pub use line::{Line, Line3D};
pub use lwpolyline::{LwPolyline, LwPolylineFlags, LwVertex};
pub use mtext::MText;
pub use multileader::{MultiLeader, MultiLeaderContentType, MultiLeaderLineType};
pub use point::Point;
pub use polyline::{Polyline, PolylineFlags, Vertex, VertexFlags};
pub use raster_image::{ClipBoundaryType, ImageDisplayFlags, RasterImage};
pub use ray::Ray;
pub use seqend::SeqEnd;
pub use shape::Shape;
pub use solid::{Solid, Trace};
pub use solid3d::{Body, ModelerGeometry, Region, Solid3D, MODELER_FORMAT_VERSION};
pub use spline::{Spline, SplineCurve, SplineFlags};
pub use text::{Text, TextData, TextHorizontalAlignment, TextVerticalAlignment};
pub use xline::XLine;

/// Uniform access to the shared header of any entity.
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Entity name as written after `0`.
    fn entity_type(&self) -> &'static str;

    fn handle(&self) -> Option<Handle> {
        self.common().handle
    }

    fn set_handle(&mut self, handle: Option<Handle>) {
        self.common_mut().handle = handle;
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn set_layer(&mut self, layer: String) {
        self.common_mut().layer = layer;
    }

    fn color(&self) -> Color {
        self.common().color
    }

    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    fn is_invisible(&self) -> bool {
        self.common().invisible
    }

    fn set_invisible(&mut self, invisible: bool) {
        self.common_mut().invisible = invisible;
    }
}

/// Shadow behaviour on code `284`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ShadowMode {
    #[default]
    CastsAndReceives = 0,
    Casts = 1,
    Receives = 2,
    Ignores = 3,
}

impl ShadowMode {
    pub fn from_value(value: i16) -> Result<Self> {
        match value {
            0 => Ok(ShadowMode::CastsAndReceives),
            1 => Ok(ShadowMode::Casts),
            2 => Ok(ShadowMode::Receives),
            3 => Ok(ShadowMode::Ignores),
            v => Err(DxfError::range("shadow_mode", v as i64, 0, 3)),
        }
    }
}

/// Header tags shared by every drawable entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Handle on code `5`; `None` omits it on write
    pub handle: Option<Handle>,
    /// Linetype name, `BYLAYER` by default
    pub linetype: String,
    /// Layer name, `"0"` by default
    pub layer: String,
    /// Elevation (`38`), written only under flatland for R11 and earlier
    pub elevation: f64,
    pub thickness: f64,
    pub linetype_scale: f64,
    pub invisible: bool,
    pub color: Color,
    pub paperspace: bool,
    pub extrusion: Vector3,
    /// Soft owner inside `{ACAD_REACTORS`
    pub dictionary_owner_soft: String,
    /// Hard owner inside `{ACAD_XDICTIONARY`
    pub dictionary_owner_hard: String,
    /// Owner block record (`330` outside any group)
    pub owner_handle: String,
    /// Material handle (`347`)
    pub material: String,
    pub line_weight: LineWeight,
    /// Plot style handle (`390`)
    pub plot_style_name: String,
    /// True color (`420`)
    pub color_value: Option<i32>,
    /// Color book name (`430`)
    pub color_name: String,
    pub transparency: Option<Transparency>,
    pub shadow_mode: ShadowMode,
    /// Proxy graphics, written as chained `310` chunks
    pub graphics_data: Vec<u8>,
    pub extended_data: ExtendedData,
}

impl EntityCommon {
    pub fn new() -> Self {
        EntityCommon {
            handle: None,
            linetype: "BYLAYER".to_string(),
            layer: "0".to_string(),
            elevation: 0.0,
            thickness: 0.0,
            linetype_scale: 1.0,
            invisible: false,
            color: Color::BY_LAYER,
            paperspace: false,
            extrusion: Vector3::UNIT_Z,
            dictionary_owner_soft: String::new(),
            dictionary_owner_hard: String::new(),
            owner_handle: String::new(),
            material: String::new(),
            line_weight: LineWeight::ByLayer,
            plot_style_name: String::new(),
            color_value: None,
            color_name: String::new(),
            transparency: None,
            shadow_mode: ShadowMode::default(),
            graphics_data: Vec::new(),
            extended_data: ExtendedData::new(),
        }
    }

    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Visibility as on the wire: 0 visible, 1 invisible.
    pub fn visibility(&self) -> i16 {
        self.invisible as i16
    }

    pub fn set_visibility(&mut self, value: i16) -> Result<&mut Self> {
        self.invisible = flag("visibility", value)?;
        Ok(self)
    }

    /// 0 model space, 1 paper space.
    pub fn paperspace_flag(&self) -> i16 {
        self.paperspace as i16
    }

    pub fn set_paperspace(&mut self, value: i16) -> Result<&mut Self> {
        self.paperspace = flag("paperspace", value)?;
        Ok(self)
    }

    pub fn set_shadow_mode(&mut self, value: i16) -> Result<&mut Self> {
        self.shadow_mode = ShadowMode::from_value(value)?;
        Ok(self)
    }

    /// Thickness must not be negative.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<&mut Self> {
        if thickness < 0.0 || !thickness.is_finite() {
            return Err(DxfError::range_below("thickness", thickness, 0));
        }
        self.thickness = thickness;
        Ok(self)
    }

    /// Linetype scale must not be negative.
    pub fn set_linetype_scale(&mut self, scale: f64) -> Result<&mut Self> {
        if scale < 0.0 || !scale.is_finite() {
            return Err(DxfError::range_below("linetype_scale", scale, 0));
        }
        self.linetype_scale = scale;
        Ok(self)
    }
}

fn flag(field: &'static str, value: i16) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(DxfError::range(field, v as i64, 0, 1)),
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Owning, ordered collection of entities.
///
/// Appending is O(1); traversal visits every element once, in append
/// order. Dropping or clearing the list drops every element it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> EntityList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append and return the new element's index.
    pub fn append(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Detach one element; the rest keep their order.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop every element and return how many were released.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<usize> for EntityList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> FromIterator<T> for EntityList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for EntityList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for EntityList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

macro_rules! entity_types {
    ($($(#[$doc:meta])* $variant:ident($ty:ty)),* $(,)?) => {
        /// Every entity kind the codec reads or writes.
        #[derive(Debug, Clone, PartialEq)]
        pub enum EntityType {
            $($(#[$doc])* $variant($ty)),*
        }

        /// Fieldless tag naming an [`EntityType`] variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EntityKind {
            $($variant),*
        }

        impl EntityKind {
            pub const ALL: &'static [EntityKind] = &[$(EntityKind::$variant),*];

            /// Canonical entity name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(EntityKind::$variant => <$ty as EntityCodec>::NAME),*
                }
            }

            /// First release whose files carry this kind.
            pub fn introduced(&self) -> DxfVersion {
                match self {
                    $(EntityKind::$variant => <$ty as EntityCodec>::INTRODUCED),*
                }
            }
        }

        impl EntityType {
            /// A fresh entity of `kind` with every field at its default.
            pub fn new(kind: EntityKind) -> Self {
                match kind {
                    $(EntityKind::$variant => EntityType::$variant(<$ty>::default())),*
                }
            }

            pub fn kind(&self) -> EntityKind {
                match self {
                    $(EntityType::$variant(_) => EntityKind::$variant),*
                }
            }

            pub fn as_entity(&self) -> &dyn Entity {
                match self {
                    $(EntityType::$variant(e) => e),*
                }
            }

            pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
                match self {
                    $(EntityType::$variant(e) => e),*
                }
            }

            /// Write with the codec of the variant.
            pub fn write(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
                match self {
                    $(EntityType::$variant(e) => write_entity(w, e, config)),*
                }
            }
        }

        $(
            impl From<$ty> for EntityType {
                fn from(entity: $ty) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

entity_types! {
    Line(Line),
    /// Obsolete `3DLINE`, written as `LINE` from R12 on
    Line3D(Line3D),
    Point(Point),
    Circle(Circle),
    Arc(Arc),
    Trace(Trace),
    Solid(Solid),
    Face3D(Face3D),
    Shape(Shape),
    Text(Text),
    AttributeDefinition(AttributeDefinition),
    /// An `ATTRIB` found outside an `INSERT`
    Attribute(Attribute),
    Insert(Insert),
    Polyline(Polyline),
    Dimension(Dimension),
    LwPolyline(LwPolyline),
    Spline(Spline),
    Ellipse(Ellipse),
    Ray(Ray),
    XLine(XLine),
    MText(MText),
    Leader(Leader),
    Solid3D(Solid3D),
    Body(Body),
    Region(Region),
    Hatch(Hatch),
    RasterImage(RasterImage),
    MultiLeader(MultiLeader),
    Helix(Helix),
    /// Write-only; emitted as a closed wide `POLYLINE`
    Donut(Donut),
}

impl EntityType {
    pub fn name(&self) -> &'static str {
        self.as_entity().entity_type()
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_defaults() {
        let common = EntityCommon::new();
        assert_eq!(common.layer, "0");
        assert_eq!(common.linetype, "BYLAYER");
        assert_eq!(common.linetype_scale, 1.0);
        assert_eq!(common.extrusion, Vector3::UNIT_Z);
        assert!(common.color.is_by_layer());
        assert!(common.handle.is_none());
    }

    #[test]
    fn test_bounded_setters() {
        let mut common = EntityCommon::new();
        common.set_visibility(1).unwrap();
        assert_eq!(common.visibility(), 1);

        let before = common.clone();
        assert!(matches!(
            common.set_visibility(2),
            Err(DxfError::Range { field: "visibility", .. })
        ));
        assert!(common.set_paperspace(-1).is_err());
        assert!(common.set_shadow_mode(4).is_err());
        assert!(matches!(
            common.set_thickness(-0.5),
            Err(DxfError::Range { field: "thickness", value: -1, min: 0, .. })
        ));
        assert!(matches!(
            common.set_linetype_scale(f64::NAN),
            Err(DxfError::Range { field: "linetype_scale", .. })
        ));
        assert_eq!(common, before);

        common.set_shadow_mode(3).unwrap().set_paperspace(1).unwrap();
        assert_eq!(common.shadow_mode, ShadowMode::Ignores);
        assert_eq!(common.paperspace_flag(), 1);
    }

    #[test]
    fn test_entity_list_order_and_clear() {
        let mut list = EntityList::new();
        for i in 0..5 {
            assert_eq!(list.append(i), i);
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(list.remove(1), Some(1));
        assert_eq!(list.remove(10), None);
        assert_eq!(list.as_slice(), &[0, 2, 3, 4]);
        assert_eq!(list.clear(), 4);
        assert!(list.is_empty());
    }

    #[test]
    fn test_new_by_kind() {
        for &kind in EntityKind::ALL {
            let entity = EntityType::new(kind);
            assert_eq!(entity.kind(), kind);
            assert_eq!(entity.common().layer, "0");
        }
        assert_eq!(EntityKind::Line3D.name(), "3DLINE");
        assert_eq!(EntityType::new(EntityKind::Face3D).name(), "3DFACE");
    }
}
