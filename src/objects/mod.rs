//! Non-graphical objects (OBJECTS section)

use crate::error::Result;
use crate::io::dxf::codec::object::{write_object, Object, ObjectCommon};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::writer::DxfStreamWriter;

/// Implements [`Object`] for a kind that keeps its header in `self.common`.
macro_rules! impl_object {
    ($ty:ty) => {
        impl $crate::io::dxf::codec::object::Object for $ty {
            fn common(&self) -> &$crate::io::dxf::codec::object::ObjectCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::io::dxf::codec::object::ObjectCommon {
                &mut self.common
            }

            fn object_type(&self) -> &'static str {
                <$ty as $crate::io::dxf::codec::object::ObjectCodec>::NAME
            }
        }
    };
}

pub mod dictionary;
pub mod object_ptr;

pub use dictionary::{Dictionary, DictionaryEntry};
pub use object_ptr::ObjectPtr;

/// Every object kind the codec reads or writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectType {
    Dictionary(Dictionary),
    ObjectPtr(ObjectPtr),
}

impl ObjectType {
    pub fn as_object(&self) -> &dyn Object {
        match self {
            ObjectType::Dictionary(o) => o,
            ObjectType::ObjectPtr(o) => o,
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_object().object_type()
    }

    pub fn common(&self) -> &ObjectCommon {
        self.as_object().common()
    }

    pub fn write(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        match self {
            ObjectType::Dictionary(o) => write_object(w, o, config),
            ObjectType::ObjectPtr(o) => write_object(w, o, config),
        }
    }
}

impl From<Dictionary> for ObjectType {
    fn from(object: Dictionary) -> Self {
        ObjectType::Dictionary(object)
    }
}

impl From<ObjectPtr> for ObjectType {
    fn from(object: ObjectPtr) -> Self {
        ObjectType::ObjectPtr(object)
    }
}
