use core::any::{Any, TypeId, type_name};
use core::fmt;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;
use serde_json::Value;

use crate::info::{ElementInfo, GenericCell};
use crate::{ConfigError, Optional};
use crate::element::Element;

// -----------------------------------------------------------------------------
// DeclaredType

/// The declared type of a model property.
///
/// Holds the type's identity, its erased (de)serialize functions and, for
/// `Optional<T>` only, the [`ElementInfo`] of `T`.
pub struct DeclaredType {
    type_id: TypeId,
    type_path: &'static str,
    element: Option<ElementInfo>,
    serialize: fn(&dyn Any) -> Option<&dyn erased_serde::Serialize>,
    deserialize: fn(Value) -> Result<Box<dyn Any>, serde_json::Error>,
}

fn serialize_as<T: Serialize + 'static>(value: &dyn Any) -> Option<&dyn erased_serde::Serialize> {
    value
        .downcast_ref::<T>()
        .map(|value| value as &dyn erased_serde::Serialize)
}

fn deserialize_as<T: DeserializeOwned + 'static>(
    value: Value,
) -> Result<Box<dyn Any>, serde_json::Error> {
    serde_json::from_value::<T>(value).map(|value| Box::new(value) as Box<dyn Any>)
}

impl DeclaredType {
    /// Describes a type that is not an `Optional`.
    pub fn plain<T: Serialize + DeserializeOwned + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: type_name::<T>(),
            element: None,
            serialize: serialize_as::<T>,
            deserialize: deserialize_as::<T>,
        }
    }

    /// Describes `Optional<T>`.
    pub fn optional<T: Element>() -> Self {
        Self {
            element: Some(ElementInfo::of::<T>()),
            ..Self::plain::<Optional<T>>()
        }
    }

    /// Replaces the element description.
    ///
    /// Meant for hand-written declared types that need another codec
    /// factory, see [`ElementInfo::with_codec`].
    pub fn with_element(mut self, element: ElementInfo) -> Self {
        self.element = Some(element);
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The element description, `None` unless this is an `Optional<T>`.
    #[inline]
    pub const fn element(&self) -> Option<&ElementInfo> {
        self.element.as_ref()
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.element.is_some()
    }

    /// Like [`element`](Self::element), but a missing element is a
    /// configuration error.
    pub fn resolve_element(&self) -> Result<&ElementInfo, ConfigError> {
        self.element.as_ref().ok_or(ConfigError::UnresolvedElement {
            type_path: self.type_path,
        })
    }

    /// Views `value` as serializable, `None` if it is not of this type.
    #[inline]
    pub fn serialize_value<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn erased_serde::Serialize> {
        (self.serialize)(value)
    }

    /// Deserializes a value of this type through its own `Deserialize`.
    #[inline]
    pub fn deserialize_value(&self, value: Value) -> Result<Box<dyn Any>, serde_json::Error> {
        (self.deserialize)(value)
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclaredType")
            .field("type_path", &self.type_path)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Declared

/// A type usable as a model property.
///
/// Implemented for every [`Element`], for `Optional<T>`, and by
/// `#[derive(Model)]` and `#[derive(Element)]`. Other serde types can opt in
/// with [`impl_declared!`](crate::impl_declared).
pub trait Declared: 'static {
    fn declared_type() -> &'static DeclaredType;
}

impl<T: Element> Declared for Optional<T> {
    fn declared_type() -> &'static DeclaredType {
        static CELL: GenericCell<DeclaredType> = GenericCell::new();
        CELL.get_or_insert::<Self>(DeclaredType::optional::<T>)
    }
}

/// Implements [`Declared`] for non-generic serde types.
///
/// ```
/// use std::collections::BTreeMap;
/// use tri_optional::info::Declared;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Labels(BTreeMap<String, String>);
///
/// tri_optional::impl_declared!(Labels);
///
/// assert!(!Labels::declared_type().is_optional());
/// ```
#[macro_export]
macro_rules! impl_declared {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::info::Declared for $ty {
            fn declared_type() -> &'static $crate::info::DeclaredType {
                static CELL: $crate::info::NonGenericCell<$crate::info::DeclaredType> =
                    $crate::info::NonGenericCell::new();
                CELL.get_or_init($crate::info::DeclaredType::plain::<$ty>)
            }
        }
    )*};
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::Declared;
    use crate::Optional;
    use crate::element::ElementKind;

    #[test]
    fn optional_types_carry_their_element() {
        let declared = <Optional<Option<i32>>>::declared_type();
        let element = declared.resolve_element().unwrap();

        assert_eq!(declared.type_id(), TypeId::of::<Optional<Option<i32>>>());
        assert_eq!(element.type_id(), TypeId::of::<Option<i32>>());
        assert_eq!(element.optional_type_id(), declared.type_id());
        assert_eq!(element.kind(), ElementKind::Integer);
        assert!(element.is_nullable());
    }

    #[test]
    fn plain_types_have_no_element() {
        let declared = <Vec<String>>::declared_type();

        assert!(!declared.is_optional());
        assert!(declared.resolve_element().is_err());
    }

    #[test]
    fn declared_types_are_cached_per_type() {
        assert!(core::ptr::eq(
            <Optional<u8>>::declared_type(),
            <Optional<u8>>::declared_type(),
        ));
        assert!(!core::ptr::eq(
            <Optional<u8>>::declared_type(),
            <Optional<u16>>::declared_type(),
        ));
        assert!(core::ptr::eq(String::declared_type(), String::declared_type()));
    }

    #[test]
    fn erased_functions_check_the_type() {
        let declared = u32::declared_type();

        assert!(declared.serialize_value(&7_u32).is_some());
        assert!(declared.serialize_value(&7_i32).is_none());

        let value = declared.deserialize_value(serde_json::json!(7)).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));
        assert!(declared.deserialize_value(serde_json::json!("x")).is_err());
    }
}
