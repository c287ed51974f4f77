use core::any::{Any, TypeId};

use crate::Optional;
use crate::element::Element;

/// Element-independent view of an [`Optional`].
///
/// Lets code holding a `&dyn AnyOptional` ask about presence and reach the
/// stored value without naming the element type.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use tri_optional::{AnyOptional, Optional};
///
/// let value: &dyn AnyOptional = &Optional::non_null(3_u8);
///
/// assert!(value.has_non_null_value());
/// assert_eq!(value.element_type_id(), TypeId::of::<Option<u8>>());
/// assert_eq!(value.value_any().and_then(|v| v.downcast_ref::<Option<u8>>()), Some(&Some(3)));
/// ```
pub trait AnyOptional: Any {
    /// Returns `true` for any present value, null included.
    fn has_value(&self) -> bool;

    /// Returns `true` if present and not null.
    fn has_non_null_value(&self) -> bool;

    /// The [`TypeId`] of the element type `T` of `Optional<T>`.
    fn element_type_id(&self) -> TypeId;

    /// The type path of the element type.
    fn element_type_path(&self) -> &'static str;

    /// The stored value if present and not null.
    fn value_any(&self) -> Option<&dyn Any>;

    fn as_serialize(&self) -> &dyn erased_serde::Serialize;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Element> AnyOptional for Optional<T> {
    #[inline]
    fn has_value(&self) -> bool {
        Optional::has_value(self)
    }

    #[inline]
    fn has_non_null_value(&self) -> bool {
        Optional::has_non_null_value(self)
    }

    #[inline]
    fn element_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    #[inline]
    fn element_type_path(&self) -> &'static str {
        T::type_path()
    }

    fn value_any(&self) -> Option<&dyn Any> {
        match self {
            Optional::Present(value) if !value.is_null() => Some(value as &dyn Any),
            _ => None,
        }
    }

    #[inline]
    fn as_serialize(&self) -> &dyn erased_serde::Serialize {
        self
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AnyOptional;
    use crate::Optional;

    #[test]
    fn erased_queries_match_typed_ones() {
        let values: [&dyn AnyOptional; 3] = [
            &Optional::<Option<i32>>::unspecified(),
            &Optional::<Option<i32>>::null(),
            &Optional::non_null(9_i32),
        ];

        let flags: Vec<_> = values
            .iter()
            .map(|v| (v.has_value(), v.has_non_null_value(), v.value_any().is_some()))
            .collect();

        assert_eq!(
            flags,
            [(false, false, false), (true, false, false), (true, true, true)],
        );
        assert!(values[2].as_any().is::<Optional<Option<i32>>>());
    }

    #[test]
    fn erased_serialize_writes_the_value() {
        let value: &dyn AnyOptional = &Optional::present("x".to_owned());
        let json = serde_json::to_string(value.as_serialize()).unwrap();

        assert_eq!(json, "\"x\"");
        assert!(value.element_type_path().ends_with("String"));
    }
}
