use core::any::Any;
use core::marker::PhantomData;

use serde_json::Value;

use crate::Optional;
use crate::element::Element;
use crate::info::ElementInfo;
use crate::serde::decode_optional;

// -----------------------------------------------------------------------------
// OptionalCodec

/// Encodes and decodes `Optional<T>` for one element type `T`, behind `&dyn`.
///
/// Codecs are stateless apart from their [`ElementInfo`], so a single
/// instance per element type is shared by every thread; see
/// [`CodecCache`](super::CodecCache).
pub trait OptionalCodec: Send + Sync + 'static {
    /// The element type this codec handles.
    fn element(&self) -> &ElementInfo;

    /// Returns `true` if `target` is an `Optional<T>` holding a value.
    ///
    /// A present null counts as holding a value.
    fn can_convert(&self, target: &dyn Any) -> bool;

    /// The emission predicate: `true` only for an `Optional<T>` holding a
    /// non-null value.
    fn should_serialize(&self, value: &dyn Any) -> bool;

    /// Views an `Optional<T>` as serializable, `None` for any other type.
    fn encode<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn erased_serde::Serialize>;

    /// Decodes a boxed `Optional<T>` from a raw JSON value.
    ///
    /// `depth` is the nesting depth of `value` in its document, 0 at the
    /// root. See [`decode_optional`] for how it is used.
    fn decode(&self, value: Value, depth: usize) -> Result<Box<dyn Any>, serde_json::Error>;
}

// -----------------------------------------------------------------------------
// TypedCodec

/// The [`OptionalCodec`] of `Optional<T>`.
pub struct TypedCodec<T> {
    element: ElementInfo,
    marker: PhantomData<fn() -> T>,
}

impl<T: Element> TypedCodec<T> {
    pub fn new() -> Self {
        Self {
            element: ElementInfo::of::<T>(),
            marker: PhantomData,
        }
    }

    /// The default codec factory of [`ElementInfo::of`].
    pub fn boxed() -> Box<dyn OptionalCodec> {
        Box::new(Self::new())
    }
}

impl<T: Element> OptionalCodec for TypedCodec<T> {
    #[inline]
    fn element(&self) -> &ElementInfo {
        &self.element
    }

    fn can_convert(&self, target: &dyn Any) -> bool {
        target
            .downcast_ref::<Optional<T>>()
            .is_some_and(Optional::has_value)
    }

    fn should_serialize(&self, value: &dyn Any) -> bool {
        value
            .downcast_ref::<Optional<T>>()
            .is_some_and(Optional::has_non_null_value)
    }

    fn encode<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn erased_serde::Serialize> {
        value
            .downcast_ref::<Optional<T>>()
            .map(|value| value as &dyn erased_serde::Serialize)
    }

    fn decode(&self, value: Value, depth: usize) -> Result<Box<dyn Any>, serde_json::Error> {
        let decoded = decode_optional::<T>(value, depth)?;
        Ok(Box::new(decoded))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::Any;

    use serde_json::json;

    use super::{OptionalCodec, TypedCodec};
    use crate::Optional;

    #[test]
    fn can_convert_needs_a_value() {
        let codec = TypedCodec::<Option<String>>::new();

        assert!(codec.can_convert(&Optional::<Option<String>>::null()));
        assert!(codec.can_convert(&Optional::non_null("a".to_owned())));
        assert!(!codec.can_convert(&Optional::<Option<String>>::unspecified()));
        assert!(!codec.can_convert(&Optional::present("a".to_owned())));
        assert!(!codec.can_convert(&3_i32));
    }

    #[test]
    fn should_serialize_needs_a_non_null_value() {
        let codec = TypedCodec::<Option<i32>>::new();

        assert!(codec.should_serialize(&Optional::non_null(0)));
        assert!(!codec.should_serialize(&Optional::<Option<i32>>::null()));
        assert!(!codec.should_serialize(&Optional::<Option<i32>>::unspecified()));
        assert!(!codec.should_serialize(&Optional::present(1_i64)));
    }

    #[test]
    fn encode_and_decode_are_erased() {
        let codec = TypedCodec::<u16>::new();
        let value = Optional::present(12_u16);

        let json = serde_json::to_string(codec.encode(&value).unwrap()).unwrap();
        assert_eq!(json, "12");
        assert!(codec.encode(&12_u16).is_none());

        let decoded: Box<dyn Any> = codec.decode(json!("13"), 1).unwrap();
        assert_eq!(decoded.downcast_ref::<Optional<u16>>(), Some(&Optional::present(13)));
    }
}
