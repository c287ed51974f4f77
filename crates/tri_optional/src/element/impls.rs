use core::cmp::Ordering;
use core::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::CoerceError;
use crate::element::{Bytes, Element, ElementKind, coerce, fmt_json};
use crate::info::{Declared, DeclaredType, GenericCell};

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Element for $ty {
            type Inner = Self;
            const KIND: ElementKind = ElementKind::Integer;

            #[inline(always)]
            fn from_inner(inner: Self) -> Self {
                inner
            }

            #[inline]
            fn cmp_integer(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }

            fn coerce(value: &Value) -> Result<Self, CoerceError> {
                coerce::integer(value)
            }

            fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        crate::impl_declared!($ty);
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident, $coerce:expr) => {
        impl Element for $ty {
            type Inner = Self;
            const KIND: ElementKind = ElementKind::$kind;

            #[inline(always)]
            fn from_inner(inner: Self) -> Self {
                inner
            }

            fn coerce(value: &Value) -> Result<Self, CoerceError> {
                $coerce(value)
            }

            fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        crate::impl_declared!($ty);
    };
}

impl_scalar!(f64, Float, coerce::float::<f64>);
impl_scalar!(f32, Float, float32);
impl_scalar!(bool, Bool, coerce::boolean);
impl_scalar!(char, Char, coerce::character);
impl_scalar!(String, String, coerce::string);
impl_scalar!(Uuid, Uuid, coerce::uuid);

fn float32(value: &Value) -> Result<f32, CoerceError> {
    coerce::float::<f32>(value).map(|v| v as f32)
}

impl Element for Bytes {
    type Inner = Self;
    const KIND: ElementKind = ElementKind::Bytes;

    #[inline(always)]
    fn from_inner(inner: Self) -> Self {
        inner
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        coerce::bytes(value)
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

crate::impl_declared!(Bytes);

// -----------------------------------------------------------------------------
// Generic elements

impl<T: Element> Element for Vec<T> {
    type Inner = Self;
    const KIND: ElementKind = ElementKind::Composite;

    #[inline(always)]
    fn from_inner(inner: Self) -> Self {
        inner
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        coerce::composite(value)
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_json(self, f)
    }
}

impl<T: Element> Declared for Vec<T> {
    fn declared_type() -> &'static DeclaredType {
        static CELL: GenericCell<DeclaredType> = GenericCell::new();
        CELL.get_or_insert::<Self>(DeclaredType::plain::<Self>)
    }
}

/// The nullable element: `None` is its null.
impl<T: Element> Element for Option<T> {
    type Inner = T;
    const KIND: ElementKind = T::KIND;
    const NULLABLE: bool = true;

    #[inline(always)]
    fn from_inner(inner: T) -> Self {
        Some(inner)
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(None),
            _ => T::coerce(value).map(Some),
        }
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.fmt_value(f),
            None => f.write_str("null"),
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn null() -> Option<Self> {
        Some(None)
    }

    #[inline]
    fn cmp_integer(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Some(lhs), Some(rhs)) => lhs.cmp_integer(rhs),
            _ => None,
        }
    }
}

impl<T: Element> Declared for Option<T> {
    fn declared_type() -> &'static DeclaredType {
        static CELL: GenericCell<DeclaredType> = GenericCell::new();
        CELL.get_or_insert::<Self>(DeclaredType::plain::<Self>)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use serde_json::json;

    use crate::element::{Bytes, Element, ElementKind};

    #[test]
    fn kinds_and_nullability() {
        assert_eq!(i64::KIND, ElementKind::Integer);
        assert_eq!(<Option<i64>>::KIND, ElementKind::Integer);
        assert_eq!(<Vec<u8>>::KIND, ElementKind::Composite);
        assert_eq!(Bytes::KIND, ElementKind::Bytes);

        assert!(!i64::NULLABLE);
        assert!(<Option<i64>>::NULLABLE);
        assert_eq!(<Option<String>>::null(), Some(None));
        assert_eq!(String::null(), None);
    }

    #[test]
    fn nullable_coerce_keeps_null() {
        assert_eq!(<Option<u8>>::coerce(&json!(null)).unwrap(), None);
        assert_eq!(<Option<u8>>::coerce(&json!("4")).unwrap(), Some(4));
        assert!(u8::coerce(&json!(null)).is_err());
    }

    #[test]
    fn integers_compare_over_their_full_range() {
        assert_eq!(u128::MAX.cmp_integer(&1), Some(Ordering::Greater));
        assert_eq!(i128::MIN.cmp_integer(&i128::MAX), Some(Ordering::Less));
        assert_eq!(Some(-3_i8).cmp_integer(&Some(-3)), Some(Ordering::Equal));
        assert_eq!(None::<i8>.cmp_integer(&Some(1)), None);
        assert_eq!(1.5_f32.cmp_integer(&2.5), None);
    }

    #[test]
    fn float_elements() {
        assert_eq!(f32::coerce(&json!("0.5")).unwrap(), 0.5);
        assert_eq!(f64::coerce(&json!(true)).unwrap(), 1.0);
    }
}
