//! Types that can live inside an [`Optional`](crate::Optional).
//!
//! An [`Element`] knows three things the codecs need:
//!
//! - whether it is nullable, and what its null looks like;
//! - how to build itself from a raw JSON scalar, see [`coerce`];
//! - how to print itself.
//!
//! Implementations exist for `bool`, every integer width, `f32`, `f64`,
//! `char`, `String`, [`Uuid`](uuid::Uuid), [`Bytes`], `Vec<T>` and
//! `Option<T>`. `#[derive(Element)]` covers unit enums (matched by variant
//! name) and composite types, `#[derive(Model)]` makes models usable as
//! composite elements.

mod bytes;
mod impls;

pub mod coerce;

pub use bytes::Bytes;

use core::cmp::Ordering;
use core::fmt;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;
use serde_json::Value;

use crate::CoerceError;

// -----------------------------------------------------------------------------
// ElementKind

/// The coercion family an element type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    /// Any integer width; these are the only ordered elements.
    Integer,
    /// `f32` and `f64`, also standing in for decimals.
    Float,
    Char,
    String,
    Uuid,
    /// Base64 text on the wire.
    Bytes,
    /// Unit enum, matched case-insensitively by variant name.
    Enum,
    /// Arrays, maps and structs; built through their own `Deserialize`.
    Composite,
}

impl ElementKind {
    /// Returns `false` only for [`Composite`](Self::Composite).
    #[inline]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Composite)
    }
}

// -----------------------------------------------------------------------------
// Element

/// A type usable as the element `T` of `Optional<T>`.
///
/// # Nullability
///
/// Only `Option<U>` is nullable. For it, [`Inner`](Element::Inner) is `U`,
/// [`null`](Element::null) returns `Some(None)` and a JSON `null` decodes to
/// a present null. Every other element type treats an explicit `null` as
/// absent.
///
/// # Implementing
///
/// Derive it where possible. A manual implementation for a scalar looks like:
///
/// ```
/// use core::cmp::Ordering;
/// use core::fmt;
/// use tri_optional::CoerceError;
/// use tri_optional::element::{Element, ElementKind, coerce};
/// use serde_json::Value;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Port(u16);
///
/// impl Element for Port {
///     type Inner = Self;
///     const KIND: ElementKind = ElementKind::Integer;
///
///     fn from_inner(inner: Self) -> Self {
///         inner
///     }
///     fn cmp_integer(&self, other: &Self) -> Option<Ordering> {
///         Some(self.0.cmp(&other.0))
///     }
///     fn coerce(value: &Value) -> Result<Self, CoerceError> {
///         coerce::integer(value).map(Port)
///     }
///     fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, ":{}", self.0)
///     }
/// }
/// ```
pub trait Element: Serialize + DeserializeOwned + 'static {
    /// The non-null type a structured JSON value is deserialized into.
    ///
    /// `U` for `Option<U>`, `Self` otherwise.
    type Inner: DeserializeOwned + 'static;

    const KIND: ElementKind;

    const NULLABLE: bool = false;

    /// Wraps a deserialized inner value.
    fn from_inner(inner: Self::Inner) -> Self;

    /// Builds a value from a raw JSON value.
    ///
    /// Called for scalars, and for arrays and objects found at the root of
    /// a standalone decode. `null` only reaches this for nullable types.
    fn coerce(value: &Value) -> Result<Self, CoerceError>;

    /// Writes the value's text form, used by `Display for Optional<T>`.
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Returns `true` if this value is the element's null.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }

    /// The element's null, `None` for non-nullable types.
    #[inline]
    fn null() -> Option<Self> {
        None
    }

    /// Orders two values of an integer element, `None` for every other
    /// element and for nulls.
    #[inline]
    fn cmp_integer(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    #[inline]
    fn type_path() -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Writes `value` as compact JSON.
///
/// The text form of composite elements.
pub fn fmt_json<T: Serialize + ?Sized>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    f.write_str(&text)
}
