use serde_core::de::Error as _;
use serde_core::{Deserialize, Deserializer};
use serde_json::Value;

use log::{debug, trace};

use crate::contract::Contract;
use crate::element::{Element, coerce};
use crate::model::Model;
use crate::registry::CodecCache;
use crate::{ConfigError, Error, Optional};

/// Depth of a standalone value, decoded outside of any model.
pub const ROOT_DEPTH: usize = 0;

/// Depth assumed by `Deserialize for Optional<T>`, which only sees its own
/// value and is almost always a field.
const FIELD_DEPTH: usize = 1;

// -----------------------------------------------------------------------------
// TokenKind

/// The shape of the raw value handed to an optional decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Null,
    /// A boolean, number or string.
    Scalar,
    /// An array or object.
    Structured,
}

impl TokenKind {
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Array(_) | Value::Object(_) => Self::Structured,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar,
        }
    }
}

// -----------------------------------------------------------------------------
// Optional

/// Decodes an `Optional<T>` from a raw JSON value found at `depth`.
///
/// 1. A structured value below the root is deserialized as `T::Inner`.
///    Errors here are not swallowed: the document is malformed for `T`.
/// 2. `null` is the element's null for nullable `T`, and unspecified
///    otherwise.
/// 3. Any other value, including a structured value at the root, goes
///    through [`Element::coerce`]. A failed coercion yields unspecified.
///
/// Absent properties never reach this function; they keep their default,
/// unspecified.
///
/// ```
/// use serde_json::json;
/// use tri_optional::Optional;
/// use tri_optional::serde::decode_optional;
///
/// assert_eq!(decode_optional::<Option<i32>>(json!(null), 1).unwrap(), Optional::null());
/// assert_eq!(decode_optional::<i32>(json!(null), 1).unwrap(), Optional::unspecified());
/// assert_eq!(decode_optional::<i32>(json!("12"), 1).unwrap(), Optional::present(12));
/// assert_eq!(decode_optional::<i32>(json!("twelve"), 1).unwrap(), Optional::unspecified());
/// assert!(decode_optional::<i32>(json!({ "a": 1 }), 1).is_err());
/// ```
pub fn decode_optional<T: Element>(value: Value, depth: usize) -> Result<Optional<T>, serde_json::Error> {
    match TokenKind::of(&value) {
        TokenKind::Structured if depth != ROOT_DEPTH => {
            let inner = serde_json::from_value::<T::Inner>(value)?;
            Ok(Optional::Present(T::from_inner(inner)))
        }
        TokenKind::Null => Ok(decode_null::<T>()),
        TokenKind::Scalar | TokenKind::Structured => Ok(decode_coerced::<T>(&value)),
    }
}

fn decode_null<T: Element>() -> Optional<T> {
    match T::null() {
        Some(null) => Optional::Present(null),
        None => {
            trace!("explicit null for non-nullable `{}`, left unspecified", T::type_path());
            Optional::Unspecified
        }
    }
}

fn decode_coerced<T: Element>(value: &Value) -> Optional<T> {
    match T::coerce(value) {
        Ok(value) => Optional::Present(value),
        Err(err) => {
            debug!(
                "{} for `{}` left unspecified: {err}",
                coerce::describe(value),
                T::type_path(),
            );
            Optional::Unspecified
        }
    }
}

/// Decodes `Optional<T>` through its cached codec.
pub(crate) fn decode_cached<T: Element>(value: Value, depth: usize) -> Result<Optional<T>, Error> {
    let codec = CodecCache::global().of::<T>()?;
    let decoded = codec.decode(value, depth)?;

    match decoded.downcast::<Optional<T>>() {
        Ok(decoded) => Ok(*decoded),
        Err(_) => Err(ConfigError::CodecMismatch {
            expected: T::type_path(),
            actual: codec.element().type_path(),
        }
        .into()),
    }
}

/// Reads any JSON value and decodes it as a field value.
///
/// Since the property itself is present, absence maps to unspecified only
/// through `Default`: pair it with `#[serde(default)]` in plain serde
/// structs.
impl<'de, T: Element> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_cached::<T>(value, FIELD_DEPTH).map_err(D::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// Model

/// Decodes a model from a raw JSON object found at `depth`.
///
/// Starts from `M::default()` and sets every known property present in the
/// object; unknown keys are skipped. Optional properties decode through
/// their codec at `depth + 1`.
pub fn decode_model<M: Model>(value: Value, depth: usize) -> Result<M, Error> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::ExpectedObject {
                model: M::type_path(),
                found: coerce::describe(&other),
            });
        }
    };

    let contract = Contract::<M>::shared()?;
    let mut model = M::default();

    for (key, value) in object {
        let Some(property) = contract.property(&key) else {
            trace!("skipping unknown key `{key}` of `{}`", M::type_path());
            continue;
        };

        let decoded = property.decode_value(value, depth + 1)?;
        property.property().set(&mut model, decoded)?;
    }

    Ok(model)
}

/// The `Deserialize` body generated by `#[derive(Model)]`.
pub fn deserialize_model<'de, M: Model, D: Deserializer<'de>>(deserializer: D) -> Result<M, D::Error> {
    let value = Value::deserialize(deserializer)?;
    decode_model::<M>(value, ROOT_DEPTH).map_err(D::Error::custom)
}
