//! JSON encoding and decoding of optionals and models.
//!
//! # Encoding
//!
//! - `Serialize for Optional<T>` writes the value, `null` if unspecified.
//! - [`ContractSerializer`] writes a [`Model`] as an object, leaving out every
//!   optional property that is unspecified or null. `#[derive(Model)]` routes
//!   `Serialize` through it.
//!
//! # Decoding
//!
//! - [`decode_optional`] is the per-value state machine. It takes the raw
//!   value and its depth in the document.
//! - `Deserialize for Optional<T>` reads the value and decodes it through
//!   the cached codec of `T`, as a field.
//! - [`decode_model`] walks an object and decodes each known property
//!   through the model's [`Contract`](crate::contract::Contract).
//!   `#[derive(Model)]` routes `Deserialize` through it.
//!
//! Malformed scalars never fail a decode, they leave the property
//! unspecified. Malformed JSON, and structured values an element type cannot
//! deserialize, fail with [`Error::Json`].
//!
//! # Entry points
//!
//! [`to_string`], [`to_value`], [`from_str`] and friends encode and decode
//! models and resolve the model's contract up front, so configuration
//! faults come back as [`Error::Config`] rather than as JSON errors.
//!
//! [`Model`]: crate::model::Model

mod de;
mod ser;

pub use de::{ROOT_DEPTH, TokenKind, decode_model, decode_optional, deserialize_model};
pub use ser::{ContractSerializer, serialize_model};
pub use serde_json::Value;

use crate::contract::Contract;
use crate::element::Element;
use crate::model::Model;
use crate::{Error, Optional};

/// Encodes a model to a JSON value.
pub fn to_value<M: Model>(model: &M) -> Result<Value, Error> {
    Contract::<M>::shared()?;
    Ok(serde_json::to_value(ContractSerializer::new(model))?)
}

/// Encodes a model to compact JSON text.
pub fn to_string<M: Model>(model: &M) -> Result<String, Error> {
    Contract::<M>::shared()?;
    Ok(serde_json::to_string(&ContractSerializer::new(model))?)
}

/// Encodes a model to indented JSON text.
pub fn to_string_pretty<M: Model>(model: &M) -> Result<String, Error> {
    Contract::<M>::shared()?;
    Ok(serde_json::to_string_pretty(&ContractSerializer::new(model))?)
}

/// Decodes a model from a JSON value.
#[inline]
pub fn from_value<M: Model>(value: Value) -> Result<M, Error> {
    decode_model(value, ROOT_DEPTH)
}

/// Decodes a model from JSON text.
pub fn from_str<M: Model>(text: &str) -> Result<M, Error> {
    let value = serde_json::from_str::<Value>(text)?;
    decode_model(value, ROOT_DEPTH)
}

/// Decodes a model from JSON bytes.
pub fn from_slice<M: Model>(bytes: &[u8]) -> Result<M, Error> {
    let value = serde_json::from_slice::<Value>(bytes)?;
    decode_model(value, ROOT_DEPTH)
}

/// Decodes a standalone optional, at the root of its document.
///
/// At the root, arrays and objects go through [`Element::coerce`] like
/// scalars, so they degrade to unspecified when `T` does not accept them.
///
/// ```
/// use tri_optional::Optional;
/// use tri_optional::serde::optional_from_str;
///
/// assert_eq!(optional_from_str::<i64>("7").unwrap(), Optional::present(7));
/// assert_eq!(optional_from_str::<i64>("[7]").unwrap(), Optional::unspecified());
/// assert_eq!(optional_from_str::<Option<i64>>("null").unwrap(), Optional::null());
/// ```
pub fn optional_from_str<T: Element>(text: &str) -> Result<Optional<T>, Error> {
    let value = serde_json::from_str::<Value>(text)?;
    de::decode_cached(value, ROOT_DEPTH)
}

// -----------------------------------------------------------------------------
// Tests
