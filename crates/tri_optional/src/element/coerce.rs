//! Conversions from raw JSON values to element types.
//!
//! Each function accepts the JSON shapes its target can reasonably be read
//! from and reports anything else as a [`CoerceError`]. The decoder turns
//! that error into an unspecified field.
//!
//! | target | accepted |
//! |---|---|
//! | integers | numbers (floats rounded half to even), numeric strings, booleans |
//! | floats | numbers, numeric strings, booleans |
//! | `bool` | booleans, `"true"`/`"false"` in any case, numbers (non-zero is `true`) |
//! | `char` | one-character strings, code points |
//! | `String` | strings, the text of numbers and booleans |
//! | `Uuid` | strings in any format `Uuid::parse_str` accepts |
//! | [`Bytes`] | standard base64 strings |
//! | enums | strings naming a variant, case-insensitive |
//! | composites | whatever their `Deserialize` accepts |

use core::any::type_name;

use serde_core::Deserialize;
use serde_core::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::CoerceError;
use crate::element::Bytes;

/// Names the JSON type of `value`, for error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cold]
fn mismatch<T: ?Sized>(value: &Value) -> CoerceError {
    CoerceError::Mismatch {
        target: type_name::<T>(),
        found: describe(value),
    }
}

#[cold]
fn unparsable<T: ?Sized>(text: &str) -> CoerceError {
    CoerceError::Unparsable {
        target: type_name::<T>(),
        text: text.to_owned(),
    }
}

#[cold]
fn out_of_range<T: ?Sized>(value: impl ToString) -> CoerceError {
    CoerceError::OutOfRange {
        target: type_name::<T>(),
        value: value.to_string(),
    }
}

// -----------------------------------------------------------------------------
// Numbers

/// Reads an integer of type `T`, checking its range.
///
/// ```
/// use serde_json::json;
/// use tri_optional::element::coerce;
///
/// assert_eq!(coerce::integer::<i32>(&json!(" 12 ")).unwrap(), 12);
/// assert_eq!(coerce::integer::<i32>(&json!(2.5)).unwrap(), 2);
/// assert!(coerce::integer::<u8>(&json!(300)).is_err());
/// ```
pub fn integer<T: TryFrom<i128>>(value: &Value) -> Result<T, CoerceError> {
    let wide = match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                i128::from(n)
            } else if let Some(n) = number.as_u64() {
                i128::from(n)
            } else {
                round_to_integer::<T>(number.as_f64().unwrap_or(f64::NAN))?
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i128>()
            .map_err(|_| unparsable::<T>(text))?,
        Value::Bool(flag) => i128::from(*flag),
        _ => return Err(mismatch::<T>(value)),
    };

    T::try_from(wide).map_err(|_| out_of_range::<T>(wide))
}

fn round_to_integer<T>(float: f64) -> Result<i128, CoerceError> {
    // 2^127, the first magnitude past `i128::MAX`.
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    let rounded = float.round_ties_even();
    if !rounded.is_finite() || !(-LIMIT..LIMIT).contains(&rounded) {
        return Err(out_of_range::<T>(float));
    }
    Ok(rounded as i128)
}

/// Reads a float; `T` only names the target in errors.
pub fn float<T: ?Sized>(value: &Value) -> Result<f64, CoerceError> {
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| mismatch::<T>(value)),
        Value::String(text) => text.trim().parse().map_err(|_| unparsable::<T>(text)),
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        _ => Err(mismatch::<T>(value)),
    }
}

// -----------------------------------------------------------------------------
// Text-like scalars

pub fn boolean(value: &Value) -> Result<bool, CoerceError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(unparsable::<bool>(text))
            }
        }
        Value::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
        _ => Err(mismatch::<bool>(value)),
    }
}

pub fn character(value: &Value) -> Result<char, CoerceError> {
    match value {
        Value::String(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(unparsable::<char>(text)),
            }
        }
        Value::Number(number) => number
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .ok_or_else(|| out_of_range::<char>(number)),
        _ => Err(mismatch::<char>(value)),
    }
}

pub fn string(value: &Value) -> Result<String, CoerceError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(mismatch::<String>(value)),
    }
}

pub fn uuid(value: &Value) -> Result<Uuid, CoerceError> {
    match value {
        Value::String(text) => Ok(Uuid::parse_str(text.trim())?),
        _ => Err(mismatch::<Uuid>(value)),
    }
}

pub fn bytes(value: &Value) -> Result<Bytes, CoerceError> {
    match value {
        Value::String(text) => Ok(Bytes::from_base64(text)?),
        _ => Err(mismatch::<Bytes>(value)),
    }
}

// -----------------------------------------------------------------------------
// Enums and composites

/// The trimmed variant name held by `value`.
///
/// Used by `#[derive(Element)]` on unit enums, which then matches the name
/// against each variant ignoring ASCII case.
pub fn variant_name<T: ?Sized>(value: &Value) -> Result<&str, CoerceError> {
    match value {
        Value::String(text) => Ok(text.trim()),
        _ => Err(mismatch::<T>(value)),
    }
}

#[cold]
pub fn unknown_variant<T: ?Sized>(name: &str) -> CoerceError {
    CoerceError::UnknownVariant {
        target: type_name::<T>(),
        name: name.to_owned(),
    }
}

/// Deserializes `T` from `value` through its own `Deserialize`.
pub fn composite<T: DeserializeOwned>(value: &Value) -> Result<T, CoerceError> {
    T::deserialize(value).map_err(|err| CoerceError::Composite {
        target: type_name::<T>(),
        message: err.to_string(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_accept_numbers_text_and_flags() {
        assert_eq!(integer::<i32>(&json!(-7)).unwrap(), -7);
        assert_eq!(integer::<u64>(&json!(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(integer::<i16>(&json!("+31")).unwrap(), 31);
        assert_eq!(integer::<u8>(&json!(true)).unwrap(), 1);

        assert!(matches!(integer::<i8>(&json!(128)), Err(CoerceError::OutOfRange { .. })));
        assert!(matches!(integer::<i32>(&json!("3.5")), Err(CoerceError::Unparsable { .. })));
        assert!(matches!(integer::<i32>(&json!([1])), Err(CoerceError::Mismatch { .. })));
    }

    #[test]
    fn integers_round_half_to_even() {
        assert_eq!(integer::<i32>(&json!(2.5)).unwrap(), 2);
        assert_eq!(integer::<i32>(&json!(3.5)).unwrap(), 4);
        assert_eq!(integer::<i32>(&json!(-2.5)).unwrap(), -2);
        assert!(integer::<i64>(&json!(1e300)).is_err());
    }

    #[test]
    fn floats_and_flags() {
        assert_eq!(float::<f64>(&json!(1.25)).unwrap(), 1.25);
        assert_eq!(float::<f64>(&json!(" 2 ")).unwrap(), 2.0);
        assert!(float::<f64>(&json!("x")).is_err());

        assert!(boolean(&json!("TRUE")).unwrap());
        assert!(!boolean(&json!("false")).unwrap());
        assert!(boolean(&json!(2)).unwrap());
        assert!(boolean(&json!("yes")).is_err());
    }

    #[test]
    fn characters_and_strings() {
        assert_eq!(character(&json!("é")).unwrap(), 'é');
        assert_eq!(character(&json!(65)).unwrap(), 'A');
        assert!(character(&json!("ab")).is_err());
        assert!(character(&json!(0xD800)).is_err());

        assert_eq!(string(&json!(12)).unwrap(), "12");
        assert_eq!(string(&json!(false)).unwrap(), "false");
        assert!(string(&json!({})).is_err());
    }

    #[test]
    fn uuid_and_base64() {
        let id = uuid(&json!("6f4a2b1c-0d3e-4f50-8a61-72b3c4d5e6f7")).unwrap();
        assert_eq!(id.to_string(), "6f4a2b1c-0d3e-4f50-8a61-72b3c4d5e6f7");
        assert!(matches!(uuid(&json!("not-a-uuid")), Err(CoerceError::Uuid(_))));

        assert_eq!(bytes(&json!("AQID")).unwrap().as_slice(), [1, 2, 3]);
        assert!(matches!(bytes(&json!("@@@")), Err(CoerceError::Base64(_))));
    }

    #[test]
    fn composites_use_their_deserialize() {
        assert_eq!(composite::<Vec<u8>>(&json!([1, 2])).unwrap(), [1, 2]);
        assert!(matches!(
            composite::<Vec<u8>>(&json!("x")),
            Err(CoerceError::Composite { .. })
        ));
    }
}
