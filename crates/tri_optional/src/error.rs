use thiserror::Error;

// -----------------------------------------------------------------------------
// ConfigError

/// A type or model is wired up wrongly.
///
/// These are configuration faults, not data faults: they surface the first
/// time a codec or contract is built for the offending type and every time
/// after, whatever the input document holds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A codec was requested for a declared type that is not an `Optional<T>`.
    #[error("`{type_path}` is not an optional type, no element type to resolve")]
    UnresolvedElement { type_path: &'static str },

    /// The codec factory of an element built a codec for another element.
    #[error("codec registered for `{expected}` handles `{actual}` instead")]
    CodecMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A property accessor rejected the value it was handed.
    #[error("property `{property}` of `{model}` does not accept a value of `{expected}`")]
    AccessorMismatch {
        model: &'static str,
        property: &'static str,
        expected: &'static str,
    },

    /// The contract cache holds a value of another type for this model.
    #[error("cached contract of `{model}` has an unexpected type")]
    ContractType { model: &'static str },

    /// Contract construction failed for one property.
    #[error("cannot resolve property `{property}` of `{model}`: {source}")]
    Property {
        model: &'static str,
        property: &'static str,
        #[source]
        source: Box<ConfigError>,
    },
}

// -----------------------------------------------------------------------------
// CoerceError

/// A raw JSON value cannot become the requested element type.
///
/// The decoder never returns this to callers: a failed coercion degrades the
/// field to unspecified. It is exposed for [`Element::coerce`] implementors
/// and shows up in debug logs.
///
/// [`Element::coerce`]: crate::element::Element::coerce
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("expected a value convertible to `{target}`, found {found}")]
    Mismatch {
        target: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for `{target}`")]
    OutOfRange { target: &'static str, value: String },

    #[error("cannot parse {text:?} as `{target}`")]
    Unparsable { target: &'static str, text: String },

    #[error("`{target}` has no variant named {name:?}")]
    UnknownVariant { target: &'static str, name: String },

    #[error(transparent)]
    Uuid(#[from] uuid::Error),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error("cannot deserialize `{target}`: {message}")]
    Composite {
        target: &'static str,
        message: String,
    },
}

// -----------------------------------------------------------------------------
// Error

/// Errors returned by the encode and decode entry points in [`serde`].
///
/// [`serde`]: crate::serde
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed JSON, or a structured value the element type rejects.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object for `{model}`, found {found}")]
    ExpectedObject {
        model: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::ConfigError;

    #[test]
    fn property_error_keeps_its_cause() {
        let err = ConfigError::Property {
            model: "Patch",
            property: "field",
            source: Box::new(ConfigError::UnresolvedElement { type_path: "i32" }),
        };

        assert_eq!(
            err.to_string(),
            "cannot resolve property `field` of `Patch`: `i32` is not an optional type, no element type to resolve",
        );
        assert!(err.source().is_some());
    }
}
