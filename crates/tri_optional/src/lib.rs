#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Lets code generated by `tri_optional_derive` name `::tri_optional`
// from inside this crate, including its tests.
extern crate self as tri_optional;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod optional;

pub mod contract;
pub mod element;
pub mod info;
pub mod model;
pub mod registry;
pub mod serde;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Exports

pub use error::{CoerceError, ConfigError, Error};
pub use optional::{AnyOptional, Optional};

#[cfg(test)]
mod test_logger;

/// `#[derive(Model)]` and `#[derive(Element)]`.
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub mod derive {
    pub use tri_optional_derive::{Element, Model};
}
