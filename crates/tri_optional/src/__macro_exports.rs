//! Items referenced by code generated from `tri_optional_derive`.
//!
//! Generated code goes through these re-exports so the invoking crate does
//! not need its own dependency on them.

pub use serde_core;
pub use serde_json::Value;
