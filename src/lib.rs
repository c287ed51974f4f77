#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use tri_optional as optional;
pub use tri_utils as utils;

pub use tri_optional::{AnyOptional, Optional};
