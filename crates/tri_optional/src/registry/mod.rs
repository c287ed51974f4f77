//! Codecs for `Optional<T>` and their process-wide cache.

mod cache;
mod codec;

pub use cache::CodecCache;
pub use codec::{OptionalCodec, TypedCodec};
