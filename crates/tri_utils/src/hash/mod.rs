//! Hash containers on top of *hashbrown* and *foldhash*.
//!
//! - [`NoOpHashState`]: for keys that already are hashes, such as `TypeId`.
//! - [`FixedHashState`]: deterministic hashing for string keys.
//! - [`HashMap`]: `hashbrown::HashMap` defaulting to [`FixedHashState`].

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] unless told otherwise.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
