//! The tri-state container.
//!
//! - [`Optional`]: unspecified or present, where a present value of a
//!   nullable element type may itself be null.
//! - [`AnyOptional`]: the same queries without knowing the element type.

mod container;
mod erased;

pub use container::Optional;
pub use erased::AnyOptional;
