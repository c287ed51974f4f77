//! Descriptions of declared property types.
//!
//! - [`DeclaredType`]: identity and erased (de)serialization of a type.
//! - [`ElementInfo`]: for `Optional<T>`, the element `T` and its codec
//!   factory.
//! - [`Declared`]: the trait returning a type's cached [`DeclaredType`].

mod cell;
mod declared;
mod element_info;

pub use cell::{GenericCell, NonGenericCell};
pub use declared::{Declared, DeclaredType};
pub use element_info::ElementInfo;
