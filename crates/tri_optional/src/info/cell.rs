//! Static storage for per-type descriptions.
//!
//! [`Declared::declared_type`](super::Declared::declared_type) returns a
//! `&'static DeclaredType`, built on first use and kept for the process
//! lifetime.
//!
//! - [`NonGenericCell`]: one value, behind a [`OnceLock`].
//! - [`GenericCell`]: a `static` inside a generic function is shared by every
//!   instantiation, so the cell keys values by [`TypeId`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use tri_utils::TypeIdMap;

use crate::info::DeclaredType;

mod sealed {
    use crate::info::DeclaredType;

    pub trait CellValue: Send + Sync + 'static {}

    impl CellValue for DeclaredType {}
}

use sealed::CellValue;

/// Cell for a non-generic type.
///
/// ```
/// use tri_optional::info::{Declared, DeclaredType, NonGenericCell};
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Tag(String);
///
/// impl Declared for Tag {
///     fn declared_type() -> &'static DeclaredType {
///         static CELL: NonGenericCell<DeclaredType> = NonGenericCell::new();
///         CELL.get_or_init(DeclaredType::plain::<Tag>)
///     }
/// }
///
/// assert!(core::ptr::eq(Tag::declared_type(), Tag::declared_type()));
/// ```
pub struct NonGenericCell<T: CellValue>(OnceLock<T>);

impl<T: CellValue> NonGenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

/// Cell for a generic type, one value per instantiation.
///
/// ```
/// use tri_optional::info::{Declared, DeclaredType, GenericCell};
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Pair<T>(T, T);
///
/// impl<T: serde::Serialize + serde::de::DeserializeOwned + 'static> Declared for Pair<T> {
///     fn declared_type() -> &'static DeclaredType {
///         static CELL: GenericCell<DeclaredType> = GenericCell::new();
///         CELL.get_or_insert::<Self>(DeclaredType::plain::<Self>)
///     }
/// }
///
/// assert_ne!(
///     <Pair<u8>>::declared_type().type_path(),
///     <Pair<i8>>::declared_type().type_path(),
/// );
/// ```
pub struct GenericCell<T: CellValue>(RwLock<TypeIdMap<&'static T>>);

impl<T: CellValue> GenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, building it with `f` on first use.
    ///
    /// Concurrent first calls may each run `f`; the first value stored wins
    /// and the others are dropped.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        let type_id = TypeId::of::<G>();
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &'static T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || {
                let leaked: &'static T = Box::leak(Box::new(value));
                leaked
            })
    }
}
