use core::any::TypeId;
use core::fmt::{self, Debug};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// The id is fed to [`NoOpHashState`] as is, so lookups cost one probe and
/// no hashing. Only map operations are exposed, the backing `hashbrown`
/// table stays private.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use tri_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.get_or_insert(TypeId::of::<u32>(), || "u32");
///
/// assert_eq!(map.get(&TypeId::of::<u32>()), Some(&"u32"));
/// assert_eq!(map.get(&TypeId::of::<i32>()), None);
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map; usable in `static` items.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns the value stored for `type_id`, inserting the result of `f`
    /// first if there is none.
    ///
    /// When the key is present, `f` is not called and the existing value wins.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use tri_utils::TypeIdMap;
    ///
    /// let mut map = TypeIdMap::new();
    /// let id = TypeId::of::<bool>();
    ///
    /// assert_eq!(*map.get_or_insert(id, || 1), 1);
    /// assert_eq!(*map.get_or_insert(id, || 2), 1);
    /// ```
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns the value stored for `type_id`.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns `true` if a value is stored for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn first_inserted_value_wins() {
        let mut map = TypeIdMap::new();
        let id = TypeId::of::<u8>();

        assert_eq!(*map.get_or_insert(id, || "first"), "first");
        assert_eq!(*map.get_or_insert(id, || unreachable!()), "first");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn nullable_and_plain_types_are_distinct_keys() {
        let mut map = TypeIdMap::new();
        map.get_or_insert(TypeId::of::<Option<i32>>(), || 1);
        map.get_or_insert(TypeId::of::<i32>(), || 2);

        assert_eq!(map.get(&TypeId::of::<Option<i32>>()), Some(&1));
        assert_eq!(map.get(&TypeId::of::<i32>()), Some(&2));
        assert!(!map.contains(&TypeId::of::<u32>()));
        assert!(!map.is_empty());
    }
}
