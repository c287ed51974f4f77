use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use log::{debug, error};
use tri_utils::TypeIdMap;

use crate::element::Element;
use crate::info::{Declared, DeclaredType, ElementInfo};
use crate::registry::OptionalCodec;
use crate::{ConfigError, Optional};

/// One [`OptionalCodec`] per element type, shared for the process lifetime.
///
/// Lookups take a read lock. On a miss the codec is built outside any lock,
/// then stored under the write lock unless another thread stored one first,
/// in which case the new one is dropped and the stored one returned. Every
/// caller therefore sees the same `&'static` codec for a given element type.
///
/// Codecs are leaked and never evicted; the number of element types in a
/// program is bounded.
///
/// # Examples
///
/// ```
/// use tri_optional::registry::CodecCache;
///
/// let cache = CodecCache::global();
/// let first = cache.of::<Option<i32>>().unwrap();
/// let second = cache.of::<Option<i32>>().unwrap();
///
/// assert!(core::ptr::addr_eq(first, second));
/// ```
pub struct CodecCache {
    codecs: RwLock<TypeIdMap<&'static dyn OptionalCodec>>,
}

impl CodecCache {
    /// Creates an empty cache.
    ///
    /// Most code wants [`global`](Self::global); a separate cache only
    /// changes which codecs are shared with whom.
    #[inline]
    pub const fn new() -> Self {
        Self {
            codecs: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The process-wide cache used by contracts and by `Deserialize for
    /// Optional<T>`.
    #[inline]
    pub fn global() -> &'static Self {
        static GLOBAL: CodecCache = CodecCache::new();
        &GLOBAL
    }

    /// Returns the codec of `Optional<T>`.
    #[inline]
    pub fn of<T: Element>(&self) -> Result<&'static dyn OptionalCodec, ConfigError> {
        self.for_declared(<Optional<T>>::declared_type())
    }

    /// Returns the codec of a declared `Optional<T>` type.
    ///
    /// Fails with [`ConfigError::UnresolvedElement`] if `declared` is not an
    /// optional type.
    pub fn for_declared(
        &self,
        declared: &DeclaredType,
    ) -> Result<&'static dyn OptionalCodec, ConfigError> {
        let element = declared.resolve_element().inspect_err(|err| error!("{err}"))?;
        self.get_or_build(element)
    }

    /// Returns the codec of `element`, building it on first use.
    ///
    /// Fails with [`ConfigError::CodecMismatch`] if the element's codec
    /// factory builds a codec for another element type. Nothing is cached in
    /// that case.
    pub fn get_or_build(
        &self,
        element: &ElementInfo,
    ) -> Result<&'static dyn OptionalCodec, ConfigError> {
        if let Some(codec) = self.get(element.type_id()) {
            return Ok(codec);
        }

        let codec = element.build_codec();
        let built = codec.element();
        if built.type_id() != element.type_id() {
            error!(
                "codec factory of `{}` built a codec for `{}`",
                element.type_path(),
                built.type_path(),
            );
            return Err(ConfigError::CodecMismatch {
                expected: element.type_path(),
                actual: built.type_path(),
            });
        }

        let mut codecs = self.codecs.write().unwrap_or_else(PoisonError::into_inner);
        let stored = codecs.get_or_insert(element.type_id(), move || {
            debug!("cached codec for `{}`", element.type_path());
            let leaked: &'static dyn OptionalCodec = Box::leak(codec);
            leaked
        });
        Ok(*stored)
    }

    /// Returns the stored codec for an element [`TypeId`].
    pub fn get(&self, type_id: TypeId) -> Option<&'static dyn OptionalCodec> {
        self.codecs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    /// Returns `true` if a codec is stored for the element [`TypeId`].
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.codecs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    /// Number of stored codecs.
    pub fn len(&self) -> usize {
        self.codecs.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::fmt::Debug;
    use std::thread;

    use log::Level;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::CodecCache;
    use crate::element::Element;
    use crate::info::{Declared, ElementInfo};
    use crate::registry::{OptionalCodec, TypedCodec};
    use crate::test_logger;
    use crate::{ConfigError, Optional};

    fn address(codec: &'static dyn OptionalCodec) -> usize {
        (codec as *const dyn OptionalCodec).cast::<()>() as usize
    }

    /// Decodes `raw` as a field through the cached codec of `T`, returning
    /// the codec's address.
    fn decode_through<T: Element + PartialEq + Debug>(
        cache: &CodecCache,
        raw: Value,
        expected: Optional<T>,
    ) -> usize {
        let codec = cache.of::<T>().unwrap();
        let decoded = codec.decode(raw, 1).unwrap();

        assert_eq!(decoded.downcast_ref::<Optional<T>>(), Some(&expected));
        address(codec)
    }

    #[test]
    fn parallel_decodes_share_one_codec_per_element() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 50;

        let cache = &CodecCache::new();

        let seen: Vec<[usize; 4]> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(move || {
                        let mut last = [0; 4];
                        for _ in 0..ROUNDS {
                            let now = [
                                decode_through(cache, json!("12"), Optional::present(12_i32)),
                                decode_through(cache, json!(null), Optional::<Option<i32>>::null()),
                                decode_through(cache, json!(7), Optional::present("7".to_owned())),
                                decode_through(cache, json!("x"), Optional::<Uuid>::unspecified()),
                            ];
                            assert!(last == [0; 4] || last == now);
                            last = now;
                        }
                        last
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 4);
        assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(cache.contains(TypeId::of::<Option<i32>>()));
        assert!(!cache.contains(TypeId::of::<Optional<i32>>()));
    }

    #[test]
    fn codecs_outlive_their_first_user() {
        let cache = CodecCache::new();

        let first = thread::scope(|scope| {
            scope
                .spawn(|| address(cache.of::<Option<bool>>().unwrap()))
                .join()
                .unwrap()
        });

        let codec = cache.get(TypeId::of::<Option<bool>>()).unwrap();
        assert_eq!(address(codec), first);
        assert!(codec.should_serialize(&Optional::non_null(true)));
    }

    #[test]
    fn non_optional_declared_type_is_rejected() {
        test_logger::install();
        let cache = CodecCache::new();
        let err = cache.for_declared(i32::declared_type()).err().unwrap();

        assert!(matches!(err, ConfigError::UnresolvedElement { type_path: "i32" }));
        assert_eq!(cache.len(), 0);
        assert!(test_logger::logged(Level::Error, "`i32` is not an optional type"));
    }

    #[test]
    fn mismatched_factory_is_rejected() {
        let cache = CodecCache::new();
        let wrong = ElementInfo::of::<u8>().with_codec(TypedCodec::<i8>::boxed);

        let err = cache.get_or_build(&wrong).err().unwrap();
        assert!(matches!(err, ConfigError::CodecMismatch { .. }));
        assert!(!cache.contains(TypeId::of::<u8>()));
    }
}
