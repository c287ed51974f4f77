//! Models resolved against the codec cache.
//!
//! A [`Contract`] pairs every property of a model with the codec of its
//! element type, when the property is an `Optional<T>`. It decides which
//! properties are written on encode, and how each property is read on
//! decode.
//!
//! Contracts are resolved once per model type and shared; see
//! [`Contract::shared`].

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::{PoisonError, RwLock};

use log::{debug, error};
use tri_utils::TypeIdMap;
use tri_utils::hash::{FixedHashState, HashMap};

use crate::ConfigError;
use crate::info::DeclaredType;
use crate::model::{Model, Property};
use crate::registry::{CodecCache, OptionalCodec};

// -----------------------------------------------------------------------------
// ContractProperty

/// A property of `M` with its codec resolved.
pub struct ContractProperty<M: 'static> {
    property: &'static Property<M>,
    declared: &'static DeclaredType,
    codec: Option<&'static dyn OptionalCodec>,
}

impl<M: Model> ContractProperty<M> {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.property.name()
    }

    #[inline]
    pub fn property(&self) -> &'static Property<M> {
        self.property
    }

    #[inline]
    pub fn declared(&self) -> &'static DeclaredType {
        self.declared
    }

    /// The codec of an `Optional<T>` property, `None` for plain properties.
    #[inline]
    pub fn codec(&self) -> Option<&'static dyn OptionalCodec> {
        self.codec
    }

    /// Returns `true` if the property is written when `model` is encoded.
    ///
    /// Optional properties are written only while holding a non-null value;
    /// plain properties always are.
    pub fn should_serialize(&self, model: &M) -> bool {
        match self.codec {
            Some(codec) => codec.should_serialize(self.property.get(model)),
            None => true,
        }
    }

    /// Views the property of `model` as serializable.
    pub fn serialize_value<'a>(&self, model: &'a M) -> Option<&'a dyn erased_serde::Serialize> {
        let value = self.property.get(model);
        match self.codec {
            Some(codec) => codec.encode(value),
            None => self.declared.serialize_value(value),
        }
    }

    /// Decodes a raw JSON value into a boxed value of the declared type.
    ///
    /// `depth` is the nesting depth of `value`.
    pub fn decode_value(
        &self,
        value: serde_json::Value,
        depth: usize,
    ) -> Result<Box<dyn Any>, serde_json::Error> {
        match self.codec {
            Some(codec) => codec.decode(value, depth),
            None => self.declared.deserialize_value(value),
        }
    }
}

impl<M: 'static> fmt::Debug for ContractProperty<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractProperty")
            .field("property", self.property)
            .field("optional", &self.codec.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Contract

/// The resolved properties of a model `M`.
///
/// # Examples
///
/// ```
/// use tri_optional::Optional;
/// use tri_optional::contract::Contract;
/// use tri_optional::derive::Model;
///
/// #[derive(Model, Default)]
/// struct Patch {
///     name: Optional<String>,
///     note: Optional<Option<String>>,
/// }
///
/// let contract = Contract::<Patch>::shared().unwrap();
/// let patch = Patch {
///     name: Optional::present("a".to_owned()),
///     note: Optional::null(),
/// };
///
/// let emitted: Vec<_> = contract.emitted(&patch).map(|p| p.name()).collect();
/// assert_eq!(emitted, ["name"]);
/// ```
pub struct Contract<M: 'static> {
    properties: Vec<ContractProperty<M>>,
    index: HashMap<&'static str, usize>,
}

impl<M: Model> Contract<M> {
    /// Resolves the properties of `M` against the global codec cache.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(CodecCache::global())
    }

    /// Resolves the properties of `M` against `cache`.
    ///
    /// Fails with [`ConfigError::Property`] naming the first property whose
    /// codec cannot be built.
    pub fn resolve_with(cache: &CodecCache) -> Result<Self, ConfigError> {
        let properties = M::properties();

        let mut resolved = Vec::with_capacity(properties.len());
        let mut index = HashMap::with_capacity_and_hasher(properties.len(), FixedHashState);

        for property in properties {
            let declared = property.declared();
            let codec = match declared.element() {
                Some(element) => Some(cache.get_or_build(element).map_err(|err| {
                    let err = ConfigError::Property {
                        model: M::type_path(),
                        property: property.name(),
                        source: Box::new(err),
                    };
                    error!("{err}");
                    err
                })?),
                None => None,
            };

            index.insert(property.name(), resolved.len());
            resolved.push(ContractProperty {
                property,
                declared,
                codec,
            });
        }

        Ok(Self {
            properties: resolved,
            index,
        })
    }

    /// The contract of `M`, resolved on first use and kept for the process
    /// lifetime.
    ///
    /// A failed resolution is not cached, later calls retry.
    pub fn shared() -> Result<&'static Self, ConfigError> {
        static CONTRACTS: RwLock<TypeIdMap<&'static (dyn Any + Send + Sync)>> =
            RwLock::new(TypeIdMap::new());

        let type_id = TypeId::of::<M>();

        let cached = CONTRACTS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        let erased = match cached {
            Some(erased) => erased,
            None => {
                let contract = Self::resolve()?;
                *CONTRACTS
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, move || {
                        debug!("resolved contract for `{}`", M::type_path());
                        let leaked: &'static (dyn Any + Send + Sync) = Box::leak(Box::new(contract));
                        leaked
                    })
            }
        };

        erased
            .downcast_ref::<Self>()
            .ok_or(ConfigError::ContractType {
                model: M::type_path(),
            })
    }

    /// All properties, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[ContractProperty<M>] {
        &self.properties
    }

    /// Looks up a property by its JSON key.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&ContractProperty<M>> {
        self.index.get(name).map(|&index| &self.properties[index])
    }

    /// The properties written when `model` is encoded, in declaration order.
    pub fn emitted<'a>(&'a self, model: &'a M) -> impl Iterator<Item = &'a ContractProperty<M>> {
        self.properties
            .iter()
            .filter(move |property| property.should_serialize(model))
    }
}

impl<M: 'static> fmt::Debug for Contract<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.properties).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(all(test, feature = "derive"))]
mod tests {
    use core::any::TypeId;

    use log::Level;

    use super::Contract;
    use crate::derive::Model;
    use crate::info::{DeclaredType, ElementInfo, NonGenericCell};
    use crate::model::{Model, Property};
    use crate::registry::{CodecCache, TypedCodec};
    use crate::test_logger;
    use crate::{ConfigError, Optional};

    #[derive(Model, Default)]
    struct Mixed {
        id: u32,
        count: Optional<i32>,
        note: Optional<Option<String>>,
    }

    #[test]
    fn optional_properties_get_codecs() {
        let contract = Contract::<Mixed>::resolve().unwrap();

        let optional: Vec<_> = contract
            .properties()
            .iter()
            .map(|p| (p.name(), p.codec().is_some()))
            .collect();

        assert_eq!(optional, [("id", false), ("count", true), ("note", true)]);
        assert_eq!(contract.property("note").map(|p| p.name()), Some("note"));
        assert!(contract.property("missing").is_none());
    }

    #[test]
    fn emission_follows_presence() {
        let contract = Contract::<Mixed>::shared().unwrap();
        let mixed = Mixed {
            id: 1,
            count: Optional::unspecified(),
            note: Optional::non_null("n".to_owned()),
        };

        let emitted: Vec<_> = contract.emitted(&mixed).map(|p| p.name()).collect();
        assert_eq!(emitted, ["id", "note"]);

        let null = Mixed {
            note: Optional::null(),
            ..Mixed::default()
        };
        let emitted: Vec<_> = contract.emitted(&null).map(|p| p.name()).collect();
        assert_eq!(emitted, ["id"]);
    }

    #[test]
    fn shared_contract_is_resolved_once() {
        let first = Contract::<Mixed>::shared().unwrap();
        let second = Contract::<Mixed>::shared().unwrap();

        assert!(core::ptr::eq(first, second));
    }

    // A hand-written model whose optional property is wired to a codec
    // factory for another element type.
    #[derive(Default)]
    struct Miswired {
        value: Optional<u8>,
    }

    fn miswired_declared() -> &'static DeclaredType {
        static CELL: NonGenericCell<DeclaredType> = NonGenericCell::new();
        CELL.get_or_init(|| {
            DeclaredType::optional::<u8>()
                .with_element(ElementInfo::of::<u8>().with_codec(TypedCodec::<u16>::boxed))
        })
    }

    fn get_value(model: &Miswired) -> &dyn core::any::Any {
        &model.value
    }

    fn set_value(
        model: &mut Miswired,
        value: Box<dyn core::any::Any>,
    ) -> Result<(), Box<dyn core::any::Any>> {
        model.value = *value.downcast::<Optional<u8>>()?;
        Ok(())
    }

    impl Model for Miswired {
        fn type_path() -> &'static str {
            "tests::Miswired"
        }

        fn type_ident() -> &'static str {
            "Miswired"
        }

        fn properties() -> &'static [Property<Self>] {
            static PROPERTIES: [Property<Miswired>; 1] =
                [Property::new("value", miswired_declared, get_value, set_value)];
            &PROPERTIES
        }
    }

    #[test]
    fn miswired_codec_fails_resolution() {
        test_logger::install();
        let cache = CodecCache::new();
        let err = Contract::<Miswired>::resolve_with(&cache).unwrap_err();

        match err {
            ConfigError::Property { model, property, source } => {
                assert_eq!((model, property), ("tests::Miswired", "value"));
                assert!(matches!(*source, ConfigError::CodecMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(!cache.contains(TypeId::of::<u8>()));
        assert!(test_logger::logged(
            Level::Error,
            "cannot resolve property `value` of `tests::Miswired`",
        ));
    }
}
