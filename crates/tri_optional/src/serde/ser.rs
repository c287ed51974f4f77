use serde_core::ser::{Error as _, SerializeStruct};
use serde_core::{Serialize, Serializer};

use crate::Optional;
use crate::contract::{Contract, ContractProperty};
use crate::model::Model;

// -----------------------------------------------------------------------------
// Optional

/// Writes the value, or `null` when unspecified.
///
/// Model encoding never reaches the `null` case: unspecified and null
/// properties are left out of the object entirely.
impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Optional::Present(value) => value.serialize(serializer),
            Optional::Unspecified => serializer.serialize_none(),
        }
    }
}

// -----------------------------------------------------------------------------
// Model

/// Serializes a [`Model`] through its shared [`Contract`].
///
/// Only properties passing [`ContractProperty::should_serialize`] are
/// written, in declaration order.
pub struct ContractSerializer<'a, M: Model> {
    model: &'a M,
}

impl<'a, M: Model> ContractSerializer<'a, M> {
    #[inline]
    pub const fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<M: Model> Serialize for ContractSerializer<'_, M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let contract = Contract::<M>::shared().map_err(S::Error::custom)?;

        let emitted = contract
            .emitted(self.model)
            .collect::<Vec<&ContractProperty<M>>>();

        let mut state = serializer.serialize_struct(M::type_ident(), emitted.len())?;

        for property in emitted {
            let Some(value) = property.serialize_value(self.model) else {
                return Err(S::Error::custom(format!(
                    "property `{}` of `{}` does not hold a `{}`",
                    property.name(),
                    M::type_path(),
                    property.declared().type_path(),
                )));
            };
            state.serialize_field(property.name(), value)?;
        }

        state.end()
    }
}

/// The `Serialize` body generated by `#[derive(Model)]`.
#[inline]
pub fn serialize_model<M: Model, S: Serializer>(model: &M, serializer: S) -> Result<S::Ok, S::Error> {
    ContractSerializer::new(model).serialize(serializer)
}
