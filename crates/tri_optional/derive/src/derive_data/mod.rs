//! Provide some tools for parsing the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod element_type;
mod model_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::FieldAttributes;
pub(crate) use element_type::{ElementShape, ElementType};
pub(crate) use model_struct::{ModelField, ModelStruct};

use syn::{Generics, spanned::Spanned};

/// Rejects generic parameters: generated code uses per-type statics.
fn reject_generics(generics: &Generics, derive: &str) -> syn::Result<()> {
    if generics.params.is_empty() {
        return Ok(());
    }

    Err(syn::Error::new(
        generics.params.span(),
        format!("`#[derive({derive})]` does not support generic types"),
    ))
}
