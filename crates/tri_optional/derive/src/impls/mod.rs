// -----------------------------------------------------------------------------
// Modules

mod trait_declared;
mod trait_element;
mod trait_model;
mod trait_serde;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ElementShape, ElementType, ModelStruct};

use trait_declared::impl_trait_declared;
use trait_element::{impl_composite_element, impl_unit_enum_element};
use trait_model::impl_trait_model;
use trait_serde::impl_model_serde;

/// Provided for `#[derive(Model)]`.
pub(crate) fn impl_model(model: &ModelStruct) -> TokenStream {
    let model_impl = impl_trait_model(model);
    let serde_impls = impl_model_serde(&model.krate, model.ident);
    let element_impl = impl_composite_element(&model.krate, model.ident);
    let declared_impl = impl_trait_declared(&model.krate, model.ident);

    quote! {
        #model_impl

        #serde_impls

        #element_impl

        #declared_impl
    }
}

/// Provided for `#[derive(Element)]`.
pub(crate) fn impl_element(element: &ElementType) -> TokenStream {
    let element_impl = match &element.shape {
        ElementShape::UnitEnum(variants) => {
            impl_unit_enum_element(&element.krate, element.ident, variants)
        }
        ElementShape::Composite => impl_composite_element(&element.krate, element.ident),
    };
    let declared_impl = impl_trait_declared(&element.krate, element.ident);

    quote! {
        #element_impl

        #declared_impl
    }
}
