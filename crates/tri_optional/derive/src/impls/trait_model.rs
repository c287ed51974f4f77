use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::{ModelField, ModelStruct};
use crate::path;

/// The accessor pair of one property, as free functions so they coerce to
/// the `fn` pointers `Property::new` takes in a `static`.
fn impl_accessors(ident: &syn::Ident, field: &ModelField) -> TokenStream {
    let getter = format_ident!("__get_{}", field.index);
    let setter = format_ident!("__set_{}", field.index);
    let member = field.ident;
    let ty = field.ty;

    quote! {
        fn #getter(model: &#ident) -> &dyn ::core::any::Any {
            &model.#member
        }

        fn #setter(
            model: &mut #ident,
            value: ::std::boxed::Box<dyn ::core::any::Any>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::core::any::Any>> {
            model.#member = *value.downcast::<#ty>()?;
            ::core::result::Result::Ok(())
        }
    }
}

pub(crate) fn impl_trait_model(model: &ModelStruct) -> TokenStream {
    let krate = &model.krate;
    let ident = model.ident;
    let ident_str = ident.to_string();
    let len = model.fields.len();

    let model_ = path::model_(krate);
    let property_ = path::property_(krate);
    let declared_ = path::declared_(krate);

    let accessors = model.fields.iter().map(|field| impl_accessors(ident, field));

    let properties = model.fields.iter().map(|field| {
        let name = field.name();
        let ty = field.ty;
        let getter = format_ident!("__get_{}", field.index);
        let setter = format_ident!("__set_{}", field.index);

        quote! {
            #property_::new(#name, <#ty as #declared_>::declared_type, #getter, #setter)
        }
    });

    quote! {
        #(#accessors)*

        impl #model_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #ident_str)
            }

            #[inline]
            fn type_ident() -> &'static str {
                #ident_str
            }

            fn properties() -> &'static [#property_<Self>] {
                static PROPERTIES: [#property_<#ident>; #len] = [
                    #(#properties,)*
                ];
                &PROPERTIES
            }
        }
    }
}
