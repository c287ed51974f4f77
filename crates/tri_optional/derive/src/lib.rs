//! Derive macros for `tri_optional`:
//!
//! - [`Model`]
//! - [`Element`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static MODEL_ATTRIBUTE_NAME: &str = "model";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` turns a struct with named fields into a model whose
/// `Optional<T>` fields keep the unspecified/null/value distinction through
/// JSON. It implements:
///
/// - `Model`: one property per field, in declaration order. The field name
///   is the JSON key.
/// - `Declared` and `Element`, so the model can itself be a field, or the
///   element of an `Optional`.
/// - `serde::Serialize` and `serde::Deserialize`, routed through the model's
///   contract. Do not derive serde's traits as well.
///
/// The type must implement `Default`; decoding starts from it. Generic
/// structs are not supported.
///
/// Every field type must implement `Declared`. That covers `Optional<T>`,
/// every element type, other models and anything passed to
/// `impl_declared!`.
///
/// ```rust, ignore
/// #[derive(Model, Default)]
/// struct Patch {
///     id: u64,
///     name: Optional<String>,
///     note: Optional<Option<String>>,
/// }
/// ```
///
/// ## skip
///
/// `#[model(skip)]` leaves a field out of the property model. It is never
/// written, and decoding leaves it at its default.
///
/// ```rust, ignore
/// #[derive(Model, Default)]
/// struct Patch {
///     name: Optional<String>,
///     #[model(skip)]
///     revision: u32,
/// }
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let model = match derive_data::ModelStruct::from_input(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let impls = impls::impl_model(&model);

    TokenStream::from(quote! {
        const _: () = {
            #impls
        };
    })
}

/// # Element Derivation
///
/// `#[derive(Element)]` makes a type usable as the `T` of `Optional<T>`,
/// and implements `Declared` for it. The type must implement serde's
/// `Serialize` and `Deserialize` itself.
///
/// - For an enum whose variants are all units, a JSON string matching a
///   variant name, ignoring ASCII case and surrounding whitespace, becomes
///   that variant. Other values leave the optional unspecified.
/// - For any other struct or enum, the raw JSON value is deserialized with
///   the type's own `Deserialize`.
///
/// Generic types are not supported.
///
/// ```rust, ignore
/// #[derive(Element, serde::Serialize, serde::Deserialize)]
/// enum Channel {
///     Email,
///     Sms,
/// }
/// ```
#[proc_macro_derive(Element)]
pub fn derive_element(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let element = match derive_data::ElementType::from_input(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let impls = impls::impl_element(&element);

    TokenStream::from(quote! {
        const _: () = {
            #impls
        };
    })
}
