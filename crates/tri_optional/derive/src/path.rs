//! Paths of the `tri_optional` items used by generated code.
//!
//! Kept in one place so a move inside `tri_optional` only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `tri_optional` crate.
///
/// 1. For crates that depend on `tri_optional` (including `tri_optional`
///    itself, through `extern crate self`), `::tri_optional` is returned.
/// 2. For crates that depend on `tri_core`, `::tri_core::optional` is returned.
///
/// Reading the manifest is not free, so the path is computed once per
/// derive and passed down.
pub(crate) fn tri_optional() -> syn::Path {
    tri_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tri_optional"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn serde_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::__macro_exports::serde_core
    }
}

#[inline(always)]
pub(crate) fn value_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::__macro_exports::Value
    }
}

#[inline(always)]
pub(crate) fn coerce_error_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::CoerceError
    }
}

#[inline(always)]
pub(crate) fn element_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::element::Element
    }
}

#[inline(always)]
pub(crate) fn element_kind_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::element::ElementKind
    }
}

#[inline(always)]
pub(crate) fn coerce_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::element::coerce
    }
}

#[inline(always)]
pub(crate) fn declared_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::info::Declared
    }
}

#[inline(always)]
pub(crate) fn declared_type_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::info::DeclaredType
    }
}

#[inline(always)]
pub(crate) fn non_generic_cell_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::info::NonGenericCell
    }
}

#[inline(always)]
pub(crate) fn model_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::model::Model
    }
}

#[inline(always)]
pub(crate) fn property_(krate: &syn::Path) -> TokenStream {
    quote! {
        #krate::model::Property
    }
}
