use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::path;

/// Items shared by every derived `Element`.
fn element_body(krate: &syn::Path, kind: TokenStream) -> TokenStream {
    let element_kind_ = path::element_kind_(krate);

    quote! {
        type Inner = Self;
        const KIND: #element_kind_ = #element_kind_::#kind;

        #[inline(always)]
        fn from_inner(inner: Self) -> Self {
            inner
        }
    }
}

/// `Element` for structs, data-carrying enums and models: the raw value is
/// deserialized as a whole and displayed as JSON.
pub(crate) fn impl_composite_element(krate: &syn::Path, ident: &Ident) -> TokenStream {
    let element_ = path::element_(krate);
    let coerce_ = path::coerce_(krate);
    let coerce_error_ = path::coerce_error_(krate);
    let value_ = path::value_(krate);
    let body = element_body(krate, quote!(Composite));

    quote! {
        impl #element_ for #ident {
            #body

            fn coerce(value: &#value_) -> ::core::result::Result<Self, #coerce_error_> {
                #coerce_::composite::<Self>(value)
            }

            fn fmt_value(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #krate::element::fmt_json(self, f)
            }
        }
    }
}

/// `Element` for enums of unit variants: matched by variant name, ignoring
/// ASCII case, and displayed by variant name.
pub(crate) fn impl_unit_enum_element(
    krate: &syn::Path,
    ident: &Ident,
    variants: &[&Ident],
) -> TokenStream {
    let element_ = path::element_(krate);
    let coerce_ = path::coerce_(krate);
    let coerce_error_ = path::coerce_error_(krate);
    let value_ = path::value_(krate);
    let body = element_body(krate, quote!(Enum));

    let names = variants
        .iter()
        .map(|variant| variant.to_string())
        .collect::<Vec<_>>();

    let match_arms = variants.iter().zip(&names).map(|(variant, name)| {
        quote! {
            if name.eq_ignore_ascii_case(#name) {
                return ::core::result::Result::Ok(Self::#variant);
            }
        }
    });

    let fmt_arms = variants.iter().zip(&names).map(|(variant, name)| {
        quote! {
            Self::#variant => f.write_str(#name),
        }
    });

    quote! {
        impl #element_ for #ident {
            #body

            fn coerce(value: &#value_) -> ::core::result::Result<Self, #coerce_error_> {
                let name = #coerce_::variant_name::<Self>(value)?;
                #(#match_arms)*
                ::core::result::Result::Err(#coerce_::unknown_variant::<Self>(name))
            }

            fn fmt_value(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    #(#fmt_arms)*
                }
            }
        }
    }
}
