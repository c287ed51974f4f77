use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::path;

/// `Declared` for a non-generic type, as `impl_declared!` writes it.
pub(crate) fn impl_trait_declared(krate: &syn::Path, ident: &Ident) -> TokenStream {
    let declared_ = path::declared_(krate);
    let declared_type_ = path::declared_type_(krate);
    let non_generic_cell_ = path::non_generic_cell_(krate);

    quote! {
        impl #declared_ for #ident {
            fn declared_type() -> &'static #declared_type_ {
                static CELL: #non_generic_cell_<#declared_type_> = #non_generic_cell_::new();
                CELL.get_or_init(#declared_type_::plain::<#ident>)
            }
        }
    }
}
