use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::path;

/// `Serialize` and `Deserialize` routed through the model's contract.
pub(crate) fn impl_model_serde(krate: &syn::Path, ident: &Ident) -> TokenStream {
    let serde_ = path::serde_(krate);

    quote! {
        impl #serde_::Serialize for #ident {
            fn serialize<__S>(&self, serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: #serde_::Serializer,
            {
                #krate::serde::serialize_model(self, serializer)
            }
        }

        impl<'de> #serde_::Deserialize<'de> for #ident {
            fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: #serde_::Deserializer<'de>,
            {
                #krate::serde::deserialize_model::<Self, __D>(deserializer)
            }
        }
    }
}
