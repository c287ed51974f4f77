use syn::{Data, DeriveInput, Fields, Ident, spanned::Spanned};

use super::reject_generics;

/// How an element type is built from a raw JSON value.
pub(crate) enum ElementShape<'a> {
    /// An enum of unit variants, matched by name.
    UnitEnum(Vec<&'a Ident>),
    /// Anything else, deserialized as a whole.
    Composite,
}

/// A type accepted by `#[derive(Element)]`.
pub(crate) struct ElementType<'a> {
    pub ident: &'a Ident,
    pub shape: ElementShape<'a>,
    pub krate: syn::Path,
}

impl<'a> ElementType<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        reject_generics(&ast.generics, "Element")?;

        let shape = match &ast.data {
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`#[derive(Element)]` does not support empty enums",
                    ));
                }

                if data
                    .variants
                    .iter()
                    .all(|variant| matches!(variant.fields, Fields::Unit))
                {
                    ElementShape::UnitEnum(data.variants.iter().map(|v| &v.ident).collect())
                } else {
                    ElementShape::Composite
                }
            }
            Data::Struct(_) => ElementShape::Composite,
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Element)]` does not support unions",
                ));
            }
        };

        Ok(Self {
            ident: &ast.ident,
            shape,
            krate: crate::path::tri_optional(),
        })
    }
}
