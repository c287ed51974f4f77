use syn::{Data, DeriveInput, Fields, Ident, Type, spanned::Spanned};

use super::{FieldAttributes, reject_generics};

/// A field that becomes a model property.
pub(crate) struct ModelField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Position among the properties, not among the fields.
    pub index: usize,
}

impl ModelField<'_> {
    /// The JSON key, which is the field name without a raw prefix.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        }
    }
}

/// A struct accepted by `#[derive(Model)]`.
pub(crate) struct ModelStruct<'a> {
    pub ident: &'a Ident,
    pub fields: Vec<ModelField<'a>>,
    pub krate: syn::Path,
}

impl<'a> ModelStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        reject_generics(&ast.generics, "Model")?;

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "`#[derive(Model)]` requires a struct with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Model)]` does not support enums, derive `Element` instead",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Model)]` does not support unions",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            if FieldAttributes::parse_field(field)?.skip {
                continue;
            }

            let Some(ident) = &field.ident else {
                return Err(syn::Error::new(field.span(), "expected a named field"));
            };

            fields.push(ModelField {
                ident,
                ty: &field.ty,
                index: fields.len(),
            });
        }

        Ok(Self {
            ident: &ast.ident,
            fields,
            krate: crate::path::tri_optional(),
        })
    }
}
