use syn::{Attribute, Field};

use crate::MODEL_ATTRIBUTE_NAME;

/// Parsed `#[model(...)]` attributes of one field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[model(skip)]`: the field is not a property.
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_field(field: &Field) -> syn::Result<Self> {
        Self::parse_attrs(&field.attrs)
    }

    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    if result.skip {
                        return Err(meta.error("duplicate `skip`"));
                    }
                    result.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown model attribute, expected `skip`"))
                }
            })?;
        }

        Ok(result)
    }
}
