use syn::{Attribute, LitStr, Meta};

use crate::MARSHAL_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[marshal(getter, setter)]` on the type.
#[derive(Default, Clone, Copy)]
pub(crate) struct TypeAttributes {
    pub getter: bool,
    pub setter: bool,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(MARSHAL_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("getter") {
                    parsed.getter = true;
                    Ok(())
                } else if meta.path.is_ident("setter") {
                    parsed.setter = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `getter` or `setter`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[marshal("key,flags")]` on a field.
#[derive(Default, Clone)]
pub(crate) struct FieldAttributes {
    /// The annotation as written; validated at runtime.
    pub tag: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(MARSHAL_ATTRIBUTE_NAME)) {
            let Meta::List(list) = &attr.meta else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[marshal(\"key,flags\")]`",
                ));
            };
            let lit: LitStr = list.parse_args()?;
            if parsed.tag.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate `marshal` annotation"));
            }
            parsed.tag = Some(lit);
        }

        Ok(parsed)
    }
}
