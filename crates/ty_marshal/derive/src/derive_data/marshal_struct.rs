use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

/// A field of a derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Declaration index, counting private fields.
    pub index: usize,
    /// Marshaled only when not private.
    pub visible: bool,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The field name without a raw-identifier prefix.
    pub fn name(&self) -> LitStr {
        LitStr::new(&self.ident.unraw().to_string(), self.ident.span())
    }
}

/// A struct with named fields accepted by `#[derive(Marshal)]`.
pub(crate) struct MarshalStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<StructField<'a>>,
}

impl<'a> MarshalStruct<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`#[derive(Marshal)]` only supports structs with named fields",
            ));
        };
        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new_spanned(
                &data.fields,
                "`#[derive(Marshal)]` only supports structs with named fields",
            ));
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Marshal` types must be `'static`; lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse(&input.attrs)?;

        let fields = named
            .named
            .iter()
            .enumerate()
            .map(|(index, field)| {
                Ok(StructField {
                    // Named fields always carry an ident.
                    ident: field.ident.as_ref().unwrap_or(&input.ident),
                    ty: &field.ty,
                    index,
                    visible: !matches!(field.vis, Visibility::Inherited),
                    attrs: FieldAttributes::parse(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            fields,
        })
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.visible)
    }
}
