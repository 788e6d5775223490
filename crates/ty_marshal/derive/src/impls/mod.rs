//! Code generation for `#[derive(Marshal)]`.

// -----------------------------------------------------------------------------
// Modules

mod trait_composite;
mod trait_marshal;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MarshalStruct;

/// Implement `Marshal` and `Composite` for a named struct.
pub(crate) fn impl_struct(info: &MarshalStruct) -> TokenStream {
    let ty_marshal = crate::path::ty_marshal();

    let marshal_trait_tokens = trait_marshal::impl_trait_marshal(info, &ty_marshal);
    let composite_trait_tokens = trait_composite::impl_trait_composite(info, &ty_marshal);

    quote! {
        const _: () = {
            #marshal_trait_tokens

            #composite_trait_tokens
        };
    }
}

/// The struct's where clause, extended with the bounds every generated impl
/// needs: `Send + Sync + 'static` type parameters and `Marshal` visible
/// fields.
fn where_clause(info: &MarshalStruct, ty_marshal: &syn::Path) -> TokenStream {
    let marshal_ = crate::path::marshal_(ty_marshal);

    let existing = info
        .generics
        .where_clause
        .as_ref()
        .map(|clause| clause.predicates.iter().collect::<Vec<_>>())
        .unwrap_or_default();
    let params = info.generics.type_params().map(|param| &param.ident);
    let field_tys = info.visible_fields().map(|field| field.ty);

    quote! {
        where
            #( #existing, )*
            #( #params: ::core::marker::Send + ::core::marker::Sync + 'static, )*
            #( #field_tys: #marshal_, )*
    }
}
