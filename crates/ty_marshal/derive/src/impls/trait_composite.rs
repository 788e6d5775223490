use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::where_clause;
use crate::derive_data::MarshalStruct;
use crate::path;

pub(crate) fn impl_trait_composite(info: &MarshalStruct, ty_marshal: &syn::Path) -> TokenStream {
    let marshal_ = path::marshal_(ty_marshal);
    let composite_ = path::composite_(ty_marshal);
    let type_ident_ = path::type_ident_(ty_marshal);
    let field_decl_ = path::field_decl_(ty_marshal);
    let option_ = path::option_(ty_marshal);
    let cow_ = path::cow_(ty_marshal);

    let ident = info.ident;
    let ident_str = ident.to_string();
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = where_clause(info, ty_marshal);

    let field_count = info.fields.len();
    let field_decls = info.fields.iter().map(|field| {
        let name = field.name();
        let visible = field.visible;
        let tag = match &field.attrs.tag {
            Some(lit) => quote! { #option_::Some(#lit) },
            None => quote! { #option_::None },
        };
        quote! { #field_decl_::new(#name, #tag, #visible) }
    });

    let indices: Vec<_> = info
        .visible_fields()
        .map(|field| Literal::usize_unsuffixed(field.index))
        .collect();
    let members: Vec<_> = info.visible_fields().map(|field| field.ident).collect();

    quote! {
        impl #impl_generics #composite_ for #ident #ty_generics #where_clause {
            #[inline]
            fn type_ident(&self) -> #type_ident_ {
                #type_ident_::new(::core::module_path!(), #ident_str)
            }

            fn field_decls(&self) -> #cow_<'_, [#field_decl_]> {
                static FIELDS: [#field_decl_; #field_count] = [
                    #( #field_decls, )*
                ];
                #cow_::Borrowed(&FIELDS)
            }

            fn field(&self, index: usize) -> #option_<&dyn #marshal_> {
                match index {
                    #( #indices => #option_::Some(&self.#members), )*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> #option_<&mut dyn #marshal_> {
                match index {
                    #( #indices => #option_::Some(&mut self.#members), )*
                    _ => #option_::None,
                }
            }
        }
    }
}
