use proc_macro2::TokenStream;
use quote::quote;

use super::where_clause;
use crate::derive_data::MarshalStruct;
use crate::path;

pub(crate) fn impl_trait_marshal(info: &MarshalStruct, ty_marshal: &syn::Path) -> TokenStream {
    let marshal_ = path::marshal_(ty_marshal);
    let value_ref_ = path::value_ref_(ty_marshal);
    let value_mut_ = path::value_mut_(ty_marshal);
    let option_ = path::option_(ty_marshal);

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = where_clause(info, ty_marshal);

    let getter_tokens = if info.attrs.getter {
        let getter_ = path::getter_(ty_marshal);
        quote! {
            #[inline]
            fn as_getter(&self) -> #option_<&dyn #getter_> {
                #option_::Some(self)
            }
        }
    } else {
        TokenStream::new()
    };

    let setter_tokens = if info.attrs.setter {
        let setter_ = path::setter_(ty_marshal);
        quote! {
            #[inline]
            fn as_setter(&mut self) -> #option_<&mut dyn #setter_> {
                #option_::Some(self)
            }
        }
    } else {
        TokenStream::new()
    };

    quote! {
        impl #impl_generics #marshal_ for #ident #ty_generics #where_clause {
            #[inline]
            fn value_ref(&self) -> #value_ref_<'_> {
                #value_ref_::Composite(self)
            }

            #[inline]
            fn value_mut(&mut self) -> #value_mut_<'_> {
                #value_mut_::Composite(self)
            }

            #getter_tokens

            #setter_tokens
        }
    }
}
