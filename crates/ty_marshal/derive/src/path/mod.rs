//! Paths named by generated code, kept in one place so that moving an item
//! in `ty_marshal` only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `ty_marshal` crate.
///
/// 1. For crates that depend on `ty_marshal`, `::ty_marshal` is returned.
/// 2. For crates that depend on `tyaml`, `::tyaml::marshal` is returned.
/// 3. For other situations, `::ty_marshal` is returned, which may be incorrect.
///
/// This reads the invoking crate's manifest, so the path is computed once
/// per derive and passed down.
pub(crate) fn ty_marshal() -> syn::Path {
    ty_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ty_marshal"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn marshal_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::Marshal }
}

#[inline(always)]
pub(crate) fn composite_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::Composite }
}

#[inline(always)]
pub(crate) fn getter_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::Getter }
}

#[inline(always)]
pub(crate) fn setter_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::Setter }
}

#[inline(always)]
pub(crate) fn value_ref_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::ValueRef }
}

#[inline(always)]
pub(crate) fn value_mut_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::ValueMut }
}

#[inline(always)]
pub(crate) fn type_ident_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::fields::TypeIdent }
}

#[inline(always)]
pub(crate) fn field_decl_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::fields::FieldDecl }
}

// -----------------------------------------------------------------------------
// Re-exports

#[inline(always)]
pub(crate) fn cow_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::__macro_exports::Cow }
}

#[inline(always)]
pub(crate) fn option_(ty_marshal: &syn::Path) -> TokenStream {
    quote! { #ty_marshal::__macro_exports::Option }
}
