//! See following macros:
//!
//! - [`Marshal`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MARSHAL_ATTRIBUTE_NAME: &str = "marshal";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Marshal Derivation
///
/// `#[derive(Marshal)]` implements `Marshal` and `Composite` for a struct
/// with named fields. Tuple structs, unit structs, enums and unions are
/// rejected.
///
/// ## Field annotations
///
/// A field may carry one string annotation: `"key,flag,flag"`.
///
/// ```rust, ignore
/// #[derive(Marshal)]
/// pub struct Point {
///     #[marshal("x")]
///     pub x: i64,
///     #[marshal("y,c")]
///     pub y: i64,
///     #[marshal(",c")]
///     pub label: String,
/// }
/// ```
///
/// The annotation is recorded as written and validated the first time the
/// type is marshaled, so a bad annotation is a runtime `ConfigError`.
///
/// Only fields with an explicit visibility (`pub`, `pub(crate)`, ...) are
/// marshaled. Private fields are declared but never read or written, and
/// need not implement `Marshal`.
///
/// ## Hooks
///
/// `getter` and `setter` route the type through its `Getter` and `Setter`
/// implementations, which must be written by hand:
///
/// ```rust, ignore
/// #[derive(Marshal)]
/// #[marshal(getter, setter)]
/// pub struct Version {
///     pub major: u32,
///     pub minor: u32,
/// }
///
/// impl Getter for Version { /* ... */ }
/// impl Setter for Version { /* ... */ }
/// ```
///
/// ## Generics
///
/// Type parameters must be `Send + Sync + 'static`, and every visible field
/// type must implement `Marshal`. Both bounds are added to the generated
/// impls.
#[proc_macro_derive(Marshal, attributes(marshal))]
pub fn derive_marshal(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let marshal_struct = match derive_data::MarshalStruct::from_derive_input(&ast) {
        Ok(info) => info,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_struct(&marshal_struct).into()
}
