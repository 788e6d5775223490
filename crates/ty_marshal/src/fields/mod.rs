//! Field descriptors of composite types and their process-wide cache.
//!
//! ## Menu
//!
//! - [`TypeIdent`]: the printable name of a composite type.
//! - [`FieldDecl`]: a field as declared (name, annotation, visibility).
//! - [`FieldInfo`]: a resolved, serializable field (key, index, flags).
//! - [`FieldSet`]: all [`FieldInfo`]s of one type, by key and in order.
//! - [`FieldCache`]: builds each [`FieldSet`] once and shares it.
//!
//! ## Annotations
//!
//! A field annotation is `key[,flags]`. The part after the last `,` is a set
//! of flag characters; `c` (conditional) is the only one recognized, and
//! omits the field while it holds a zero value (see [`crate::zero`]).
//! An empty key (`",c"`), like a missing annotation, falls back to the field
//! name in lowercase.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod field_info;
mod ident;
mod tag;

// -----------------------------------------------------------------------------
// Exports

pub use cache::FieldCache;
pub use field_info::{FieldInfo, FieldSet};
pub use ident::{FieldDecl, TypeIdent};
