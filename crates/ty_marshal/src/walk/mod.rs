//! The traversal engine: native values to nodes and back.
//!
//! ## Menu
//!
//! - [`Encoder`]: walks a [`Marshal`](crate::Marshal) value into a node.
//! - [`Decoder`]: walks a node into a [`Marshal`](crate::Marshal) target.
//!
//! Both consult a [`FieldCache`](crate::fields::FieldCache) for composites
//! and the [`Getter`](crate::Getter) / [`Setter`](crate::Setter) hooks for
//! types overriding the default rules. Errors carry the path of the node
//! being processed, e.g. `items[2].name`.

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod path;
mod tag;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use encoder::Encoder;
