//! Type-directed conversion between native values and the YAML node tree.
//!
//! Values are walked through the [`Marshal`] trait. Composite (struct-like)
//! types describe their fields through [`Composite`]; the resulting
//! [`FieldSet`](fields::FieldSet) is validated and cached once per type by a
//! [`FieldCache`](fields::FieldCache), then reused by every later walk.
//!
//! ## Menu
//!
//! - [`marshal`] / [`unmarshal`]: bytes in, bytes out, through the global cache.
//! - [`to_node`] / [`from_node`]: the same walk without a textual format.
//! - [`Marshaller`]: entry points with an injected cache or another [`Format`].
//! - [`derive::Marshal`]: derives [`Marshal`] and [`Composite`] for named structs.
//! - [`Getter`] / [`Setter`]: per-type overrides of the default walk.
//! - [`DynamicComposite`](ops::DynamicComposite): a record built at runtime.
//!
//! ## Field annotations
//!
//! ```
//! use ty_marshal::{Marshal, marshal};
//!
//! #[derive(Marshal, Default)]
//! pub struct Point {
//!     #[marshal("x")]
//!     pub x: i64,
//!     // `c`: omitted while zero.
//!     #[marshal("y,c")]
//!     pub y: i64,
//!     // Private fields are never marshaled.
//!     hidden: u8,
//! }
//!
//! assert_eq!(marshal(&Point::default()).unwrap(), b"x: 0\n");
//! ```
//!
//! Without an annotation the key is the field name in lowercase.
//!
//! ## Limitations
//!
//! Cyclic values (e.g. through shared pointers) are not detected and recurse
//! without bound.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code names `ty_marshal`; this alias lets the crate's own tests and
// internal types go through the same path.
extern crate self as ty_marshal;

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod error;
mod hash;
mod hooks;
mod impls;
mod value;

pub mod fields;
pub mod format;
pub mod ops;
pub mod walk;
pub mod zero;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use driver::{Marshaller, from_node, marshal, to_node, unmarshal};
pub use error::{ConfigError, DecodeError, DecodeErrorKind, EncodeError, Error, ParseError};
pub use format::{Format, Yaml};
pub use hooks::{Getter, Setter};
pub use ops::Composite;
pub use value::{Marshal, ValueMut, ValueRef};

pub use serde_yaml::Value;
pub use ty_marshal_derive as derive;
pub use ty_marshal_derive::Marshal;

#[cfg(feature = "json")]
pub use format::Json;
