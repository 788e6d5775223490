//! Items `#[derive(Marshal)]` refers to by path.
//!
//! Generated code must not depend on what the deriving crate has in scope.

pub use std::borrow::Cow;

pub use core::option::Option::{self, None, Some};
