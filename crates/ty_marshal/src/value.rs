use core::any::Any;
use core::fmt;

use serde_yaml::Value;

use crate::hooks::{Getter, Setter};
use crate::ops::{Composite, Float, Integer, Mapping, Optional, Sequence};

// -----------------------------------------------------------------------------
// Marshal

/// A value the traversal engine can walk.
///
/// The engine never inspects a value directly: it asks for a [`ValueRef`]
/// when encoding and a [`ValueMut`] when decoding, and dispatches on the
/// variant. Composite types are best implemented with
/// [`#[derive(Marshal)]`](crate::derive::Marshal), which also implements
/// [`Composite`].
///
/// # Hooks
///
/// [`as_getter`](Marshal::as_getter) and [`as_setter`](Marshal::as_setter)
/// return `None` by default. Types implementing [`Getter`] or [`Setter`]
/// override them to return `Some(self)` (the derive does this for
/// `#[marshal(getter)]` / `#[marshal(setter)]`).
///
/// # Examples
///
/// A manual implementation for a newtype that encodes as its inner text:
///
/// ```
/// use ty_marshal::{Marshal, ValueMut, ValueRef, marshal};
///
/// pub struct Label(String);
///
/// impl Marshal for Label {
///     fn value_ref(&self) -> ValueRef<'_> {
///         ValueRef::Str(&self.0)
///     }
///
///     fn value_mut(&mut self) -> ValueMut<'_> {
///         ValueMut::Str(&mut self.0)
///     }
/// }
///
/// assert_eq!(marshal(&Label("hello".into())).unwrap(), b"hello\n");
/// ```
pub trait Marshal: Any + Send + Sync {
    /// Returns a read view of the value for encoding.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Returns a write view of the value for decoding.
    fn value_mut(&mut self) -> ValueMut<'_>;

    /// Returns the [`Getter`] of this type, if it overrides encoding.
    #[inline]
    fn as_getter(&self) -> Option<&dyn Getter> {
        None
    }

    /// Returns the [`Setter`] of this type, if it overrides decoding.
    #[inline]
    fn as_setter(&mut self) -> Option<&mut dyn Setter> {
        None
    }

    /// Returns the name of the underlying type, used in error messages.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Marshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Marshal<{}>", self.type_name())
    }
}

// -----------------------------------------------------------------------------
// ValueRef

/// An immutable, kind-tagged view of a [`Marshal`] value.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// A nullable value; `None` encodes as null.
    Optional(Option<&'a dyn Marshal>),
    Sequence(&'a dyn Sequence),
    Mapping(&'a dyn Mapping),
    Composite(&'a dyn Composite),
    /// An already generic node, emitted as is.
    Node(&'a Value),
}

impl ValueRef<'_> {
    /// Returns the name of this kind, as used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Uint(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Optional(_) => "optional",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Composite(_) => "struct",
            Self::Node(_) => "node",
        }
    }
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable, kind-tagged view of a [`Marshal`] value.
pub enum ValueMut<'a> {
    Bool(&'a mut bool),
    Int(&'a mut dyn Integer),
    Float(&'a mut dyn Float),
    Str(&'a mut String),
    Optional(&'a mut dyn Optional),
    Sequence(&'a mut dyn Sequence),
    Mapping(&'a mut dyn Mapping),
    Composite(&'a mut dyn Composite),
    /// Accepts any node verbatim.
    Node(&'a mut Value),
}

impl ValueMut<'_> {
    /// Returns the name of this kind, as used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Optional(_) => "optional",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Composite(_) => "struct",
            Self::Node(_) => "node",
        }
    }
}
