use serde_yaml::Value;

use crate::{Marshal, ValueMut, ValueRef};

// The "any" target: encodes as itself, decodes by keeping the node verbatim.
impl Marshal for Value {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Node(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Node(self)
    }
}
