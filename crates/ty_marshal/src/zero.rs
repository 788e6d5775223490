//! The zero-value classifier behind conditional (`c`) fields.
//!
//! | kind                  | zero when        |
//! |-----------------------|------------------|
//! | string                | empty            |
//! | sequence, mapping     | no elements      |
//! | optional              | absent           |
//! | node                  | null             |
//! | integer (any sign)    | `0`              |
//! | bool                  | `false`          |
//! | float, struct         | never            |
//!
//! Structs are never zero, even when all of their fields are: omission is
//! controlled by the fields inside them.

use serde_yaml::Value;

use crate::ValueRef;

/// Whether `value` is the zero value of its kind.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Marshal, zero::is_zero};
///
/// assert!(is_zero(0_u16.value_ref()));
/// assert!(is_zero(String::new().value_ref()));
/// assert!(is_zero(None::<i32>.value_ref()));
/// assert!(!is_zero(Some(0).value_ref()));
/// assert!(!is_zero(0.0_f64.value_ref()));
/// ```
pub fn is_zero(value: ValueRef<'_>) -> bool {
    match value {
        ValueRef::Bool(value) => !value,
        ValueRef::Int(value) => value == 0,
        ValueRef::Uint(value) => value == 0,
        ValueRef::Str(value) => value.is_empty(),
        ValueRef::Optional(value) => value.is_none(),
        ValueRef::Sequence(value) => value.is_empty(),
        ValueRef::Mapping(value) => value.is_empty(),
        ValueRef::Node(value) => matches!(value, Value::Null),
        ValueRef::Float(_) | ValueRef::Composite(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_yaml::Value;

    use super::is_zero;
    use crate::fields::FieldDecl;
    use crate::ops::DynamicComposite;
    use crate::Marshal;

    #[test]
    fn containers() {
        assert!(is_zero(Vec::<u8>::new().value_ref()));
        assert!(!is_zero(vec![0_u8].value_ref()));
        assert!(is_zero(BTreeMap::<String, u8>::new().value_ref()));
        assert!(!is_zero(BTreeMap::from([(String::new(), 0_u8)]).value_ref()));
    }

    #[test]
    fn scalars_and_nodes() {
        assert!(is_zero(false.value_ref()));
        assert!(!is_zero(true.value_ref()));
        assert!(is_zero(0_i8.value_ref()));
        assert!(!is_zero((-1_i64).value_ref()));
        assert!(is_zero(Value::Null.value_ref()));
        assert!(!is_zero(Value::Bool(false).value_ref()));
        assert!(is_zero(Box::new(0_u32).value_ref()));
    }

    #[test]
    fn structs_are_never_zero() {
        let empty = DynamicComposite::new();
        assert!(!is_zero(empty.value_ref()));

        let zeroed = DynamicComposite::new().with_field(FieldDecl::dynamic("n", None::<&str>), 0_u8);
        assert!(!is_zero(zeroed.value_ref()));
    }
}
