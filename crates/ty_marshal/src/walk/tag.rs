use std::borrow::Cow;

use serde_yaml::Value;

pub(super) const NULL: &str = "!!null";
pub(super) const BOOL: &str = "!!bool";
pub(super) const INT: &str = "!!int";
pub(super) const FLOAT: &str = "!!float";
pub(super) const STR: &str = "!!str";
pub(super) const SEQ: &str = "!!seq";
pub(super) const MAP: &str = "!!map";

/// Returns the explicit tag of `node`, or the tag its kind resolves to.
pub(super) fn resolved(node: &Value) -> Cow<'static, str> {
    Cow::Borrowed(match node {
        Value::Null => NULL,
        Value::Bool(_) => BOOL,
        Value::Number(number) if number.is_f64() => FLOAT,
        Value::Number(_) => INT,
        Value::String(_) => STR,
        Value::Sequence(_) => SEQ,
        Value::Mapping(_) => MAP,
        Value::Tagged(tagged) => return Cow::Owned(tagged.tag.to_string()),
    })
}

/// Strips the tags around `node`.
pub(super) fn untagged(mut node: &Value) -> &Value {
    while let Value::Tagged(tagged) = node {
        node = &tagged.value;
    }
    node
}

/// Describes an untagged node in a decode error.
pub(super) fn describe(node: &Value) -> String {
    match node {
        Value::Null => "null".to_owned(),
        Value::Bool(value) => format!("bool `{value}`"),
        Value::Number(value) if value.is_f64() => format!("float `{value}`"),
        Value::Number(value) => format!("integer `{value}`"),
        Value::String(value) => format!("string `{value}`"),
        Value::Sequence(_) => "sequence".to_owned(),
        Value::Mapping(_) => "mapping".to_owned(),
        Value::Tagged(tagged) => describe(&tagged.value),
    }
}

/// Renders a mapping key as a path segment.
pub(super) fn key_text(key: &Value) -> String {
    match untagged(key) {
        Value::String(key) => key.clone(),
        Value::Bool(key) => key.to_string(),
        Value::Number(key) => key.to_string(),
        Value::Null => "~".to_owned(),
        _ => "?".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;
    use serde_yaml::value::{Tag, TaggedValue};

    use super::{describe, key_text, resolved, untagged};

    fn tagged(tag: &str, value: Value) -> Value {
        Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        }))
    }

    #[test]
    fn resolved_tags() {
        assert_eq!(resolved(&Value::Null), "!!null");
        assert_eq!(resolved(&Value::from(1)), "!!int");
        assert_eq!(resolved(&Value::from(1.5)), "!!float");
        assert_eq!(resolved(&Value::from("a")), "!!str");
        assert_eq!(resolved(&Value::Sequence(Vec::new())), "!!seq");
        assert_eq!(resolved(&tagged("!point", Value::Null)), "!point");
    }

    #[test]
    fn untag_and_describe() {
        let node = tagged("!a", tagged("!b", Value::from(3)));
        assert_eq!(untagged(&node), &Value::from(3));
        assert_eq!(describe(&node), "integer `3`");
        assert_eq!(describe(&Value::from(true)), "bool `true`");
        assert_eq!(key_text(&tagged("!k", Value::from("name"))), "name");
        assert_eq!(key_text(&Value::Sequence(Vec::new())), "?");
    }
}
