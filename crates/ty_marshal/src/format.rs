//! Textual formats: bytes to node trees and back.
//!
//! The traversal engine only sees [`Value`] trees. A [`Format`] is the
//! parser/emitter pair the entry points hand those trees to.
//!
//! - [`Yaml`]: YAML 1.2 through `serde_yaml` (the default).
//! - [`Json`]: JSON through `serde_json` (feature `json`).

use serde_yaml::Value;

use crate::{EncodeError, ParseError};

/// A parser/emitter pair for one textual format.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Format, Value, Yaml};
///
/// let node = Yaml.parse(b"a: [1, 2]").unwrap();
/// assert_eq!(node["a"][1], Value::from(2));
/// assert_eq!(Yaml.render(&node).unwrap(), b"a:\n- 1\n- 2\n");
/// ```
pub trait Format {
    /// Parses one document.
    fn parse(&self, input: &[u8]) -> Result<Value, ParseError>;

    /// Renders `node` as one document.
    fn render(&self, node: &Value) -> Result<Vec<u8>, EncodeError>;
}

impl<F: Format + ?Sized> Format for &F {
    #[inline]
    fn parse(&self, input: &[u8]) -> Result<Value, ParseError> {
        (**self).parse(input)
    }

    #[inline]
    fn render(&self, node: &Value) -> Result<Vec<u8>, EncodeError> {
        (**self).render(node)
    }
}

// -----------------------------------------------------------------------------
// Yaml

/// YAML 1.2, backed by `serde_yaml`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Yaml;

impl Format for Yaml {
    fn parse(&self, input: &[u8]) -> Result<Value, ParseError> {
        serde_yaml::from_slice(input).map_err(|err| {
            let located = err.location().map(|at| (at.line(), at.column()));
            let parsed = ParseError::new(err.to_string());
            match located {
                Some((line, column)) => parsed.with_location(line, column),
                None => parsed,
            }
        })
    }

    fn render(&self, node: &Value) -> Result<Vec<u8>, EncodeError> {
        serde_yaml::to_string(node)
            .map(String::into_bytes)
            .map_err(|err| EncodeError::Render(err.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Json

/// JSON, backed by `serde_json`.
///
/// Tags have no JSON form and are dropped on render.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Json, Marshal, Marshaller};
///
/// #[derive(Marshal, Default, Debug, PartialEq)]
/// pub struct Probe {
///     pub name: String,
///     pub ok: bool,
/// }
///
/// let json = Marshaller::new().with_format(Json);
/// let probe = Probe { name: "disk".into(), ok: true };
///
/// let bytes = json.marshal(&probe).unwrap();
/// assert_eq!(bytes, br#"{"name":"disk","ok":true}"#);
///
/// let mut back = Probe::default();
/// json.unmarshal(&bytes, &mut back).unwrap();
/// assert_eq!(back, probe);
/// ```
#[cfg(feature = "json")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Json;

#[cfg(feature = "json")]
impl Format for Json {
    fn parse(&self, input: &[u8]) -> Result<Value, ParseError> {
        serde_json::from_slice(input)
            .map_err(|err| ParseError::new(err.to_string()).with_location(err.line(), err.column()))
    }

    fn render(&self, node: &Value) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(&untag(node)).map_err(|err| EncodeError::Render(err.to_string()))
    }
}

/// Copies `node` without its tags.
#[cfg(feature = "json")]
fn untag(node: &Value) -> Value {
    match node {
        Value::Tagged(tagged) => untag(&tagged.value),
        Value::Sequence(items) => Value::Sequence(items.iter().map(untag).collect()),
        Value::Mapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, value)| (untag(key), untag(value)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::{Format, Yaml};

    #[test]
    fn yaml_parse_error_location() {
        let err = Yaml.parse(b"a: [1, 2\nb: 3\n").unwrap_err();
        assert!(err.location().is_some());
        assert!(!err.message().is_empty());
    }

    #[test]
    fn yaml_keeps_tags() {
        let node = Yaml.parse(b"!point {x: 1}").unwrap();
        assert!(matches!(node, Value::Tagged(_)));

        let rendered = Yaml.render(&node).unwrap();
        assert_eq!(Yaml.parse(&rendered).unwrap(), node);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_drops_tags() {
        use super::Json;

        let node = Yaml.parse(b"{a: !t [1, true]}").unwrap();
        assert_eq!(Json.render(&node).unwrap(), br#"{"a":[1,true]}"#);

        let err = Json.parse(b"{\"a\": }").unwrap_err();
        assert_eq!(err.location(), Some((1, 7)));
    }
}
