use serde_yaml::{Mapping, Number, Value};

use super::path::{NodePath, Segment};
use super::tag;
use crate::fields::FieldCache;
use crate::{Composite, DecodeError, DecodeErrorKind, Error, Marshal, ValueMut};

/// Walks nodes into native targets, in place.
///
/// # Rules
///
/// 1. **Setter**: a target whose [`Marshal::as_setter`] returns `Some` is
///    offered the node's tag and untagged value first. If it accepts, the
///    node is done.
/// 2. **Kind**: otherwise the node is dispatched against
///    [`Marshal::value_mut`]:
///    - null sets optionals to `None`, is stored by node targets and leaves
///      every other target unchanged;
///    - scalars are assigned with range checks;
///    - sequences replace the target's content;
///    - mappings insert entries into mapping targets and set the matching
///      fields of composite targets. Unknown keys are ignored, and fields
///      without a key keep their value.
///
/// Tags are ignored by the default rules, except for node targets which
/// keep the node verbatim.
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::FieldCache;
/// use ty_marshal::walk::Decoder;
/// use ty_marshal::{Marshal, Value};
///
/// #[derive(Marshal, Default)]
/// pub struct Server {
///     pub host: String,
///     pub port: u16,
/// }
///
/// let cache = FieldCache::new();
/// let node: Value = serde_yaml::from_str("{host: db, extra: 1}").unwrap();
/// let mut server = Server { host: String::new(), port: 5432 };
///
/// Decoder::new(&cache).unmarshal(&node, &mut server).unwrap();
/// assert_eq!(server.host, "db");
/// assert_eq!(server.port, 5432);
/// ```
pub struct Decoder<'a> {
    cache: &'a FieldCache,
    path: NodePath,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder resolving field sets through `cache`.
    #[inline]
    pub const fn new(cache: &'a FieldCache) -> Self {
        Self {
            cache,
            path: NodePath::new(),
        }
    }

    /// Decodes `node` into `target`.
    ///
    /// On error, `target` may be partially updated.
    ///
    /// # Errors
    ///
    /// - [`DecodeError`] if a node does not fit its target.
    /// - [`ConfigError`](crate::ConfigError) if a composite reached has an
    ///   invalid field set.
    ///
    /// # Panics
    ///
    /// If a composite cannot resolve the index of one of its visible fields.
    pub fn unmarshal(&mut self, node: &Value, target: &mut dyn Marshal) -> Result<(), Error> {
        if let Some(setter) = target.as_setter() {
            if setter.set_yaml(&tag::resolved(node), tag::untagged(node)) {
                log::trace!("node at `{}` taken by a setter", self.path);
                return Ok(());
            }
            log::trace!("setter at `{}` declined, decoding by default", self.path);
        }

        self.decode(node, target)
    }

    fn decode(&mut self, node: &Value, target: &mut dyn Marshal) -> Result<(), Error> {
        let type_name = target.type_name();
        let inner = tag::untagged(node);

        let slot = target.value_mut();
        let expected = slot.kind_name();

        match slot {
            ValueMut::Node(slot) => *slot = node.clone(),
            ValueMut::Optional(slot) => {
                if inner.is_null() {
                    slot.set_none();
                } else {
                    self.unmarshal(node, slot.get_or_insert_default())?;
                }
            }
            _ if inner.is_null() => {
                log::trace!("null left `{type_name}` at `{}` unchanged", self.path);
            }
            ValueMut::Bool(slot) => match inner {
                Value::Bool(value) => *slot = *value,
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Int(slot) => match inner {
                Value::Number(number) if !number.is_f64() => {
                    if !integral(number).is_some_and(|value| slot.set_int(value)) {
                        return Err(self.out_of_range(type_name, number));
                    }
                }
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Float(slot) => match inner {
                Value::Number(number) => {
                    if !number.as_f64().is_some_and(|value| slot.set_float(value)) {
                        return Err(self.out_of_range(type_name, number));
                    }
                }
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Str(slot) => match inner {
                Value::String(value) => slot.clone_from(value),
                Value::Bool(value) => *slot = value.to_string(),
                Value::Number(value) => *slot = value.to_string(),
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Sequence(slot) => match inner {
                Value::Sequence(items) => {
                    slot.clear();
                    for (index, item) in items.iter().enumerate() {
                        let element = slot.push_default();
                        self.child(Segment::Index(index), |this| this.unmarshal(item, element))?;
                    }
                }
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Mapping(slot) => match inner {
                Value::Mapping(entries) => {
                    for (key, value) in entries {
                        slot.insert_with(&mut |key_slot: &mut dyn Marshal,
                                               value_slot: &mut dyn Marshal| {
                            self.unmarshal(key, key_slot)?;
                            let segment = Segment::Key(tag::key_text(key));
                            self.child(segment, |this| this.unmarshal(value, value_slot))
                        })?;
                    }
                }
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
            ValueMut::Composite(slot) => match inner {
                Value::Mapping(entries) => self.decode_composite(entries, slot)?,
                _ => return Err(self.mismatch(type_name, expected, inner)),
            },
        }

        Ok(())
    }

    fn decode_composite(
        &mut self,
        entries: &Mapping,
        target: &mut dyn Composite,
    ) -> Result<(), Error> {
        let fields = self.cache.resolve(target)?;

        for (key, value) in entries {
            let Some(info) = tag::untagged(key).as_str().and_then(|key| fields.get(key)) else {
                log::trace!(
                    "unknown key `{}` of `{}` at `{}` ignored",
                    tag::key_text(key),
                    fields.owner(),
                    self.path,
                );
                continue;
            };

            let Some(field) = target.field_mut(info.index()) else {
                panic!(
                    "field `{}` (index {}) of `{}` cannot be resolved",
                    info.key(),
                    info.index(),
                    fields.owner(),
                );
            };

            let segment = Segment::Key(info.key().to_owned());
            self.child(segment, |this| this.unmarshal(value, field))?;
        }

        Ok(())
    }

    fn child(
        &mut self,
        segment: Segment,
        func: impl FnOnce(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.path.push(segment);
        let result = func(self);
        self.path.pop();
        result
    }

    fn error(&self, type_name: &'static str, kind: DecodeErrorKind) -> Error {
        Error::Decode(DecodeError {
            path: self.path.to_string(),
            type_name,
            kind,
        })
    }

    fn mismatch(&self, type_name: &'static str, expected: &'static str, found: &Value) -> Error {
        let found = tag::describe(found);
        self.error(type_name, DecodeErrorKind::Mismatch { expected, found })
    }

    fn out_of_range(&self, type_name: &'static str, number: &Number) -> Error {
        let value = number.to_string();
        self.error(type_name, DecodeErrorKind::OutOfRange { value })
    }
}

impl Default for Decoder<'static> {
    /// A decoder using [`FieldCache::global`].
    #[inline]
    fn default() -> Self {
        Self::new(FieldCache::global())
    }
}

/// The value of an integral number.
fn integral(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde_yaml::Value;

    use super::Decoder;
    use crate::fields::FieldCache;
    use crate::{DecodeError, DecodeErrorKind, Error, Marshal, Setter};

    #[derive(Marshal, Default, Debug, PartialEq)]
    pub struct Item {
        pub name: String,
        pub count: u8,
        pub ratio: f32,
        pub enabled: bool,
    }

    #[derive(Marshal, Default, Debug, PartialEq)]
    pub struct Order {
        pub id: u64,
        pub items: Vec<Item>,
        pub notes: Option<String>,
        pub labels: BTreeMap<String, i32>,
        pub extra: Value,
    }

    #[derive(Marshal, Default, Debug, PartialEq)]
    #[marshal(setter)]
    pub struct Seen {
        pub tag: String,
        pub value: String,
    }

    impl Setter for Seen {
        fn set_yaml(&mut self, tag: &str, value: &Value) -> bool {
            if value.is_mapping() {
                return false;
            }
            self.tag = tag.to_owned();
            self.value = format!("{value:?}");
            true
        }
    }

    fn decode(text: &str, target: &mut dyn Marshal) -> Result<(), Error> {
        let node: Value = serde_yaml::from_str(text).unwrap();
        Decoder::new(&FieldCache::new()).unmarshal(&node, target)
    }

    fn decode_error(text: &str, target: &mut dyn Marshal) -> DecodeError {
        match decode(text, target) {
            Err(Error::Decode(err)) => err,
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn nested_document() {
        let mut order = Order::default();
        let text = "
id: 7
items:
  - {name: bolt, count: 3, ratio: 0.5, enabled: true}
  - {name: nut}
notes: fragile
labels: {a: 1, b: -2}
extra: [1, two]
";
        decode(text, &mut order).unwrap();

        assert_eq!(order.id, 7);
        assert_eq!(order.items.len(), 2);
        assert_eq!(
            order.items[0],
            Item {
                name: "bolt".into(),
                count: 3,
                ratio: 0.5,
                enabled: true
            }
        );
        assert_eq!(order.items[1].name, "nut");
        assert_eq!(order.notes.as_deref(), Some("fragile"));
        assert_eq!(order.labels, BTreeMap::from([("a".into(), 1), ("b".into(), -2)]));
        assert_eq!(order.extra[1], Value::from("two"));
    }

    #[test]
    fn sequences_replace_and_maps_merge() {
        let mut order = Order {
            items: vec![Item {
                name: "old".into(),
                ..Default::default()
            }],
            labels: BTreeMap::from([("keep".into(), 1), ("b".into(), 0)]),
            ..Default::default()
        };

        decode("{items: [], labels: {b: 5}}", &mut order).unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.labels, BTreeMap::from([("keep".into(), 1), ("b".into(), 5)]));
    }

    #[test]
    fn null_handling() {
        let mut order = Order {
            id: 9,
            notes: Some("x".into()),
            extra: Value::from(1),
            ..Default::default()
        };
        decode("{id: ~, notes: ~, extra: ~}", &mut order).unwrap();

        assert_eq!(order.id, 9);
        assert_eq!(order.notes, None);
        assert_eq!(order.extra, Value::Null);
    }

    #[test]
    fn scalar_coercions() {
        let mut text = String::new();
        decode("12", &mut text).unwrap();
        assert_eq!(text, "12");
        decode("true", &mut text).unwrap();
        assert_eq!(text, "true");

        let mut float = 0.0_f64;
        decode("3", &mut float).unwrap();
        assert_eq!(float, 3.0);

        let mut map: HashMap<u8, bool> = HashMap::new();
        decode("{1: true, 2: false}", &mut map).unwrap();
        assert_eq!(map, HashMap::from([(1, true), (2, false)]));
    }

    #[test]
    fn mismatches_carry_the_path() {
        let mut order = Order::default();
        let err = decode_error("items: [{name: a}, {}, {count: many}]", &mut order);

        assert_eq!(err.path, "items[2].count");
        assert_eq!(err.type_name, "u8");
        assert_eq!(
            err.kind,
            DecodeErrorKind::Mismatch {
                expected: "integer",
                found: "string `many`".into(),
            }
        );

        let mut flag = false;
        let err = decode_error("yes", &mut flag);
        assert_eq!(err.path, ".");
        assert!(matches!(err.kind, DecodeErrorKind::Mismatch { expected: "bool", .. }));

        let mut count = 0_u32;
        let err = decode_error("1.0", &mut count);
        assert!(matches!(err.kind, DecodeErrorKind::Mismatch { expected: "integer", .. }));

        let err = decode_error("items: {a: 1}", &mut order);
        assert_eq!(err.path, "items");
        assert!(matches!(err.kind, DecodeErrorKind::Mismatch { expected: "sequence", .. }));

        let err = decode_error("items: [3]", &mut order);
        assert_eq!(err.path, "items[0]");
        assert!(matches!(err.kind, DecodeErrorKind::Mismatch { expected: "struct", .. }));
    }

    #[test]
    fn out_of_range() {
        let mut order = Order::default();
        let err = decode_error("items: [{count: 300}]", &mut order);
        assert_eq!(err.path, "items[0].count");
        assert_eq!(err.kind, DecodeErrorKind::OutOfRange { value: "300".into() });

        let mut single = 0.0_f32;
        let err = decode_error("1.0e300", &mut single);
        assert!(matches!(err.kind, DecodeErrorKind::OutOfRange { .. }));

        let mut unsigned = 0_u64;
        let err = decode_error("-1", &mut unsigned);
        assert_eq!(err.kind, DecodeErrorKind::OutOfRange { value: "-1".into() });
    }

    #[test]
    fn setter_sees_tags() {
        let mut seen = Seen::default();

        decode("!celsius 21", &mut seen).unwrap();
        assert_eq!(seen.tag, "!celsius");
        assert_eq!(seen.value, format!("{:?}", Value::from(21)));

        decode("[]", &mut seen).unwrap();
        assert_eq!(seen.tag, "!!seq");

        decode("{tag: t, value: v}", &mut seen).unwrap();
        assert_eq!(seen, Seen { tag: "t".into(), value: "v".into() });

        let mut list: Vec<Option<Seen>> = Vec::new();
        decode("[~, hi]", &mut list).unwrap();
        assert_eq!(list[0], None);
        assert_eq!(list[1].as_ref().unwrap().tag, "!!str");
    }
}
