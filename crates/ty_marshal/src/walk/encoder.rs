use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

use super::path::{NodePath, Segment};
use super::tag;
use crate::fields::FieldCache;
use crate::zero::is_zero;
use crate::{Composite, EncodeError, Error, Marshal, ValueRef};

/// Walks native values into nodes.
///
/// # Rules
///
/// 1. **Getter**: a value whose [`Marshal::as_getter`] returns `Some` is
///    replaced by the substitute from [`Getter::get_yaml`], which is then
///    encoded with the rules below only.
/// 2. **Kind**: otherwise the value is dispatched on [`Marshal::value_ref`]:
///    scalars become scalar nodes, sequences and mappings recurse per
///    element, and composites emit their fields in declaration order,
///    skipping conditional fields that hold a zero value.
/// 3. **Tag**: a non-empty tag that differs from the node's resolved tag is
///    attached to the node.
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::FieldCache;
/// use ty_marshal::walk::Encoder;
/// use ty_marshal::{Marshal, Value};
///
/// #[derive(Marshal)]
/// pub struct Server {
///     pub host: String,
///     pub ports: Vec<u16>,
/// }
///
/// let cache = FieldCache::new();
/// let server = Server { host: "db".into(), ports: vec![5432] };
///
/// let node = Encoder::new(&cache).marshal("", &server).unwrap();
/// assert_eq!(node["host"], Value::from("db"));
/// assert_eq!(node["ports"][0], Value::from(5432));
/// ```
///
/// [`Getter::get_yaml`]: crate::Getter::get_yaml
pub struct Encoder<'a> {
    cache: &'a FieldCache,
    path: NodePath,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder resolving field sets through `cache`.
    #[inline]
    pub const fn new(cache: &'a FieldCache) -> Self {
        Self {
            cache,
            path: NodePath::new(),
        }
    }

    /// Encodes `value`, tagged with `tag` unless it is empty.
    ///
    /// # Errors
    ///
    /// - [`ConfigError`](crate::ConfigError) if a composite reached has an
    ///   invalid field set.
    /// - [`EncodeError::InvalidTag`] if a tag is made only of `!`.
    ///
    /// # Panics
    ///
    /// If a composite cannot resolve the index of one of its visible fields.
    pub fn marshal(&mut self, tag: &str, value: &dyn Marshal) -> Result<Value, Error> {
        if let Some(getter) = value.as_getter() {
            let (substitute_tag, substitute) = getter.get_yaml();
            log::trace!("`{}` at `{}` replaced by its getter", value.type_name(), self.path);

            let tag = if substitute_tag.is_empty() { tag } else { substitute_tag.as_str() };
            let node = self.encode(substitute.value_ref())?;
            return self.tagged(tag, node);
        }

        let node = self.encode(value.value_ref())?;
        self.tagged(tag, node)
    }

    fn encode(&mut self, value: ValueRef<'_>) -> Result<Value, Error> {
        Ok(match value {
            ValueRef::Bool(value) => Value::Bool(value),
            ValueRef::Int(value) => Value::Number(value.into()),
            ValueRef::Uint(value) => Value::Number(value.into()),
            ValueRef::Float(value) => Value::Number(value.into()),
            ValueRef::Str(value) => Value::String(value.to_owned()),
            ValueRef::Optional(None) => Value::Null,
            ValueRef::Optional(Some(value)) => self.marshal("", value)?,
            ValueRef::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for (index, item) in seq.iter().enumerate() {
                    items.push(self.child(Segment::Index(index), |this| this.marshal("", item))?);
                }
                Value::Sequence(items)
            }
            ValueRef::Mapping(map) => {
                let mut entries = Mapping::with_capacity(map.len());
                for (key, value) in map.entries() {
                    let key = self.marshal("", key)?;
                    let segment = Segment::Key(tag::key_text(&key));
                    let value = self.child(segment, |this| this.marshal("", value))?;
                    entries.insert(key, value);
                }
                Value::Mapping(entries)
            }
            ValueRef::Composite(value) => self.encode_composite(value)?,
            ValueRef::Node(node) => node.clone(),
        })
    }

    fn encode_composite(&mut self, value: &dyn Composite) -> Result<Value, Error> {
        let fields = self.cache.resolve(value)?;
        let mut entries = Mapping::with_capacity(fields.len());

        for info in fields.iter() {
            let Some(field) = value.field(info.index()) else {
                panic!(
                    "field `{}` (index {}) of `{}` cannot be resolved",
                    info.key(),
                    info.index(),
                    fields.owner(),
                );
            };

            let view = field.value_ref();
            if info.is_conditional() && is_zero(view) {
                log::trace!(
                    "zero {} field `{}` of `{}` omitted",
                    view.kind_name(),
                    info.key(),
                    fields.owner(),
                );
                continue;
            }

            let key = info.key().to_owned();
            let node = self.child(Segment::Key(key.clone()), |this| this.marshal("", field))?;
            entries.insert(Value::String(key), node);
        }

        Ok(Value::Mapping(entries))
    }

    fn tagged(&self, tag: &str, node: Value) -> Result<Value, Error> {
        if tag.is_empty() || tag == tag::resolved(&node) {
            return Ok(node);
        }
        if tag.trim_start_matches('!').is_empty() {
            return Err(EncodeError::InvalidTag {
                tag: tag.to_owned(),
                path: self.path.to_string(),
            }
            .into());
        }

        let value = match node {
            Value::Tagged(tagged) => tagged.value,
            node => node,
        };
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }

    fn child<R>(
        &mut self,
        segment: Segment,
        func: impl FnOnce(&mut Self) -> Result<R, Error>,
    ) -> Result<R, Error> {
        self.path.push(segment);
        let result = func(self);
        self.path.pop();
        result
    }
}

impl Default for Encoder<'static> {
    /// An encoder using [`FieldCache::global`].
    #[inline]
    fn default() -> Self {
        Self::new(FieldCache::global())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_yaml::Value;

    use super::Encoder;
    use crate::fields::FieldCache;
    use crate::{EncodeError, Error, Getter, Marshal};

    #[derive(Marshal, Default)]
    pub struct Point {
        #[marshal("x")]
        pub x: i64,
        #[marshal("y,c")]
        pub y: i64,
    }

    #[derive(Marshal, Default)]
    pub struct Shape {
        pub name: String,
        #[marshal(",c")]
        pub points: Vec<Point>,
        #[marshal("origin,c")]
        pub origin: Point,
        #[marshal("meta,c")]
        pub meta: BTreeMap<String, Option<u8>>,
    }

    #[derive(Marshal, Default)]
    #[marshal(getter)]
    pub struct Tagged {
        tag: &'static str,
    }

    impl Getter for Tagged {
        fn get_yaml(&self) -> (String, Box<dyn Marshal>) {
            (self.tag.to_owned(), Box::new(String::from("v")))
        }
    }

    /// Substitutes a value of its own type.
    #[derive(Marshal, Default)]
    #[marshal(getter)]
    pub struct Loop {
        pub n: u32,
    }

    impl Getter for Loop {
        fn get_yaml(&self) -> (String, Box<dyn Marshal>) {
            ("!loop".to_owned(), Box::new(Loop { n: self.n + 1 }))
        }
    }

    fn encode(value: &dyn Marshal) -> Result<Value, Error> {
        Encoder::new(&FieldCache::new()).marshal("", value)
    }

    #[test]
    fn composite_fields_in_order() {
        let node = encode(&Point { x: 3, y: 4 }).unwrap();
        let keys: Vec<_> = node.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, [Value::from("x"), Value::from("y")]);
    }

    #[test]
    fn conditional_omission_does_not_recurse_into_structs() {
        let node = encode(&Shape::default()).unwrap();
        let map = node.as_mapping().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(node["name"], Value::from(""));
        // `origin` is all zeros but still emitted; its own `y` is omitted.
        assert_eq!(node["origin"]["x"], Value::from(0));
        assert!(node["origin"].get("y").is_none());
        assert!(node.get("points").is_none());
        assert!(node.get("meta").is_none());
    }

    #[test]
    fn nested_containers() {
        let shape = Shape {
            points: vec![Point { x: 1, y: 0 }, Point { x: 2, y: 5 }],
            meta: BTreeMap::from([("a".to_owned(), None), ("b".to_owned(), Some(1))]),
            ..Default::default()
        };
        let node = encode(&shape).unwrap();

        assert_eq!(node["points"][1]["y"], Value::from(5));
        assert_eq!(node["meta"]["a"], Value::Null);
        assert_eq!(node["meta"]["b"], Value::from(1));
    }

    #[test]
    fn getter_tags() {
        let plain = encode(&Tagged { tag: "" }).unwrap();
        assert_eq!(plain, Value::from("v"));

        let same = encode(&Tagged { tag: "!!str" }).unwrap();
        assert_eq!(same, Value::from("v"));

        let custom = encode(&Tagged { tag: "!label" }).unwrap();
        let Value::Tagged(tagged) = custom else {
            panic!("expected a tagged node");
        };
        assert_eq!(tagged.tag.to_string(), "!label");
        assert_eq!(tagged.value, Value::from("v"));
    }

    #[test]
    fn substitute_skips_its_own_getter() {
        let Value::Tagged(tagged) = encode(&Loop { n: 1 }).unwrap() else {
            panic!("expected a tagged node");
        };
        assert_eq!(tagged.tag.to_string(), "!loop");
        assert_eq!(tagged.value["n"], Value::from(2));

        let node = encode(&vec![Loop { n: 1 }, Loop { n: 5 }]).unwrap();
        let items = node.as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        for (item, n) in items.iter().zip([2, 6]) {
            let Value::Tagged(tagged) = item else {
                panic!("expected a tagged node");
            };
            assert_eq!(tagged.tag.to_string(), "!loop");
            assert_eq!(tagged.value, serde_yaml::from_str::<Value>(&format!("n: {n}")).unwrap());
        }
    }

    #[test]
    fn bare_bang_is_an_invalid_tag() {
        let err = encode(&vec![Tagged { tag: "!" }]).unwrap_err();
        assert_eq!(
            err,
            Error::Encode(EncodeError::InvalidTag {
                tag: "!".into(),
                path: "[0]".into(),
            })
        );
    }
}
