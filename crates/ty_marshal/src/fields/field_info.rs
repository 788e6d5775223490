use crate::fields::TypeIdent;
use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// FieldInfo

/// A serializable field of a composite type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    key: String,
    index: usize,
    conditional: bool,
}

impl FieldInfo {
    #[inline]
    pub(crate) fn new(key: String, index: usize, conditional: bool) -> Self {
        Self {
            key,
            index,
            conditional,
        }
    }

    /// Returns the key the field is serialized under.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the field's position among all declared fields.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the field is omitted while it holds a zero value.
    #[inline]
    pub const fn is_conditional(&self) -> bool {
        self.conditional
    }
}

// -----------------------------------------------------------------------------
// FieldSet

/// The resolved fields of one composite type.
///
/// Keys are unique. Iteration follows declaration order.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Marshal, fields::FieldCache};
///
/// #[derive(Marshal)]
/// pub struct Point {
///     #[marshal("x")]
///     pub x: i64,
///     #[marshal("y,c")]
///     pub y: i64,
/// }
///
/// let cache = FieldCache::new();
/// let fields = cache.resolve(&Point { x: 0, y: 0 }).unwrap();
///
/// assert_eq!(fields.len(), 2);
/// assert!(fields.get("y").unwrap().is_conditional());
/// assert_eq!(fields.iter().map(|f| f.key()).collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Clone, Debug)]
pub struct FieldSet {
    owner: TypeIdent,
    by_key: HashMap<String, usize>,
    ordered: Box<[FieldInfo]>,
}

impl FieldSet {
    /// # Validity
    /// `ordered` must not contain duplicated keys.
    pub(crate) fn new(owner: TypeIdent, ordered: Vec<FieldInfo>) -> Self {
        let by_key = ordered
            .iter()
            .enumerate()
            .map(|(slot, info)| (info.key.clone(), slot))
            .collect();
        Self {
            owner,
            by_key,
            ordered: ordered.into_boxed_slice(),
        }
    }

    /// Returns the identity of the type these fields belong to.
    #[inline]
    pub const fn owner(&self) -> TypeIdent {
        self.owner
    }

    /// Returns the field serialized under `key`, if any.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&FieldInfo> {
        self.by_key.get(key).map(|&slot| &self.ordered[slot])
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.ordered.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl PartialEq for FieldSet {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.ordered == other.ordered
    }
}

impl Eq for FieldSet {}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldInfo;
    type IntoIter = core::slice::Iter<'a, FieldInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
