use serde_yaml::Value;

use crate::fields::FieldCache;
use crate::format::{Format, Yaml};
use crate::walk::{Decoder, Encoder};
use crate::{Error, Marshal};

// -----------------------------------------------------------------------------
// Marshaller

/// Entry points bound to a [`FieldCache`] and a [`Format`].
///
/// [`Marshaller::new`] uses [`FieldCache::global`] and [`Yaml`], like the
/// free functions [`marshal`], [`unmarshal`], [`to_node`] and [`from_node`].
///
/// Every call owns its node tree; nothing but the cache is shared between
/// calls, so one `Marshaller` can serve many threads.
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::FieldCache;
/// use ty_marshal::{Marshal, Marshaller};
///
/// #[derive(Marshal, Default)]
/// pub struct Limits {
///     #[marshal("max,c")]
///     pub max: u32,
/// }
///
/// let cache = FieldCache::new();
/// let marshaller = Marshaller::new().with_cache(&cache);
///
/// let mut limits = Limits::default();
/// marshaller.unmarshal(b"max: 10", &mut limits).unwrap();
///
/// assert_eq!(limits.max, 10);
/// assert_eq!(cache.len(), 1);
/// assert!(FieldCache::global().is_empty());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Marshaller<'a, F: Format = Yaml> {
    cache: &'a FieldCache,
    format: F,
}

impl Marshaller<'static, Yaml> {
    /// Creates a marshaller over the global cache and the YAML format.
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: FieldCache::global(),
            format: Yaml,
        }
    }
}

impl Default for Marshaller<'static, Yaml> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, F: Format> Marshaller<'a, F> {
    /// Resolves field sets through `cache` instead.
    #[inline]
    pub fn with_cache<'b>(self, cache: &'b FieldCache) -> Marshaller<'b, F> {
        Marshaller {
            cache,
            format: self.format,
        }
    }

    /// Parses and renders with `format` instead.
    #[inline]
    pub fn with_format<G: Format>(self, format: G) -> Marshaller<'a, G> {
        Marshaller {
            cache: self.cache,
            format,
        }
    }

    #[inline]
    pub fn cache(&self) -> &'a FieldCache {
        self.cache
    }

    #[inline]
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Encodes `value` and renders it.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for invalid field sets, [`Error::Encode`] for invalid
    /// tags or rendering failures.
    pub fn marshal<T: Marshal>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let node = self.to_node(value)?;
        Ok(self.format.render(&node)?)
    }

    /// Parses `input` and decodes it into `target`.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed input, [`Error::Decode`] for nodes that
    /// do not fit their target, [`Error::Config`] for invalid field sets.
    pub fn unmarshal<T: Marshal>(&self, input: &[u8], target: &mut T) -> Result<(), Error> {
        let node = self.format.parse(input)?;
        self.from_node(&node, target)
    }

    /// Encodes `value` into a node tree.
    #[inline]
    pub fn to_node<T: Marshal>(&self, value: &T) -> Result<Value, Error> {
        Encoder::new(self.cache).marshal("", value)
    }

    /// Decodes `node` into `target`.
    #[inline]
    pub fn from_node<T: Marshal>(&self, node: &Value, target: &mut T) -> Result<(), Error> {
        Decoder::new(self.cache).unmarshal(node, target)
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Encodes `value` as a YAML document.
///
/// See [`Marshaller::marshal`].
///
/// # Examples
///
/// ```
/// use ty_marshal::marshal;
///
/// assert_eq!(marshal(&vec![1, 2]).unwrap(), b"- 1\n- 2\n");
/// ```
#[inline]
pub fn marshal<T: Marshal>(value: &T) -> Result<Vec<u8>, Error> {
    Marshaller::new().marshal(value)
}

/// Decodes a YAML document into `target`.
///
/// See [`Marshaller::unmarshal`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ty_marshal::unmarshal;
///
/// let mut map = BTreeMap::new();
/// unmarshal(b"{a: 1, b: 2}", &mut map).unwrap();
/// assert_eq!(map, BTreeMap::from([("a".to_string(), 1_u8), ("b".to_string(), 2)]));
/// ```
#[inline]
pub fn unmarshal<T: Marshal>(input: &[u8], target: &mut T) -> Result<(), Error> {
    Marshaller::new().unmarshal(input, target)
}

/// Encodes `value` into a node tree. See [`Marshaller::to_node`].
#[inline]
pub fn to_node<T: Marshal>(value: &T) -> Result<Value, Error> {
    Marshaller::new().to_node(value)
}

/// Decodes `node` into `target`. See [`Marshaller::from_node`].
#[inline]
pub fn from_node<T: Marshal>(node: &Value, target: &mut T) -> Result<(), Error> {
    Marshaller::new().from_node(node, target)
}
