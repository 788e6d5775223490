use crate::{Error, Marshal};

/// The entries of a [`Mapping`], as handed out by [`Mapping::entries`].
pub type MappingEntries<'a> = Box<dyn Iterator<Item = (&'a dyn Marshal, &'a dyn Marshal)> + 'a>;

/// A collection of key/value entries.
///
/// Implemented for [`BTreeMap<K, V>`](std::collections::BTreeMap) and
/// [`HashMap<K, V, S>`](std::collections::HashMap) when keys and values are
/// `Marshal + Default`.
///
/// Decoding inserts entries one by one and never removes existing ones: an
/// entry whose key is already present is overwritten.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ty_marshal::{Marshal, ValueMut};
/// use ty_marshal::ops::{Integer, Mapping};
///
/// let mut map = BTreeMap::from([(1_u8, true)]);
/// let entries: &mut dyn Mapping = &mut map;
///
/// entries
///     .insert_with(&mut |key, _value| {
///         if let ValueMut::Int(key) = key.value_mut() {
///             key.set_int(2);
///         }
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(map, BTreeMap::from([(1, true), (2, false)]));
/// ```
pub trait Mapping: Marshal {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries. The order is the collection's own.
    fn entries(&self) -> MappingEntries<'_>;

    /// Inserts one entry.
    ///
    /// A default key and value are created, filled by `fill`, then inserted.
    /// Nothing is inserted if `fill` fails.
    fn insert_with(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Marshal, &mut dyn Marshal) -> Result<(), Error>,
    ) -> Result<(), Error>;
}
