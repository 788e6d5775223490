use std::collections::BTreeMap;

use crate::ops::{Mapping, MappingEntries, Sequence};
use crate::{Error, Marshal, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Vec

impl<T: Marshal + Default> Marshal for Vec<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Sequence(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Sequence(self)
    }
}

impl<T: Marshal + Default> Sequence for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Marshal> {
        <[T]>::get(self, index).map(|value| value as &dyn Marshal)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Marshal {
        self.push(T::default());
        let index = Vec::len(self) - 1;
        &mut self[index]
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K, V> Marshal for BTreeMap<K, V>
where
    K: Marshal + Default + Ord,
    V: Marshal + Default,
{
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Mapping(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Mapping(self)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Marshal + Default + Ord,
    V: Marshal + Default,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> MappingEntries<'_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Marshal, value as &dyn Marshal)),
        )
    }

    fn insert_with(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Marshal, &mut dyn Marshal) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let (mut key, mut value) = (K::default(), V::default());
        fill(&mut key, &mut value)?;
        self.insert(key, value);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// HashMap

macro_rules! impl_marshal_for_hashmap {
    ($ty:path) => {
        impl<K, V, S> Marshal for $ty
        where
            K: Marshal + Default + Eq + ::core::hash::Hash,
            V: Marshal + Default,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Mapping(self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Mapping(self)
            }
        }

        impl<K, V, S> Mapping for $ty
        where
            K: Marshal + Default + Eq + ::core::hash::Hash,
            V: Marshal + Default,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn entries(&self) -> MappingEntries<'_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key as &dyn Marshal, value as &dyn Marshal)),
                )
            }

            fn insert_with(
                &mut self,
                fill: &mut dyn FnMut(&mut dyn Marshal, &mut dyn Marshal) -> Result<(), Error>,
            ) -> Result<(), Error> {
                let (mut key, mut value) = (K::default(), V::default());
                fill(&mut key, &mut value)?;
                self.insert(key, value);
                Ok(())
            }
        }
    };
}

impl_marshal_for_hashmap!(::std::collections::HashMap<K, V, S>);
impl_marshal_for_hashmap!(::hashbrown::HashMap<K, V, S>);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::ops::{Mapping, Sequence};
    use crate::{Marshal, ValueRef};

    #[test]
    fn vec_sequence_access() {
        let mut list = vec![String::from("a"), String::from("b")];
        let seq: &mut dyn Sequence = &mut list;

        assert_eq!(seq.len(), 2);
        assert!(seq.get(2).is_none());
        let names: Vec<_> = seq
            .iter()
            .map(|item| match item.value_ref() {
                ValueRef::Str(text) => text.to_owned(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, ["a", "b"]);

        seq.clear();
        assert!(seq.is_empty());
    }

    #[test]
    fn failed_fill_inserts_nothing() {
        let mut map: HashMap<String, u8> = HashMap::new();
        let result = Mapping::insert_with(&mut map, &mut |_, _| {
            Err(crate::ParseError::new("boom").into())
        });

        assert!(result.is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn btree_entries_are_ordered() {
        let map = BTreeMap::from([(2_u8, 'b'.to_string()), (1, 'a'.to_string())]);
        let keys: Vec<_> = map
            .entries()
            .map(|(key, _)| match key.value_ref() {
                ValueRef::Uint(key) => key,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(keys, [1, 2]);
    }
}
