use crate::Marshal;

// -----------------------------------------------------------------------------
// Sequence trait

/// An ordered collection of values.
///
/// Implemented for [`Vec<T>`] when `T: Marshal + Default`.
///
/// Decoding replaces the whole content: the sequence is [cleared](Sequence::clear),
/// then each element is decoded into a slot from
/// [`push_default`](Sequence::push_default).
///
/// # Examples
///
/// ```
/// use ty_marshal::ops::Sequence;
///
/// let mut list = vec![1_u8, 2];
/// let seq: &mut dyn Sequence = &mut list;
///
/// assert_eq!(seq.iter().count(), 2);
/// seq.clear();
/// seq.push_default();
/// assert_eq!(list, [0]);
/// ```
pub trait Sequence: Marshal {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Marshal>;

    /// Removes every element.
    fn clear(&mut self);

    /// Appends a default element and returns it.
    fn push_default(&mut self) -> &mut dyn Marshal;
}

impl dyn Sequence {
    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> SequenceIter<'_> {
        SequenceIter::new(self)
    }
}

impl<'a> IntoIterator for &'a dyn Sequence {
    type Item = &'a dyn Marshal;
    type IntoIter = SequenceIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// SequenceIter

/// An iterator over the elements of a [`Sequence`].
pub struct SequenceIter<'a> {
    seq: &'a dyn Sequence,
    index: usize,
}

impl SequenceIter<'_> {
    #[inline(always)]
    pub const fn new(seq: &dyn Sequence) -> SequenceIter<'_> {
        SequenceIter { seq, index: 0 }
    }
}

impl<'a> Iterator for SequenceIter<'a> {
    type Item = &'a dyn Marshal;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.seq.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.seq.len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for SequenceIter<'_> {}
