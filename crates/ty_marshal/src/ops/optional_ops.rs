use crate::Marshal;

/// A value that may be absent.
///
/// Implemented for [`Option<T>`] when `T: Marshal + Default`. Absent values
/// encode as null; decoding null sets them absent.
pub trait Optional: Marshal {
    fn is_none(&self) -> bool;

    /// Drops the contained value, if any.
    fn set_none(&mut self);

    /// Returns the contained value, inserting a default one first if absent.
    fn get_or_insert_default(&mut self) -> &mut dyn Marshal;
}
