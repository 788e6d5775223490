use crate::hooks::{Getter, Setter};
use crate::ops::Optional;
use crate::{Marshal, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Option

impl<T: Marshal + Default> Marshal for Option<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Optional(self.as_ref().map(|value| value as &dyn Marshal))
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Optional(self)
    }
}

impl<T: Marshal + Default> Optional for Option<T> {
    #[inline]
    fn is_none(&self) -> bool {
        Option::is_none(self)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    #[inline]
    fn get_or_insert_default(&mut self) -> &mut dyn Marshal {
        self.get_or_insert_with(T::default)
    }
}

// -----------------------------------------------------------------------------
// Box

// Transparent: a boxed value walks exactly like the value itself.
impl<T: Marshal + ?Sized> Marshal for Box<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        (**self).value_mut()
    }

    #[inline]
    fn as_getter(&self) -> Option<&dyn Getter> {
        (**self).as_getter()
    }

    #[inline]
    fn as_setter(&mut self) -> Option<&mut dyn Setter> {
        (**self).as_setter()
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::Optional;
    use crate::{Marshal, ValueRef, marshal, unmarshal};

    #[test]
    fn option_inserts_default_then_clears() {
        let mut value: Option<i32> = None;
        assert!(matches!(value.value_ref(), ValueRef::Optional(None)));

        let _ = Optional::get_or_insert_default(&mut value);
        assert_eq!(value, Some(0));

        value.set_none();
        assert!(Optional::is_none(&value));

        let mut value: Option<u8> = None;
        unmarshal(b"3", &mut value).unwrap();
        assert_eq!(value, Some(3));
    }

    #[test]
    fn box_is_transparent() {
        let boxed: Box<dyn Marshal> = Box::new(7_u8);
        assert_eq!(boxed.type_name(), "u8");
        assert_eq!(marshal(&boxed).unwrap(), marshal(&7_u8).unwrap());

        let mut boxed = Box::new(String::new());
        unmarshal(b"text", &mut boxed).unwrap();
        assert_eq!(*boxed, "text");
    }
}
