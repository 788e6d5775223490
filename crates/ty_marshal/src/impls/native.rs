use crate::ops::{Float, Integer};
use crate::{Marshal, ValueMut, ValueRef};

macro_rules! impl_marshal_for_int {
    ($variant:ident as $wide:ty: $($ty:ty),* $(,)?) => {$(
        impl Marshal for $ty {
            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::$variant(*self as $wide)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Int(self)
            }
        }

        impl Integer for $ty {
            #[inline]
            fn set_int(&mut self, value: i128) -> bool {
                <$ty>::try_from(value).map(|value| *self = value).is_ok()
            }
        }
    )*};
}

impl_marshal_for_int!(Int as i64: i8, i16, i32, i64, isize);
impl_marshal_for_int!(Uint as u64: u8, u16, u32, u64, usize);

impl Marshal for f64 {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Float(*self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Float(self)
    }
}

impl Float for f64 {
    #[inline]
    fn set_float(&mut self, value: f64) -> bool {
        *self = value;
        true
    }
}

impl Marshal for f32 {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Float(f64::from(*self))
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Float(self)
    }
}

impl Float for f32 {
    fn set_float(&mut self, value: f64) -> bool {
        let narrowed = value as f32;
        if value.is_finite() && narrowed.is_infinite() {
            return false;
        }
        *self = narrowed;
        true
    }
}

impl Marshal for bool {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Bool(*self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Bool(self)
    }
}

impl Marshal for String {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Str(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Str(self)
    }
}
