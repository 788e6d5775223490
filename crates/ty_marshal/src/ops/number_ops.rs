use crate::Marshal;

/// A fixed-width integer that accepts any in-range value.
///
/// # Examples
///
/// ```
/// use ty_marshal::ops::Integer;
///
/// let mut byte = 0_u8;
/// assert!(byte.set_int(200));
/// assert!(!byte.set_int(256));
/// assert!(!byte.set_int(-1));
/// assert_eq!(byte, 200);
/// ```
pub trait Integer: Marshal {
    /// Stores `value` if it fits, and returns whether it did.
    fn set_int(&mut self, value: i128) -> bool;
}

/// A floating point number.
///
/// # Examples
///
/// ```
/// use ty_marshal::ops::Float;
///
/// let mut single = 0_f32;
/// assert!(single.set_float(0.5));
/// assert!(!single.set_float(1e300));
/// assert!(single.set_float(f64::INFINITY));
/// assert_eq!(single, f32::INFINITY);
/// ```
pub trait Float: Marshal {
    /// Stores `value`, and returns `false` if a finite `value` overflows.
    fn set_float(&mut self, value: f64) -> bool;
}
