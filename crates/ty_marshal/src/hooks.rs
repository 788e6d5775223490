use serde_yaml::Value;

use crate::Marshal;

/// Overrides how a type is encoded.
///
/// The traversal engine calls [`get_yaml`](Getter::get_yaml) instead of
/// walking the value, then encodes the returned substitute under the returned
/// tag. The substitute is walked with the default rules only: its own
/// `Getter` is not consulted, so a type may return a value of its own type.
///
/// An empty tag leaves the node untagged; so does the node's own resolved
/// tag (e.g. `!!str` for a string). Any other tag is attached to the node.
///
/// Types opt in by returning `Some(self)` from
/// [`Marshal::as_getter`], or with `#[marshal(getter)]` on a derived type.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Getter, Marshal, marshal};
///
/// #[derive(Marshal)]
/// #[marshal(getter)]
/// pub struct Celsius {
///     pub degrees: i64,
/// }
///
/// impl Getter for Celsius {
///     fn get_yaml(&self) -> (String, Box<dyn Marshal>) {
///         (String::new(), Box::new(format!("{}C", self.degrees)))
///     }
/// }
///
/// assert_eq!(marshal(&Celsius { degrees: 21 }).unwrap(), b"21C\n");
/// ```
pub trait Getter {
    /// Returns the tag and the value to encode in place of `self`.
    fn get_yaml(&self) -> (String, Box<dyn Marshal>);
}

/// Overrides how a type is decoded.
///
/// The traversal engine calls [`set_yaml`](Setter::set_yaml) with the node's
/// tag and its untagged value before any default decoding. Returning `true`
/// finishes decoding of the node; returning `false` falls back to the default
/// rules for the type.
///
/// The tag is the node's explicit tag (e.g. `!celsius`) or its resolved one:
/// `!!null`, `!!bool`, `!!int`, `!!float`, `!!str`, `!!seq` or `!!map`.
///
/// Types opt in by returning `Some(self)` from
/// [`Marshal::as_setter`], or with `#[marshal(setter)]` on a derived type.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Marshal, Setter, Value, unmarshal};
///
/// #[derive(Marshal, Default, Debug, PartialEq)]
/// #[marshal(setter)]
/// pub struct Celsius {
///     pub degrees: i64,
/// }
///
/// impl Setter for Celsius {
///     fn set_yaml(&mut self, tag: &str, value: &Value) -> bool {
///         let Some(text) = value.as_str().filter(|_| tag == "!!str") else {
///             return false;
///         };
///         match text.strip_suffix('C').and_then(|d| d.parse().ok()) {
///             Some(degrees) => {
///                 self.degrees = degrees;
///                 true
///             }
///             None => false,
///         }
///     }
/// }
///
/// let mut t = Celsius::default();
/// unmarshal(b"21C", &mut t).unwrap();
/// assert_eq!(t, Celsius { degrees: 21 });
///
/// // Declined: decoded field by field.
/// unmarshal(b"degrees: 30", &mut t).unwrap();
/// assert_eq!(t, Celsius { degrees: 30 });
/// ```
pub trait Setter {
    /// Tries to take `value` (tagged `tag`) into `self`.
    fn set_yaml(&mut self, tag: &str, value: &Value) -> bool;
}
