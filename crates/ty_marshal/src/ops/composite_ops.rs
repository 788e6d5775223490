use std::borrow::Cow;

use crate::fields::{FieldDecl, TypeIdent};
use crate::{Marshal, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Composite trait

/// A struct-like value whose fields are reached by index.
///
/// Usually implemented by [`#[derive(Marshal)]`](crate::derive::Marshal).
///
/// # Contract
///
/// - [`field_decls`](Composite::field_decls) lists every field, private ones
///   included, in declaration order. It returns the same list on every call
///   for a given [`type_ident`](Composite::type_ident).
/// - [`field`](Composite::field) and [`field_mut`](Composite::field_mut)
///   return `Some` for the index of every visible declaration.
///
/// The traversal engine panics when a visible index cannot be resolved: that
/// is a broken implementation, not bad input.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Composite, Marshal};
///
/// #[derive(Marshal)]
/// pub struct Point {
///     pub x: i64,
///     pub y: i64,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let decls = point.field_decls();
///
/// assert_eq!(decls[1].name(), "y");
/// assert_eq!(point.type_ident().name(), "Point");
/// assert!(point.field(1).is_some());
/// assert!(point.field(2).is_none());
/// ```
pub trait Composite: Marshal {
    /// Returns the name of the type, used in errors and logs. The anonymous
    /// identity opts out of caching.
    fn type_ident(&self) -> TypeIdent;

    /// Returns the declarations of all fields, in declaration order.
    fn field_decls(&self) -> Cow<'_, [FieldDecl]>;

    /// Returns the field declared at `index`.
    fn field(&self, index: usize) -> Option<&dyn Marshal>;

    /// Returns the field declared at `index`, mutably.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Marshal>;
}

// -----------------------------------------------------------------------------
// DynamicComposite

/// A record whose fields are added at runtime.
///
/// Every `DynamicComposite` has the [anonymous](TypeIdent::ANONYMOUS)
/// identity: two instances may declare unrelated fields, so their field set
/// is rebuilt on each walk and never cached.
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::FieldDecl;
/// use ty_marshal::marshal;
/// use ty_marshal::ops::DynamicComposite;
///
/// let record = DynamicComposite::new()
///     .with_field(FieldDecl::dynamic("Name", None::<&str>), String::from("app"))
///     .with_field(FieldDecl::dynamic("retries", Some("tries,c")), 0_u32);
///
/// assert_eq!(marshal(&record).unwrap(), b"name: app\n");
/// ```
#[derive(Default)]
pub struct DynamicComposite {
    decls: Vec<FieldDecl>,
    values: Vec<Box<dyn Marshal>>,
}

impl DynamicComposite {
    /// Creates an empty record.
    #[inline]
    pub const fn new() -> Self {
        Self {
            decls: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an empty record with room for `capacity` fields.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decls: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Adds a field, or replaces the field with the same name.
    pub fn insert(&mut self, decl: FieldDecl, value: Box<dyn Marshal>) {
        match self.decls.iter().position(|d| d.name() == decl.name()) {
            Some(index) => {
                self.decls[index] = decl;
                self.values[index] = value;
            }
            None => {
                self.decls.push(decl);
                self.values.push(value);
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[inline]
    pub fn with_field<T: Marshal>(mut self, decl: FieldDecl, value: T) -> Self {
        self.insert(decl, Box::new(value));
        self
    }

    /// Returns the field named `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Marshal> {
        let index = self.decls.iter().position(|d| d.name() == name)?;
        Some(&*self.values[index])
    }

    /// Returns the field named `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Marshal> {
        let index = self.decls.iter().position(|d| d.name() == name)?;
        Some(&mut *self.values[index])
    }

    /// Returns a reference to the field named `name` if it holds a `T`.
    pub fn get_as<T: Marshal>(&self, name: &str) -> Option<&T> {
        let value: &dyn core::any::Any = self.get(name)?;
        value.downcast_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Marshal for DynamicComposite {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Composite(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Composite(self)
    }
}

impl Composite for DynamicComposite {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        TypeIdent::ANONYMOUS
    }

    #[inline]
    fn field_decls(&self) -> Cow<'_, [FieldDecl]> {
        Cow::Borrowed(&self.decls)
    }

    #[inline]
    fn field(&self, index: usize) -> Option<&dyn Marshal> {
        self.values.get(index).map(|value| &**value)
    }

    #[inline]
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Marshal> {
        self.values.get_mut(index).map(|value| &mut **value)
    }
}

impl core::fmt::Debug for DynamicComposite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.decls.iter().map(FieldDecl::name).zip(&self.values))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicComposite;
    use crate::fields::FieldDecl;
    use crate::{Composite, unmarshal};

    #[test]
    fn insert_replaces_by_name() {
        let mut record = DynamicComposite::new();
        record.insert(FieldDecl::dynamic("a", None::<&str>), Box::new(1_i64));
        record.insert(FieldDecl::dynamic("b", None::<&str>), Box::new(2_i64));
        record.insert(FieldDecl::dynamic("a", Some("alpha")), Box::new(String::from("x")));

        assert_eq!(record.len(), 2);
        assert_eq!(record.field_decls()[0].tag(), Some("alpha"));
        assert_eq!(record.get_as::<String>("a").map(String::as_str), Some("x"));
        assert_eq!(record.get_as::<i64>("b"), Some(&2));
        assert!(record.get_as::<u8>("b").is_none());
        assert!(record.field(2).is_none());
    }

    #[test]
    fn decodes_like_a_derived_struct() {
        let mut record = DynamicComposite::new()
            .with_field(FieldDecl::dynamic("Port", None::<&str>), 0_u16)
            .with_field(FieldDecl::dynamic("host", Some("addr")), String::new());

        unmarshal(b"port: 8080\naddr: localhost\nextra: true\n", &mut record).unwrap();

        assert_eq!(record.get_as::<u16>("Port"), Some(&8080));
        assert_eq!(record.get_as::<String>("host").map(String::as_str), Some("localhost"));
    }
}
