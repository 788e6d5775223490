use core::fmt;
use std::borrow::Cow;

// -----------------------------------------------------------------------------
// TypeIdent

/// The name of a composite type: module path and type name.
///
/// Used to name the owner of a field set in logs and errors. It is not
/// unique (all instantiations of a generic type, or same-named structs local
/// to two functions, share one), so the cache keys on the type's `TypeId`.
///
/// Field sets of types with the anonymous identity (both parts empty) are
/// never cached.
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::TypeIdent;
///
/// let ident = TypeIdent::new("app::geo", "Point");
/// assert_eq!(ident.to_string(), "app::geo::Point");
/// assert!(TypeIdent::ANONYMOUS.is_anonymous());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeIdent {
    module_path: &'static str,
    name: &'static str,
}

impl TypeIdent {
    /// The identity of types that have no name, such as
    /// [`DynamicComposite`](crate::ops::DynamicComposite).
    pub const ANONYMOUS: Self = Self::new("", "");

    #[inline]
    pub const fn new(module_path: &'static str, name: &'static str) -> Self {
        Self { module_path, name }
    }

    #[inline]
    pub const fn module_path(&self) -> &'static str {
        self.module_path
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn is_anonymous(&self) -> bool {
        self.module_path.is_empty() && self.name.is_empty()
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.module_path, self.name) {
            ("", "") => f.write_str("<anonymous>"),
            ("", name) => f.write_str(name),
            (module_path, name) => write!(f, "{module_path}::{name}"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldDecl

/// A field as declared on a composite type, before resolution.
///
/// Composite types report one [`FieldDecl`] per field in declaration order,
/// private fields included; the position in that list is the index passed to
/// [`Composite::field`](crate::Composite::field).
///
/// # Examples
///
/// ```
/// use ty_marshal::fields::FieldDecl;
///
/// static FIELDS: [FieldDecl; 2] = [
///     FieldDecl::new("x", Some("x"), true),
///     FieldDecl::new("cache", None, false),
/// ];
///
/// assert_eq!(FIELDS[0].tag(), Some("x"));
/// assert!(!FIELDS[1].is_visible());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    name: Cow<'static, str>,
    tag: Option<Cow<'static, str>>,
    visible: bool,
}

impl FieldDecl {
    /// Creates a declaration from static parts, usable in `static` tables.
    #[inline]
    pub const fn new(name: &'static str, tag: Option<&'static str>, visible: bool) -> Self {
        Self {
            name: Cow::Borrowed(name),
            tag: match tag {
                Some(tag) => Some(Cow::Borrowed(tag)),
                None => None,
            },
            visible,
        }
    }

    /// Creates a visible declaration from runtime strings.
    #[inline]
    pub fn dynamic(
        name: impl Into<Cow<'static, str>>,
        tag: Option<impl Into<Cow<'static, str>>>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.map(Into::into),
            visible: true,
        }
    }

    /// Returns the declared field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw annotation, flags included.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether the field is visible outside its declaring module.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}
