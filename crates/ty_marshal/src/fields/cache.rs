use core::any::{Any, TypeId};
use std::sync::{Arc, PoisonError, RwLock};

use super::tag;
use crate::Composite;
use crate::error::ConfigError;
use crate::fields::{FieldInfo, FieldSet, TypeIdent};
use crate::hash::{FixedHashState, HashMap};

/// A cache of [`FieldSet`]s keyed by [`TypeId`].
///
/// [`TypeIdent`] only names a type in logs and errors: distinct types may
/// share one (e.g. structs of the same name local to two functions), so it
/// is never used as the key.
///
/// The entry points use [`FieldCache::global`]; a separate cache can be
/// injected through [`Marshaller::with_cache`](crate::Marshaller::with_cache),
/// e.g. to isolate tests.
///
/// # Concurrency
///
/// Lookups take a shared lock. A missing set is built without holding any
/// lock, then published under the exclusive lock. Two threads meeting the
/// same new type may both build it; the sets are equal and the last one
/// published is kept.
///
/// # Examples
///
/// ```
/// use ty_marshal::{Marshal, fields::FieldCache};
///
/// #[derive(Marshal)]
/// pub struct Config {
///     pub name: String,
/// }
///
/// let cache = FieldCache::new();
/// let value = Config { name: "a".into() };
///
/// let first = cache.resolve(&value).unwrap();
/// let again = cache.resolve(&value).unwrap();
///
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct FieldCache {
    table: RwLock<HashMap<TypeId, Arc<FieldSet>>>,
}

impl Default for FieldCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    /// Returns the process-wide cache.
    #[inline]
    pub fn global() -> &'static FieldCache {
        static GLOBAL: FieldCache = FieldCache::new();
        &GLOBAL
    }

    /// Returns the [`FieldSet`] of `value`'s type, building and caching it on
    /// first use.
    ///
    /// Anonymous types are rebuilt on every call and never cached.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if two visible fields resolve to the same key or an
    /// annotation carries an unknown flag. Nothing is cached in that case.
    pub fn resolve(&self, value: &dyn Composite) -> Result<Arc<FieldSet>, ConfigError> {
        let ident = value.type_ident();
        let type_id = type_id_of(value);

        if !ident.is_anonymous()
            && let Some(fields) = self.get(type_id)
        {
            log::trace!("field set of `{ident}` served from cache");
            return Ok(fields);
        }

        let fields = Arc::new(Self::build(value, ident)?);

        if !ident.is_anonymous() {
            let replaced = self
                .table
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(type_id, Arc::clone(&fields));
            match replaced {
                Some(previous) if previous != fields => {
                    log::warn!("field set of `{ident}` replaced by an unequal concurrent build");
                }
                Some(_) => log::trace!("field set of `{ident}` built concurrently"),
                None => log::debug!("field set of `{ident}` cached ({} fields)", fields.len()),
            }
        }

        Ok(fields)
    }

    fn build(value: &dyn Composite, ident: TypeIdent) -> Result<FieldSet, ConfigError> {
        let decls = value.field_decls();
        let mut ordered: Vec<FieldInfo> = Vec::with_capacity(decls.len());

        for (index, decl) in decls.iter().enumerate() {
            if !decl.is_visible() {
                continue;
            }

            let parsed = tag::parse(decl, ident)?;

            if ordered.iter().any(|info| info.key() == parsed.key) {
                log::debug!("field set of `{ident}` rejected: duplicated key `{}`", parsed.key);
                return Err(ConfigError::DuplicateKey {
                    key: parsed.key,
                    owner: ident,
                });
            }

            ordered.push(FieldInfo::new(parsed.key, index, parsed.conditional));
        }

        Ok(FieldSet::new(ident, ordered))
    }

    /// Returns the cached [`FieldSet`] of the type `type_id`, without
    /// building it.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<FieldSet>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    /// Whether a [`FieldSet`] of the type `type_id` has been cached.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&type_id)
    }

    /// Returns the number of cached types.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached [`FieldSet`].
    ///
    /// Sets already handed out stay valid; later lookups rebuild them.
    pub fn clear(&self) {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl core::fmt::Debug for FieldCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(
                self.table
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .values()
                    .map(|fields| fields.owner().to_string()),
            )
            .finish()
    }
}

/// The [`TypeId`] of the concrete type behind `value`.
#[inline]
fn type_id_of(value: &dyn Composite) -> TypeId {
    let value: &dyn Any = value;
    value.type_id()
}

#[cfg(test)]
mod tests {
    use core::any::{Any, TypeId};
    use std::sync::{Arc, Barrier};

    use super::FieldCache;
    use crate::fields::{FieldDecl, TypeIdent};
    use crate::ops::DynamicComposite;
    use crate::{Composite, ConfigError, Marshal};

    #[derive(Marshal, Default)]
    pub struct Point {
        #[marshal("x")]
        pub x: i64,
        #[marshal("y,c")]
        pub y: i64,
        scratch: u32,
    }

    #[derive(Marshal, Default)]
    pub struct Clash {
        pub name: String,
        #[marshal("name")]
        pub alias: String,
    }

    #[derive(Marshal, Default)]
    pub struct BadFlag {
        #[marshal("v,z")]
        pub v: i32,
    }

    #[test]
    fn builds_in_declaration_order() {
        let cache = FieldCache::new();
        let fields = cache.resolve(&Point::default()).unwrap();

        let keys: Vec<_> = fields.iter().map(|f| (f.key(), f.index())).collect();
        assert_eq!(keys, [("x", 0), ("y", 1)]);
        assert!(!fields.get("x").unwrap().is_conditional());
        assert!(fields.get("y").unwrap().is_conditional());
        assert!(fields.get("scratch").is_none());
        assert_eq!(fields.owner(), Point::default().type_ident());
    }

    #[test]
    fn memoizes_per_type() {
        let cache = FieldCache::new();
        let a = cache.resolve(&Point::default()).unwrap();
        let b = cache.resolve(&Point { x: 1, y: 2, scratch: 3 }).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(TypeId::of::<Point>()));

        cache.clear();
        assert!(cache.is_empty());
        let c = cache.resolve(&Point::default()).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a, c);
    }

    #[test]
    fn same_named_types_are_cached_apart() {
        fn first() -> impl Composite {
            #[derive(Marshal, Default)]
            pub struct Record {
                pub id: u8,
            }
            Record::default()
        }

        fn second() -> impl Composite {
            #[derive(Marshal, Default)]
            pub struct Record {
                pub name: String,
                pub id: u8,
            }
            Record::default()
        }

        let cache = FieldCache::new();
        let (first, second) = (first(), second());
        assert_eq!(first.type_ident(), second.type_ident());

        let a = cache.resolve(&first).unwrap();
        let b = cache.resolve(&second).unwrap();

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("id").unwrap().index(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn duplicate_key_is_never_cached() {
        let cache = FieldCache::new();

        for _ in 0..2 {
            let err = cache.resolve(&Clash::default()).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::DuplicateKey { ref key, owner } if key == "name" && owner.name() == "Clash"
            ));
        }

        assert!(!cache.contains(TypeId::of::<Clash>()));
        assert!(cache.is_empty());
    }

    #[test]
    fn unsupported_flag_fails_construction() {
        let cache = FieldCache::new();
        let err = cache.resolve(&BadFlag::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFlag { flag: 'z', .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn anonymous_types_are_not_cached() {
        let cache = FieldCache::new();

        let mut first = DynamicComposite::new();
        first.insert(FieldDecl::dynamic("a", None::<&str>), Box::new(1_i64));
        let mut second = DynamicComposite::new();
        second.insert(FieldDecl::dynamic("b", Some("bee")), Box::new(2_i64));

        assert_eq!(first.type_ident(), TypeIdent::ANONYMOUS);
        let a = cache.resolve(&first).unwrap();
        let b = cache.resolve(&second).unwrap();

        assert!(a.get("a").is_some());
        assert!(b.get("bee").is_some());
        assert!(b.get("a").is_none());
        assert!(cache.is_empty());
    }

    macro_rules! define_types {
        ($($name:ident),*) => {
            $(
                #[derive(Marshal, Default)]
                pub struct $name {
                    pub id: u32,
                    #[marshal("label,c")]
                    pub label: String,
                }
            )*

            fn all_types() -> Vec<Box<dyn Composite + Send + Sync>> {
                vec![$(Box::new($name::default())),*]
            }
        };
    }

    define_types!(T0, T1, T2, T3, T4, T5, T6, T7);

    #[test]
    fn concurrent_first_use_of_distinct_types() {
        let cache = FieldCache::new();
        let values = all_types();
        let barrier = Barrier::new(values.len());

        let sets: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = values
                .iter()
                .map(|value| {
                    let (cache, barrier) = (&cache, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        cache.resolve(value.as_ref()).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), values.len());
        for (value, set) in values.iter().zip(&sets) {
            let ident = value.type_ident();
            let type_id = (value.as_ref() as &dyn Any).type_id();
            assert_eq!(set.owner(), ident);
            assert_eq!(set.len(), 2);
            assert!(set.get("label").unwrap().is_conditional());
            assert!(Arc::ptr_eq(set, &cache.get(type_id).unwrap()));
        }
    }

    #[test]
    fn concurrent_first_use_of_one_type() {
        const THREADS: usize = 8;
        let cache = FieldCache::new();
        let barrier = Barrier::new(THREADS);

        let sets: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache.resolve(&Point::default()).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(sets.iter().all(|set| **set == *sets[0]));
    }
}
