use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Name of the facade package re-exporting every `ty_*` crate.
const FACADE_NAME: &str = "tyaml";
/// Prefix shared by the member crates, stripped when going through the facade.
const MEMBER_PREFIX: &str = "ty_";

/// The parsed `Cargo.toml` of the crate invoking a proc-macro.
///
/// Generated code has to name `ty_marshal` the way the invoking crate can
/// see it. A crate may depend on `ty_marshal` directly or only on the
/// `tyaml` facade, which re-exports it as `tyaml::marshal`.
///
/// # Resolution rules
///
/// 1. `name` is listed in `dependencies`: `::name`.
/// 2. `name` starts with `ty_` and `tyaml` is listed: `::tyaml::short_name`
///    (e.g. `ty_marshal` -> `::tyaml::marshal`).
/// 3. Rules 1 and 2 against `dev-dependencies`.
/// 4. Otherwise `::name`. Crates referring to themselves resolve through
///    `extern crate self as name;`.
///
/// # Example
///
/// ```rust
/// # use ty_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("ty_marshal"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be set by cargo when expanding proc-macros.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn path_of(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::path_of(&format!("::{name}")));
        }
        let short = name.strip_prefix(MEMBER_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::path_of(&format!("::{FACADE_NAME}::{short}")))
    }

    /// Returns the path under which the crate `name` is reachable from the
    /// invoking crate. See the type-level documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::path_of(&format!("::{name}")))
    }

    /// Runs `func` with the [`Manifest`] of the invoking crate.
    ///
    /// Manifests are parsed once and shared between macro invocations until
    /// the file's modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        // Parsed outside of the lock; a racing parse of the same file is harmless.
        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
