use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The Cargo manifest of the crate that invoked a derive.
///
/// Generated code has to name `tri_optional`, but the invoking crate may
/// depend on it directly or only through the `tri_core` facade. `Manifest`
/// reads the invoking crate's `Cargo.toml` and picks the path that resolves.
///
/// # Example
///
/// ```rust
/// # use tri_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("tri_optional"));
/// ```
///
/// # Resolution rules
///
/// 1. The crate itself is a dependency: `::tri_optional`.
/// 2. The name starts with `tri_` and the facade `tri_core` is a dependency:
///    `::tri_core::optional`.
/// 3. Same as 1 and 2 for `dev-dependencies`.
/// 4. Otherwise `::tri_optional`, which only works inside the crate itself
///    thanks to its `extern crate self as tri_optional;`.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "tri_core";
const CRATE_PREFIX: &str = "tri_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    #[inline]
    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }

        None
    }

    /// The path of crate `name` as seen from the invoking crate.
    ///
    /// See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(Item::Table(deps)) = self.manifest.get("dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        if let Some(Item::Table(deps)) = self.manifest.get("dev-dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Runs `func` against the invoking crate's manifest.
    ///
    /// Manifests are parsed once and cached by path, and re-read when the
    /// file's modification time changes. Call this once per macro invocation
    /// and pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\ntri_optional = \"0.1\"\ntri_core = \"0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("tri_optional")), "tri_optional");
    }

    #[test]
    fn facade_dependency_is_used() {
        let m = manifest("[dependencies]\ntri_core = \"0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("tri_optional")), "tri_core::optional");
    }

    #[test]
    fn dev_dependencies_are_searched() {
        let m = manifest("[dev-dependencies]\ntri_core = \"0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("tri_optional")), "tri_core::optional");
    }

    #[test]
    fn falls_back_to_absolute_path() {
        let m = manifest("[package]\nname = \"tri_optional\"\n");
        assert_eq!(path_string(&m.get_crate_path("tri_optional")), "tri_optional");
    }
}
