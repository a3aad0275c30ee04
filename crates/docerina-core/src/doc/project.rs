//! Project-wide package aggregation
//!
//! This module discovers the source modules under a root, builds each one,
//! and merges the results into a [`PackageRegistry`] keyed by the package
//! each module declares.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::PackageRegistry;
use crate::builder::{BallerinaModelBuilder, BuildError, SourceModelBuilder};
use crate::error::{DocError, DocResult};

/// Default extension of source modules
pub const SOURCE_EXTENSION: &str = "bal";

/// Excludes packages by name prefix
///
/// A trailing `.*` is stripped from the filter text; `foo.bar` and
/// `foo.bar.*` both exclude `foo.bar` and every package whose name starts
/// with `foo.bar`. Wildcards elsewhere are matched literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    prefix: Option<String>,
}

impl PackageFilter {
    /// Create a filter from user input; blank input excludes nothing
    #[must_use]
    pub fn new(filter: &str) -> Self {
        if filter.trim().is_empty() {
            return Self::none();
        }
        let prefix = filter.strip_suffix(".*").unwrap_or(filter);
        Self {
            prefix: Some(prefix.to_string()),
        }
    }

    /// A filter that excludes nothing
    #[must_use]
    pub fn none() -> Self {
        Self { prefix: None }
    }

    /// Check whether a package is excluded
    #[must_use]
    pub fn excludes(&self, package: &str) -> bool {
        self.prefix
            .as_deref()
            .is_some_and(|prefix| package.starts_with(prefix))
    }

    /// Check whether the filter excludes anything at all
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.prefix.is_some()
    }
}

impl From<Option<&str>> for PackageFilter {
    fn from(filter: Option<&str>) -> Self {
        filter.map_or_else(Self::none, Self::new)
    }
}

/// Find every source module under `root`, in sorted path order
///
/// A root that is itself a file is returned as-is, whatever its extension.
///
/// # Errors
///
/// Returns [`DocError::SourceNotFound`] if `root` does not exist.
pub fn discover(root: &Path, extension: &str) -> DocResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(DocError::SourceNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let base = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{base}/**/*.{extension}");
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(DocError::io(path, e.into_error()));
            }
        }
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered source modules");
    Ok(files)
}

/// Aggregate the modules under `root` with the built-in Ballerina builder
///
/// # Errors
///
/// See [`aggregate_with`].
pub fn aggregate(root: &Path, filter: &PackageFilter) -> DocResult<PackageRegistry> {
    aggregate_with(&BallerinaModelBuilder, root, filter, SOURCE_EXTENSION)
}

/// Aggregate the modules under `root` into a registry
///
/// Invalid modules are skipped with a warning; modules whose package is
/// excluded by `filter` never reach the registry.
///
/// # Errors
///
/// Returns an error if the root does not exist or a module cannot be read.
pub fn aggregate_with(
    builder: &dyn SourceModelBuilder,
    root: &Path,
    filter: &PackageFilter,
    extension: &str,
) -> DocResult<PackageRegistry> {
    let mut registry = PackageRegistry::new();

    for path in discover(root, extension)? {
        let module = match builder.build(&path) {
            Ok(module) => module,
            Err(BuildError::Invalid { path, errors }) => {
                warn!(
                    error = errors.first().map_or("", String::as_str),
                    "Invalid Ballerina file: {}",
                    path.display()
                );
                continue;
            }
            Err(BuildError::Io { path, source }) => return Err(DocError::io(path, source)),
        };

        let package = module.package_path();
        if filter.excludes(package) {
            info!("Package {package} excluded");
            continue;
        }

        debug!(
            package,
            path = %path.display(),
            declarations = module.declaration_count(),
            "merging module"
        );
        registry.add_module(&path, module);
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ModuleDeclarations;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[test]
    fn filter_strips_trailing_wildcard_only() {
        let filter = PackageFilter::new("foo.bar.*");
        assert!(filter.excludes("foo.bar"));
        assert!(filter.excludes("foo.bar.xyz"));
        assert!(!filter.excludes("foo.baz"));

        let literal = PackageFilter::new("foo.*.bar");
        assert!(!literal.excludes("foo.x.bar"));
        assert!(literal.excludes("foo.*.bar"));
    }

    #[test]
    fn blank_filter_excludes_nothing() {
        assert!(!PackageFilter::new("  ").is_active());
        assert!(!PackageFilter::from(None).excludes("foo"));
        assert!(PackageFilter::from(Some("foo")).excludes("foo"));
    }

    #[test]
    fn discover_sorted_and_by_extension() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        std::fs::write(dir.path().join("b/nested/z.bal"), "").unwrap();
        std::fs::write(dir.path().join("a.bal"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = discover(dir.path(), "bal").unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.bal"), dir.path().join("b/nested/z.bal")]
        );
    }

    #[test]
    fn discover_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = discover(&dir.path().join("missing"), "bal").unwrap_err();
        assert!(matches!(err, DocError::SourceNotFound(_)));
    }

    /// Records the paths it was asked to build
    struct RecordingBuilder {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl SourceModelBuilder for RecordingBuilder {
        fn build(&self, path: &Path) -> Result<ModuleDeclarations, BuildError> {
            self.seen.borrow_mut().push(path.to_path_buf());
            if path.ends_with("broken.bal") {
                return Err(BuildError::Invalid {
                    path: path.to_path_buf(),
                    errors: vec!["1:1: broken".to_string()],
                });
            }
            Ok(ModuleDeclarations {
                package: Some("custom".to_string()),
                ..ModuleDeclarations::default()
            })
        }
    }

    #[test]
    fn aggregate_with_custom_builder() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.bal"), "").unwrap();
        std::fs::write(dir.path().join("broken.bal"), "").unwrap();

        let builder = RecordingBuilder {
            seen: RefCell::new(Vec::new()),
        };
        let registry =
            aggregate_with(&builder, dir.path(), &PackageFilter::none(), "bal").unwrap();

        assert_eq!(builder.seen.borrow().len(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("custom").unwrap().sources.len(), 1);
    }
}
