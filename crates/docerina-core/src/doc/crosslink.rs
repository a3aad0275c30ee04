//! Cross-linking for documentation
//!
//! This module resolves the type references found in signatures to links:
//! the primitives page, an anchor in the current package document, or an
//! anchor in another package's document. References that match nothing are
//! rendered as plain text.

use std::collections::{HashMap, HashSet};

use super::html::escape_html;
use super::primitives::Primitive;
use super::types::PackageRegistry;
use super::{package_page, PRIMITIVES_PAGE};
use crate::ast::TypeName;

/// Where a type reference points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A built-in type, documented on the primitives page
    Primitive { name: String },
    /// A struct or connector of the package being rendered
    SamePackage { name: String },
    /// A struct or connector of another package
    OtherPackage { package: String, name: String },
    /// Nothing by that name is known
    Unresolved,
}

impl LinkTarget {
    /// The link target, or "" when unresolved
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            Self::Primitive { name } => format!("{PRIMITIVES_PAGE}#{name}"),
            Self::SamePackage { name } => format!("#{name}"),
            Self::OtherPackage { package, name } => format!("{}#{name}", package_page(package)),
            Self::Unresolved => String::new(),
        }
    }

    /// Check whether the reference resolved to anything
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Cross-linker for resolving type references to links
///
/// The type index is built once at construction; the registry is not
/// scanned again per reference.
pub struct CrossLinker<'a> {
    registry: &'a PackageRegistry,
    /// Built-in type names
    primitives: HashSet<&'static str>,
    /// Type name -> declaring packages, in registry order
    type_index: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> CrossLinker<'a> {
    /// Create a new cross-linker over a registry and primitive catalog
    #[must_use]
    pub fn new(registry: &'a PackageRegistry, primitives: &[Primitive]) -> Self {
        let mut type_index: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for package in registry {
            for name in package.type_names() {
                let owners = type_index.entry(name).or_default();
                if owners.last() != Some(&package.name.as_str()) {
                    owners.push(&package.name);
                }
            }
        }

        Self {
            registry,
            primitives: primitives.iter().map(|p| p.name).collect(),
            type_index,
        }
    }

    /// Resolve a type reference as seen from `current_package`
    ///
    /// Unqualified names try the primitive catalog, then the current
    /// package, then every other package in registry order. Array
    /// dimensions are ignored.
    #[must_use]
    pub fn resolve(&self, ty: &TypeName, current_package: &str) -> LinkTarget {
        match &ty.package {
            Some(qualifier) => self.resolve_qualified(
                qualifier,
                ty.import_path.as_deref(),
                &ty.name,
                current_package,
            ),
            None => self.resolve_unqualified(&ty.name, current_package),
        }
    }

    fn resolve_unqualified(&self, name: &str, current_package: &str) -> LinkTarget {
        if self.primitives.contains(name) {
            return LinkTarget::Primitive {
                name: name.to_string(),
            };
        }

        let Some(owners) = self.type_index.get(name) else {
            return LinkTarget::Unresolved;
        };
        if owners.contains(&current_package) {
            return LinkTarget::SamePackage {
                name: name.to_string(),
            };
        }
        owners
            .first()
            .map_or(LinkTarget::Unresolved, |package| LinkTarget::OtherPackage {
                package: (*package).to_string(),
                name: name.to_string(),
            })
    }

    /// `q:Name` resolves against the package `q` was imported from, then the
    /// package named `q`, or else the packages whose last segment is `q`
    fn resolve_qualified(
        &self,
        qualifier: &str,
        import_path: Option<&str>,
        name: &str,
        current_package: &str,
    ) -> LinkTarget {
        let Some(owners) = self.type_index.get(name) else {
            return LinkTarget::Unresolved;
        };

        let imported = import_path.filter(|path| owners.contains(path));
        let candidates: Vec<&str> = if let Some(path) = imported {
            vec![path]
        } else if owners.contains(&qualifier) {
            vec![qualifier]
        } else {
            owners
                .iter()
                .copied()
                .filter(|package| {
                    self.registry
                        .get(package)
                        .is_some_and(|p| p.short_name() == qualifier)
                })
                .collect()
        };

        if candidates.contains(&current_package) {
            return LinkTarget::SamePackage {
                name: name.to_string(),
            };
        }
        candidates
            .first()
            .map_or(LinkTarget::Unresolved, |package| LinkTarget::OtherPackage {
                package: (*package).to_string(),
                name: name.to_string(),
            })
    }

    /// Render a type reference as an HTML fragment
    ///
    /// Resolved references become `<a href="...">name</a>` followed by any
    /// `[]` suffixes; unresolved ones are escaped plain text.
    #[must_use]
    pub fn link(&self, ty: &TypeName, current_package: &str) -> String {
        let display = escape_html(&ty.display_name());
        let suffix = ty.array_suffix();
        let target = self.resolve(ty, current_package);
        if target.is_resolved() {
            format!("<a href=\"{}\">{display}</a>{suffix}", target.href())
        } else {
            format!("{display}{suffix}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::primitives::list_primitives;
    use crate::parser::Parser;
    use std::path::Path;

    fn registry(sources: &[&str]) -> PackageRegistry {
        let mut registry = PackageRegistry::new();
        for (i, source) in sources.iter().enumerate() {
            let module = Parser::parse_module(source).unwrap();
            registry.add_module(Path::new(&format!("{i}.bal")), module);
        }
        registry
    }

    fn test_registry() -> PackageRegistry {
        registry(&[
            "package foo.bar;\nstruct Local { }\nconnector TestConnector() { }",
            "package foo.bar.xyz;\nstruct Argument { string text; }\nstruct Local { }",
            "package other.xyz;\nstruct Argument { }",
        ])
    }

    #[test]
    fn resolve_primitive() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        let target = linker.resolve(&TypeName::simple("string"), "foo.bar");
        assert_eq!(target.href(), "primitives.html#string");
    }

    #[test]
    fn resolve_same_package_wins() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        assert_eq!(
            linker.resolve(&TypeName::simple("Local"), "foo.bar.xyz").href(),
            "#Local"
        );
        assert_eq!(
            linker.resolve(&TypeName::simple("Local"), "foo.bar").href(),
            "#Local"
        );
    }

    #[test]
    fn resolve_other_package_in_registry_order() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        let target = linker.resolve(&TypeName::simple("Argument"), "foo.bar");
        assert_eq!(
            target,
            LinkTarget::OtherPackage {
                package: "foo.bar.xyz".to_string(),
                name: "Argument".to_string(),
            }
        );
        assert_eq!(target.href(), "foo.bar.xyz.html#Argument");
    }

    #[test]
    fn resolve_qualified_by_full_name_and_last_segment() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        assert_eq!(
            linker
                .resolve(&TypeName::qualified("other.xyz", "Argument"), "foo.bar")
                .href(),
            "other.xyz.html#Argument"
        );
        // Two packages end in `xyz`; registry order picks foo.bar.xyz
        assert_eq!(
            linker
                .resolve(&TypeName::qualified("xyz", "Argument"), "foo.bar")
                .href(),
            "foo.bar.xyz.html#Argument"
        );
        assert_eq!(
            linker
                .resolve(&TypeName::qualified("xyz", "Argument"), "other.xyz")
                .href(),
            "#Argument"
        );
        assert_eq!(
            linker.resolve(&TypeName::qualified("nope", "Argument"), "foo.bar"),
            LinkTarget::Unresolved
        );
    }

    #[test]
    fn resolve_qualified_through_import_alias() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());

        let aliased = TypeName::qualified("x", "Argument").imported_from("other.xyz");
        assert_eq!(linker.resolve(&aliased, "foo.bar").href(), "other.xyz.html#Argument");
        assert_eq!(
            linker.link(&aliased, "foo.bar"),
            "<a href=\"other.xyz.html#Argument\">x:Argument</a>"
        );

        // An import of a package that does not declare the type falls back
        let stale = TypeName::qualified("xyz", "Argument").imported_from("gone.xyz");
        assert_eq!(linker.resolve(&stale, "foo.bar").href(), "foo.bar.xyz.html#Argument");
    }

    #[test]
    fn unresolved_renders_plain_text() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        let ty = TypeName::simple("Missing");
        assert_eq!(linker.resolve(&ty, "foo.bar").href(), "");
        assert_eq!(linker.link(&ty, "foo.bar"), "Missing");
    }

    #[test]
    fn link_keeps_array_suffix_outside_anchor() {
        let registry = test_registry();
        let linker = CrossLinker::new(&registry, list_primitives());
        assert_eq!(
            linker.link(&TypeName::simple("Argument").array_of(1), "foo.bar"),
            "<a href=\"foo.bar.xyz.html#Argument\">Argument</a>[]"
        );
        assert_eq!(
            linker.link(&TypeName::qualified("foo.bar", "TestConnector"), "foo.bar"),
            "<a href=\"#TestConnector\">foo.bar:TestConnector</a>"
        );
    }
}
