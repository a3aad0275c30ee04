//! Types for representing aggregated documentation

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Action, Annotation, Connector, Function, ModuleDeclarations, StructDef};

/// Documentation extracted from `@doc:` annotations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocAnnotations {
    /// `@doc:Description` value
    pub description: Option<String>,
    /// `@doc:Param` descriptions by parameter name
    pub params: HashMap<String, String>,
    /// `@doc:Return` descriptions in declaration order
    pub returns: Vec<ReturnDoc>,
    /// `@doc:Field` descriptions by field name
    pub fields: HashMap<String, String>,
}

/// Documentation for one return value
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnDoc {
    /// Return name, when the value used the `name: description` form
    pub name: Option<String>,
    pub description: String,
}

impl DocAnnotations {
    /// Collect the `doc:` annotations of a declaration
    ///
    /// Unknown annotations are ignored. A repeated `Description` keeps the
    /// first value.
    #[must_use]
    pub fn parse(annotations: &[Annotation]) -> Self {
        let mut doc = DocAnnotations::default();

        for annotation in annotations {
            let Some(value) = annotation.value() else {
                continue;
            };
            match annotation.name.as_str() {
                "doc:Description" => {
                    if doc.description.is_none() {
                        doc.description = Some(value.trim().to_string());
                    }
                }
                "doc:Param" => {
                    if let Some((name, desc)) = parse_named_value(value) {
                        doc.params.entry(name).or_insert(desc);
                    }
                }
                "doc:Field" => {
                    if let Some((name, desc)) = parse_named_value(value) {
                        doc.fields.entry(name).or_insert(desc);
                    }
                }
                "doc:Return" => {
                    let entry = match split_name(value) {
                        Some((name, desc)) => ReturnDoc {
                            name: Some(name),
                            description: desc,
                        },
                        None => ReturnDoc {
                            name: None,
                            description: value.trim().to_string(),
                        },
                    };
                    doc.returns.push(entry);
                }
                _ => {}
            }
        }

        doc
    }

    /// Description of a parameter, or "" when undocumented
    #[must_use]
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map_or("", String::as_str)
    }

    /// Description of a struct field, or "" when undocumented
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// Description of the return value at `index`
    ///
    /// A named return first looks for a matching `name:` entry; otherwise the
    /// entry at the same position is used.
    #[must_use]
    pub fn return_value(&self, index: usize, name: Option<&str>) -> &str {
        if let Some(name) = name {
            if let Some(doc) = self
                .returns
                .iter()
                .find(|r| r.name.as_deref() == Some(name))
            {
                return &doc.description;
            }
        }
        self.returns
            .get(index)
            .map_or("", |r| r.description.as_str())
    }

    /// Check if nothing was documented
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.params.is_empty()
            && self.returns.is_empty()
            && self.fields.is_empty()
    }
}

/// Split `name: description`; the name must be a plain identifier
fn split_name(value: &str) -> Option<(String, String)> {
    let colon_pos = value.find(':')?;
    let name = value[..colon_pos].trim();
    if !is_identifier(name) {
        return None;
    }
    let description = value[colon_pos + 1..].trim();
    Some((name.to_string(), description.to_string()))
}

/// Parse a param/field value: `name: description`, falling back to `name description`
fn parse_named_value(value: &str) -> Option<(String, String)> {
    if let Some(pair) = split_name(value) {
        return Some(pair);
    }
    let value = value.trim();
    let (name, rest) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
    is_identifier(name).then(|| (name.to_string(), rest.trim().to_string()))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// All declarations of one logical package
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Dotted package name
    pub name: String,
    /// Contributing source modules, in merge order
    pub sources: Vec<PathBuf>,
    pub functions: Vec<Function>,
    pub structs: Vec<StructDef>,
    pub connectors: Vec<Connector>,
}

impl Package {
    /// Create an empty package
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            functions: Vec::new(),
            structs: Vec::new(),
            connectors: Vec::new(),
        }
    }

    /// Merge a module's declarations into this package
    ///
    /// Declarations keep module order. A declaration whose name is already
    /// present in the same collection is dropped (first occurrence wins).
    pub fn add_module(&mut self, path: &Path, module: ModuleDeclarations) {
        self.sources.push(path.to_path_buf());
        merge_unique(&self.name, path, &mut self.functions, module.functions, |f| {
            &f.name.name
        });
        merge_unique(&self.name, path, &mut self.structs, module.structs, |s| {
            &s.name.name
        });
        merge_unique(&self.name, path, &mut self.connectors, module.connectors, |c| {
            &c.name.name
        });
    }

    /// Number of top-level declarations (functions, structs, connectors)
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.functions.len() + self.structs.len() + self.connectors.len()
    }

    /// All actions of all connectors, in declaration order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.connectors.iter().flat_map(|c| c.actions.iter())
    }

    /// Names of the types (structs and connectors) this package declares
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.structs
            .iter()
            .map(|s| s.name.name.as_str())
            .chain(self.connectors.iter().map(|c| c.name.name.as_str()))
    }

    /// The last dot-separated segment of the name (`xyz` for `foo.bar.xyz`)
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

fn merge_unique<T>(
    package: &str,
    path: &Path,
    target: &mut Vec<T>,
    incoming: Vec<T>,
    name: impl Fn(&T) -> &String,
) {
    let mut seen: HashSet<String> = target.iter().map(|t| name(t).clone()).collect();
    for item in incoming {
        if seen.insert(name(&item).clone()) {
            target.push(item);
        } else {
            debug!(
                package,
                path = %path.display(),
                name = %name(&item),
                "duplicate declaration ignored"
            );
        }
    }
}

/// Packages by name, iterated in ascending name order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageRegistry {
    packages: BTreeMap<String, Package>,
}

impl PackageRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the package with the given name, creating it if absent
    pub fn entry(&mut self, name: &str) -> &mut Package {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| Package::new(name))
    }

    /// Merge a module into the package it declares
    pub fn add_module(&mut self, path: &Path, module: ModuleDeclarations) {
        let name = module.package_path().to_string();
        self.entry(&name).add_module(path, module);
    }

    /// Look up a package by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Check whether a package is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Iterate packages in name order
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Package names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Number of packages
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if no package was registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'a> IntoIterator for &'a PackageRegistry {
    type Item = &'a Package;
    type IntoIter = std::collections::btree_map::Values<'a, String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn annotations(source: &str) -> Vec<Annotation> {
        let module = Parser::parse_module(&format!("{source}\nstruct X {{ }}")).unwrap();
        module.structs[0].annotations.clone()
    }

    #[test]
    fn parse_doc_annotations() {
        let doc = DocAnnotations::parse(&annotations(
            r#"@doc:Description{value: "Get HTTP header"}
@doc:Param{value: "m: incoming message"}
@doc:Param{value: "key: HTTP header key"}
@doc:Return{value: "value: HTTP header value"}
@doc:Field{value: "text: the text"}"#,
        ));
        assert_eq!(doc.description.as_deref(), Some("Get HTTP header"));
        assert_eq!(doc.param("key"), "HTTP header key");
        assert_eq!(doc.param("missing"), "");
        assert_eq!(doc.return_value(0, Some("value")), "HTTP header value");
        assert_eq!(doc.field("text"), "the text");
    }

    #[test]
    fn positional_returns() {
        let doc = DocAnnotations::parse(&annotations(
            r#"@doc:Return{value: "response object"}
@doc:Return{value: "status code"}"#,
        ));
        assert_eq!(doc.returns[0].name, None);
        assert_eq!(doc.return_value(0, None), "response object");
        assert_eq!(doc.return_value(1, Some("code")), "status code");
        assert_eq!(doc.return_value(2, None), "");
    }

    #[test]
    fn param_without_colon() {
        let doc = DocAnnotations::parse(&annotations(r#"@doc:Param{value: "path the resource path"}"#));
        assert_eq!(doc.param("path"), "the resource path");
    }

    #[test]
    fn unrelated_annotations_are_ignored() {
        let doc = DocAnnotations::parse(&annotations(r#"@http:GET{} @doc:Param{value: ": nameless"}"#));
        assert!(doc.is_empty());
    }

    #[test]
    fn package_merge_keeps_first_duplicate() {
        let a = Parser::parse_module("package p;\nfunction f() { }\nstruct S { int a; }").unwrap();
        let b = Parser::parse_module("package p;\nstruct S { int b; }\nstruct T { }").unwrap();

        let mut package = Package::new("p");
        package.add_module(Path::new("a.bal"), a);
        package.add_module(Path::new("b.bal"), b);

        assert_eq!(package.sources.len(), 2);
        assert_eq!(package.declaration_count(), 3);
        assert_eq!(package.structs[0].fields[0].name.name, "a");
        let names: Vec<_> = package.type_names().collect();
        assert_eq!(names, vec!["S", "T"]);
    }

    #[test]
    fn registry_iterates_in_name_order() {
        let mut registry = PackageRegistry::new();
        for (name, source) in [
            ("b.bal", "package foo.bar.xyz;"),
            ("a.bal", "package foo.bar;"),
            ("c.bal", "struct A { }"),
        ] {
            registry.add_module(Path::new(name), Parser::parse_module(source).unwrap());
        }
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["default", "foo.bar", "foo.bar.xyz"]);
        assert_eq!(registry.get("foo.bar.xyz").unwrap().short_name(), "xyz");
        assert_eq!(registry.len(), 3);
    }
}
