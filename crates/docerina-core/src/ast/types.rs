//! Type references used in declaration signatures

use crate::lexer::Span;

use super::Spanned;

/// A type named in a signature: `string`, `Argument`, `foo.bar:TestConnector`, `int[][]`
///
/// The qualifier is kept as written; `import_path` records which import it
/// named, when the module has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Owning package qualifier (`foo.bar` in `foo.bar:TestConnector`)
    pub package: Option<String>,
    /// Full package path the qualifier refers to through an import
    pub import_path: Option<String>,
    /// The referenced type's own name
    pub name: String,
    /// Number of `[]` suffixes
    pub dimensions: usize,
    /// Source location
    pub span: Span,
}

impl TypeName {
    /// Create an unqualified, non-array type reference
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            package: None,
            import_path: None,
            name: name.into(),
            dimensions: 0,
            span: Span::default(),
        }
    }

    /// Create a package-qualified type reference
    #[must_use]
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            ..Self::simple(name)
        }
    }

    /// Turn this reference into an array of the same element type
    #[must_use]
    pub fn array_of(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Bind the qualifier to the package path it was imported from
    #[must_use]
    pub fn imported_from(mut self, path: impl Into<String>) -> Self {
        self.import_path = Some(path.into());
        self
    }

    /// The text shown for the referenced type, without array suffixes
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{}:{}", package, self.name),
            None => self.name.clone(),
        }
    }

    /// The `[]` suffixes for array types
    #[must_use]
    pub fn array_suffix(&self) -> String {
        "[]".repeat(self.dimensions)
    }
}

impl Spanned for TypeName {
    fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.display_name(), self.array_suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_qualifier_and_dimensions() {
        assert_eq!(TypeName::simple("string").to_string(), "string");
        assert_eq!(
            TypeName::qualified("foo.bar", "TestConnector").to_string(),
            "foo.bar:TestConnector"
        );
        assert_eq!(TypeName::simple("int").array_of(2).to_string(), "int[][]");
    }
}
