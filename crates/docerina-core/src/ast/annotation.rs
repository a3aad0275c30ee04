//! Annotations attached to declarations

use crate::lexer::Span;

use super::Spanned;

/// An annotation such as `@doc:Description{value: "..."}`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Qualified annotation name without the `@` (`doc:Description`)
    pub name: String,
    /// Key/value attributes in source order, string values unescaped
    pub attributes: Vec<(String, String)>,
    /// Source location
    pub span: Span,
}

impl Annotation {
    /// Create an annotation with no attributes
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            span,
        }
    }

    /// Add an attribute, builder style
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Look up an attribute by key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `value` attribute, which every `doc:` annotation carries
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.attribute("value")
    }
}

impl Spanned for Annotation {
    fn span(&self) -> Span {
        self.span
    }
}
