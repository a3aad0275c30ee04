//! Declaration model for Ballerina source modules
//!
//! This module defines the data structures the parser produces for one source
//! module: its package declaration, imports and the documented declarations
//! (functions, structs, connectors and their actions). Statement and
//! expression bodies are not modelled. All nodes carry a [`Span`] for
//! diagnostics.

mod annotation;
mod item;
mod types;

pub use annotation::*;
pub use item::*;
pub use types::*;

// Re-export Span from lexer for convenience
pub use crate::lexer::Span;

/// A trait for AST nodes that have associated source location information
pub trait Spanned {
    /// Returns the source span of this node
    fn span(&self) -> Span;
}

/// An identifier with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    /// The identifier name
    pub name: String,
    /// Source location
    pub span: Span,
}

impl Ident {
    /// Create a new identifier
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
