//! Docerina Core - API documentation generator for Ballerina packages
//!
//! This crate provides the core functionality:
//! - Lexer: Tokenization of Ballerina source code
//! - AST: Declaration model of a source module
//! - Parser: Declaration extraction from the token stream
//! - Builder: The source model builder seam used by the pipeline
//! - Doc: Package aggregation, cross-linking and HTML rendering
//! - Config: `docerina.toml` loading

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of Ballerina source code
pub mod lexer;

/// Declaration model - parsed representation of a source module
pub mod ast;

/// Parser module - converts tokens into declarations
pub mod parser;

/// Source model builders - one module in, declarations out
pub mod builder;

/// Generator configuration
pub mod config;

/// Documentation generation module
pub mod doc;

/// Pipeline errors
pub mod error;

/// Convenience re-export of lexer
pub use lexer::Lexer;

/// Convenience re-export of parser
pub use parser::Parser;

/// Convenience re-exports of the builder seam
pub use builder::{BallerinaModelBuilder, BuildError, SourceModelBuilder};

/// Convenience re-export of configuration
pub use config::{ConfigError, DocConfig};

/// Convenience re-exports of the pipeline entry points
pub use doc::{aggregate, generate, render, write_site, PackageFilter, PackageRegistry, Report};

/// Convenience re-export of pipeline errors
pub use error::{DocError, DocResult};
