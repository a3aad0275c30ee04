//! Source model builders turn one source module into its declarations
//!
//! The documentation pipeline only depends on the [`SourceModelBuilder`]
//! trait; [`BallerinaModelBuilder`] is the implementation backed by this
//! crate's lexer and parser.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ast::ModuleDeclarations;
use crate::lexer::LineIndex;
use crate::parser::{ParseError, Parser};

/// Why a module could not be turned into declarations
#[derive(Error, Debug)]
pub enum BuildError {
    /// The module is malformed; callers skip it and keep going
    #[error("invalid module {}: {}", .path.display(), first_error(.errors))]
    Invalid { path: PathBuf, errors: Vec<String> },

    /// The module could not be read at all
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn first_error(errors: &[String]) -> &str {
    errors.first().map_or("unknown error", String::as_str)
}

impl BuildError {
    /// Returns true if the run may continue past this error
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Converts one source module into a declaration set
pub trait SourceModelBuilder {
    /// Build the declarations of the module at `path`
    ///
    /// # Errors
    ///
    /// [`BuildError::Invalid`] for malformed modules, [`BuildError::Io`]
    /// when the file cannot be read.
    fn build(&self, path: &Path) -> Result<ModuleDeclarations, BuildError>;
}

/// Builder for Ballerina `.bal` modules
#[derive(Debug, Clone, Copy, Default)]
pub struct BallerinaModelBuilder;

impl BallerinaModelBuilder {
    /// Build declarations from in-memory source
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Invalid`] with `line:column` prefixed messages
    /// when the source does not parse.
    pub fn build_source(path: &Path, source: &str) -> Result<ModuleDeclarations, BuildError> {
        Parser::parse_module(source).map_err(|errors| BuildError::Invalid {
            path: path.to_path_buf(),
            errors: format_errors(source, &errors),
        })
    }
}

impl SourceModelBuilder for BallerinaModelBuilder {
    fn build(&self, path: &Path) -> Result<ModuleDeclarations, BuildError> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            // Not UTF-8: a broken module, not a broken disk
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(BuildError::Invalid {
                    path: path.to_path_buf(),
                    errors: vec![e.to_string()],
                })
            }
            Err(source) => {
                return Err(BuildError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::build_source(path, &source)
    }
}

/// Render parse errors as `line:column: message`
fn format_errors(source: &str, errors: &[ParseError]) -> Vec<String> {
    let index = LineIndex::new(source);
    errors
        .iter()
        .map(|e| format!("{}: {}", index.location(e.span.start), e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn build_valid_module() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.bal");
        std::fs::write(&path, "package foo;\nstruct A { int x; }\n").unwrap();

        let module = BallerinaModelBuilder.build(&path).unwrap();
        assert_eq!(module.package_path(), "foo");
        assert_eq!(module.structs.len(), 1);
    }

    #[test]
    fn invalid_module_reports_location() {
        let err = BallerinaModelBuilder::build_source(
            Path::new("bad.bal"),
            "package foo;\n\nwhat is this;\n",
        )
        .unwrap_err();
        assert!(err.is_recoverable());
        match err {
            BuildError::Invalid { path, errors } => {
                assert_eq!(path, PathBuf::from("bad.bal"));
                assert!(errors[0].starts_with("3:1: "), "{}", errors[0]);
            }
            BuildError::Io { .. } => panic!("expected invalid module"),
        }
    }

    #[test]
    fn non_utf8_module_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.bal");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = BallerinaModelBuilder.build(&path).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = BallerinaModelBuilder
            .build(&dir.path().join("missing.bal"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
        assert!(!err.is_recoverable());
    }
}
