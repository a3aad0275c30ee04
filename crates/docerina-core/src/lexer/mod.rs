//! Lexer for Ballerina source modules
//!
//! The lexer converts source code into a stream of tokens, handling:
//! - Keywords, identifiers and punctuation used by declarations
//! - String literals and backtick templates (so braces inside them never
//!   unbalance a skipped body)
//! - Line comments
//! - Source location tracking

#![allow(clippy::cast_possible_truncation)] // u32 spans; modules > 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// A lexer error with location information
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The Ballerina lexer
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    source: &'source str,
    finished: bool,
    /// Collected errors during lexing
    errors: Vec<SpannedError>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            finished: false,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    ///
    /// The token stream always ends with a single `Eof` token. Invalid
    /// characters become `Error` tokens so a caller can decide whether they
    /// matter (inside a skipped body they usually do not).
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    fn error_token(&mut self, range: std::ops::Range<usize>) -> Token {
        let lexeme = &self.source[range.clone()];
        let error = if lexeme.starts_with('"') {
            LexError::UnterminatedString
        } else {
            LexError::UnexpectedChar(lexeme.chars().next().unwrap_or('\0'))
        };
        let span = Span::from_range(range);
        self.errors.push(SpannedError::new(error, span));
        Token::new(TokenKind::Error, span, lexeme)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        match self.inner.next() {
            Some(Ok(kind)) => Some(Token::new(
                kind,
                Span::from_range(self.inner.span()),
                self.inner.slice(),
            )),
            Some(Err(())) => {
                let range = self.inner.span();
                Some(self.error_token(range))
            }
            None => {
                self.finished = true;
                let end = self.source.len() as u32;
                Some(Token::new(TokenKind::Eof, Span::new(end, end), ""))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .0
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn lex_package_declaration() {
        assert_eq!(
            kinds("package foo.bar;"),
            vec![
                TokenKind::Package,
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_keywords_vs_identifiers() {
        assert_eq!(
            kinds("function functions connector action"),
            vec![
                TokenKind::Function,
                TokenKind::Ident,
                TokenKind::Connector,
                TokenKind::Action,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_annotation() {
        let (tokens, errors) = Lexer::tokenize(r#"@doc:Description{value: "a {brace}"}"#);
        assert!(errors.is_empty());
        let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
        assert_eq!(string.lexeme, r#""a {brace}""#);
        assert_eq!(tokens[0].kind, TokenKind::At);
    }

    #[test]
    fn lex_comments_and_templates() {
        assert_eq!(
            kinds("// {\njson j = `{\"a\": 1}`;"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Template,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_numbers_and_operators() {
        assert_eq!(
            kinds("1 + 2.5 * 0x1F"),
            vec![
                TokenKind::Int,
                TokenKind::Operator,
                TokenKind::Float,
                TokenKind::Operator,
                TokenKind::HexInt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_reports_unexpected_character() {
        let (tokens, errors) = Lexer::tokenize("a # b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error, LexError::UnexpectedChar('#'));
        assert_eq!(errors[0].span, Span::new(2, 3));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Error));
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn lex_spans_track_offsets() {
        let (tokens, _) = Lexer::tokenize("struct  Point");
        assert_eq!(tokens[1].span, Span::new(8, 13));
        assert_eq!(tokens[1].lexeme, "Point");
    }
}
