//! Parser for Ballerina source modules
//!
//! This module implements a recursive descent parser that extracts the
//! documented declarations of a module: the package declaration, imports,
//! functions, structs, connectors and their actions, with the annotations
//! attached to each. Function, action and service bodies are skipped as
//! balanced brace groups; `const` declarations are skipped up to their `;`.
//!
//! # Example
//!
//! ```
//! use docerina_core::parser::Parser;
//!
//! let source = "package foo.bar;\nstruct Point { int x; int y; }";
//! let module = Parser::parse_module(source).unwrap();
//! assert_eq!(module.package_path(), "foo.bar");
//! assert_eq!(module.structs[0].fields.len(), 2);
//! ```

mod error;

pub use error::{ExpectedToken, ParseError, ParseErrorKind};

use crate::ast::{
    Action, Annotation, Connector, Function, Ident, Import, ModuleDeclarations, Param,
    ReturnParam, StructDef, TypeName,
};
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Modifiers preceding a declaration; `public` is accepted but not recorded
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    is_native: bool,
}

/// The Ballerina declaration parser
pub struct Parser {
    /// All tokens from the source, ending with `Eof`
    tokens: Vec<Token>,
    /// Current position in the token stream
    position: usize,
    /// End offset of the last consumed token
    last_end: u32,
    /// Collected parse errors
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser from source code
    ///
    /// Lexer errors surface as `Error` tokens wherever the parser inspects
    /// them; inside skipped bodies they are ignored.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let (tokens, _) = Lexer::tokenize(source);
        Self {
            tokens,
            position: 0,
            last_end: 0,
            errors: Vec::new(),
        }
    }

    /// Parse an entire module (source file)
    pub fn parse_module(source: &str) -> Result<ModuleDeclarations, Vec<ParseError>> {
        let mut parser = Parser::new(source);
        let module = parser.module();
        if parser.errors.is_empty() {
            Ok(module)
        } else {
            Err(parser.errors)
        }
    }

    // ==================== Token Management ====================

    /// Get the current token
    fn current(&self) -> &Token {
        // The lexer always emits a trailing Eof, so the stream is never empty
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    /// Get the current token kind
    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Check if we're at end of file
    fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Advance to the next token, skipping trivia
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
            self.last_end = token.span.end;
        }
        self.skip_trivia();
        token
    }

    /// Skip trivia tokens (comments)
    fn skip_trivia(&mut self) {
        while self.position < self.tokens.len() && self.current().kind.is_trivia() {
            self.position += 1;
        }
    }

    /// Check if the current token matches a kind
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume a token if it matches, returning it
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect and consume a specific token, or error
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(ExpectedToken::Token(kind)))
        }
    }

    /// Expect an identifier token
    fn expect_ident(&mut self) -> ParseResult<Ident> {
        let token = self.current().clone();
        if token.kind == TokenKind::Ident {
            self.advance();
            Ok(Ident::new(token.lexeme, token.span))
        } else if token.kind == TokenKind::Eof {
            Err(ParseError::new(ParseErrorKind::UnexpectedEof, token.span))
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier,
                token.span,
            ))
        }
    }

    /// Build an error for the current token
    fn unexpected(&self, expected: ExpectedToken) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            return ParseError::new(ParseErrorKind::UnexpectedEof, token.span);
        }
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: token.kind,
                expected,
            },
            token.span,
        )
    }

    /// Record an error but continue parsing
    fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    // ==================== Module Parsing ====================

    /// Parse a complete module
    fn module(&mut self) -> ModuleDeclarations {
        self.skip_trivia();
        let mut module = ModuleDeclarations::default();
        let mut started = false;

        while !self.is_eof() {
            let result = self.top_level(&mut module, started);
            started = true;
            if let Err(e) = result {
                self.error(e);
                self.synchronize();
            }
        }

        module.bind_imports();
        module
    }

    /// Parse one top-level construct into the module
    fn top_level(&mut self, module: &mut ModuleDeclarations, started: bool) -> ParseResult<()> {
        match self.current_kind() {
            TokenKind::Package => {
                if started {
                    return Err(ParseError::new(
                        ParseErrorKind::MisplacedPackage,
                        self.current().span,
                    ));
                }
                self.advance();
                let (path, _) = self.dotted_path()?;
                self.expect(TokenKind::Semicolon)?;
                module.package = Some(path);
            }
            TokenKind::Import => {
                let import = self.import()?;
                module.imports.push(import);
            }
            _ => self.declaration(module)?,
        }
        Ok(())
    }

    /// Parse a dotted package path: `foo.bar.xyz`
    fn dotted_path(&mut self) -> ParseResult<(String, Span)> {
        let first = self.expect_ident()?;
        let start = first.span.start;
        let mut path = first.name;
        while self.eat(TokenKind::Dot).is_some() {
            path.push('.');
            path.push_str(&self.expect_ident()?.name);
        }
        Ok((path, Span::new(start, self.last_end)))
    }

    /// Parse an import: `import foo.bar [as alias];`
    fn import(&mut self) -> ParseResult<Import> {
        let start = self.expect(TokenKind::Import)?.span.start;
        let (path, _) = self.dotted_path()?;
        let alias = if self.eat(TokenKind::As).is_some() {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let end = self.expect(TokenKind::Semicolon)?.span.end;
        Ok(Import {
            path,
            alias,
            span: Span::new(start, end),
        })
    }

    // ==================== Declarations ====================

    /// Parse an annotated declaration
    fn declaration(&mut self, module: &mut ModuleDeclarations) -> ParseResult<()> {
        let start = self.current().span.start;
        let annotations = self.annotations()?;
        let modifiers = self.modifiers();

        match self.current_kind() {
            TokenKind::Function => {
                let function = self.function(annotations, modifiers, start)?;
                module.functions.push(function);
            }
            TokenKind::Struct => {
                let def = self.struct_def(annotations, start)?;
                module.structs.push(def);
            }
            TokenKind::Connector => {
                let connector = self.connector(annotations, modifiers, start)?;
                module.connectors.push(connector);
            }
            TokenKind::Const => self.skip_statement()?,
            TokenKind::Service => self.service()?,
            TokenKind::Eof => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEof,
                    self.current().span,
                ))
            }
            found => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedDeclaration(found),
                    self.current().span,
                )
                .with_hint("only functions, structs, connectors, constants and services may appear here"))
            }
        }
        Ok(())
    }

    /// Parse `public` and `native` in any order
    fn modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            if self.eat(TokenKind::Public).is_some() {
                continue;
            }
            if self.eat(TokenKind::Native).is_some() {
                modifiers.is_native = true;
            } else {
                return modifiers;
            }
        }
    }

    /// Parse a function: `function name(params) (returns) { body }` or `...;`
    fn function(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Modifiers,
        start: u32,
    ) -> ParseResult<Function> {
        self.expect(TokenKind::Function)?;
        let name = self.expect_ident()?;
        let params = self.param_list()?;
        let returns = self.return_list()?;
        self.body_or_semicolon()?;

        Ok(Function {
            name,
            params,
            returns,
            annotations,
            is_native: modifiers.is_native,
            span: Span::new(start, self.last_end),
        })
    }

    /// Parse a struct: `struct Name { type field; ... }`
    fn struct_def(&mut self, annotations: Vec<Annotation>, start: u32) -> ParseResult<StructDef> {
        self.expect(TokenKind::Struct)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_eof() {
            // Field-level annotations are accepted but not documented
            self.annotations()?;
            let ty = self.type_name()?;
            let field_name = self.expect_ident()?;
            if self.eat(TokenKind::Eq).is_some() {
                self.skip_statement()?;
            } else {
                self.expect(TokenKind::Semicolon)?;
            }
            fields.push(Param::new(field_name, ty));
        }
        self.expect(TokenKind::RBrace)?;

        Ok(StructDef {
            name,
            fields,
            annotations,
            span: Span::new(start, self.last_end),
        })
    }

    /// Parse a connector with its actions
    fn connector(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Modifiers,
        start: u32,
    ) -> ParseResult<Connector> {
        self.expect(TokenKind::Connector)?;
        let name = self.expect_ident()?;
        let params = self.param_list()?;
        self.expect(TokenKind::LBrace)?;

        let mut actions = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_eof() {
            let member_start = self.current().span.start;
            let member_annotations = self.annotations()?;
            let member_modifiers = self.modifiers();
            if self.check(TokenKind::Action) {
                actions.push(self.action(
                    member_annotations,
                    member_modifiers,
                    &name.name,
                    member_start,
                )?);
            } else {
                // Connector-level variable declarations
                self.skip_statement()?;
            }
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Connector {
            name,
            params,
            actions,
            annotations,
            is_native: modifiers.is_native,
            span: Span::new(start, self.last_end),
        })
    }

    /// Parse an action inside a connector
    fn action(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Modifiers,
        connector: &str,
        start: u32,
    ) -> ParseResult<Action> {
        self.expect(TokenKind::Action)?;
        let name = self.expect_ident()?;
        let params = self.param_list()?;
        let returns = self.return_list()?;
        self.body_or_semicolon()?;

        Ok(Action {
            name,
            connector: connector.to_string(),
            params,
            returns,
            annotations,
            is_native: modifiers.is_native,
            span: Span::new(start, self.last_end),
        })
    }

    /// Skip a service declaration: `service Name { ... }`
    fn service(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Service)?;
        while !self.check(TokenKind::LBrace) {
            if self.is_eof() {
                return Err(self.unexpected(ExpectedToken::Token(TokenKind::LBrace)));
            }
            self.advance();
        }
        self.skip_block()
    }

    // ==================== Annotations ====================

    /// Parse a run of annotations
    fn annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.check(TokenKind::At) {
            annotations.push(self.annotation()?);
        }
        Ok(annotations)
    }

    /// Parse `@pkg:Name{key: value, ...}`; the attribute block is optional
    fn annotation(&mut self) -> ParseResult<Annotation> {
        let start = self.expect(TokenKind::At)?.span.start;
        let mut name = self.expect_ident()?.name;
        if self.eat(TokenKind::Colon).is_some() {
            name.push(':');
            name.push_str(&self.expect_ident()?.name);
        }

        let mut annotation = Annotation::new(name, Span::default());
        if self.eat(TokenKind::LBrace).is_some() {
            while !self.check(TokenKind::RBrace) && !self.is_eof() {
                let key = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let value = self.annotation_value()?;
                annotation.attributes.push((key.name, value));
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::RBrace)?;
        }
        annotation.span = Span::new(start, self.last_end);
        Ok(annotation)
    }

    /// Parse an annotation attribute value
    fn annotation_value(&mut self) -> ParseResult<String> {
        match self.current_kind() {
            TokenKind::String => Ok(unescape_string(&self.advance().lexeme)),
            TokenKind::Int
            | TokenKind::HexInt
            | TokenKind::Float
            | TokenKind::Ident
            | TokenKind::Template => Ok(self.advance().lexeme),
            _ => Err(self.unexpected(ExpectedToken::Description(
                "annotation value".to_string(),
            ))),
        }
    }

    // ==================== Signatures ====================

    /// Parse `(type name, ...)`
    fn param_list(&mut self) -> ParseResult<Vec<Param>> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) && !self.is_eof() {
            let ty = self.type_name()?;
            let name = self.expect_ident()?;
            params.push(Param::new(name, ty));
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// Parse an optional return list: `(type [name], ...)`
    fn return_list(&mut self) -> ParseResult<Vec<ReturnParam>> {
        if self.eat(TokenKind::LParen).is_none() {
            return Ok(Vec::new());
        }
        let mut returns = Vec::new();
        while !self.check(TokenKind::RParen) && !self.is_eof() {
            let ty = self.type_name()?;
            let name = if self.check(TokenKind::Ident) {
                Some(self.expect_ident()?)
            } else {
                None
            };
            returns.push(ReturnParam { name, ty });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(returns)
    }

    /// Parse a type reference: `[qualifier:]Name` followed by any `[]`
    ///
    /// The qualifier may be dotted (`foo.bar:TestConnector`).
    fn type_name(&mut self) -> ParseResult<TypeName> {
        let token = self.current().clone();
        if token.kind != TokenKind::Ident && !token.kind.is_type_keyword() {
            return Err(ParseError::new(ParseErrorKind::ExpectedType, token.span));
        }
        self.advance();

        let mut ty = TypeName::simple(token.lexeme);
        if self.check(TokenKind::Dot) || self.check(TokenKind::Colon) {
            let mut qualifier = std::mem::take(&mut ty.name);
            while self.eat(TokenKind::Dot).is_some() {
                qualifier.push('.');
                qualifier.push_str(&self.expect_ident()?.name);
            }
            self.expect(TokenKind::Colon)?;
            ty.name = self.expect_ident()?.name;
            ty.package = Some(qualifier);
        }

        while self.eat(TokenKind::LBracket).is_some() {
            self.expect(TokenKind::RBracket)?;
            ty.dimensions += 1;
        }

        ty.span = Span::new(token.span.start, self.last_end);
        Ok(ty)
    }

    // ==================== Skipping ====================

    /// Skip a body, or accept the `;` of a native declaration
    fn body_or_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(());
        }
        if !self.check(TokenKind::LBrace) {
            return Err(self.unexpected(ExpectedToken::OneOf(vec![
                TokenKind::LBrace,
                TokenKind::Semicolon,
            ])));
        }
        self.skip_block()
    }

    /// Skip a balanced `{ ... }` group
    fn skip_block(&mut self) -> ParseResult<()> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Eof => {
                    return Err(
                        ParseError::new(ParseErrorKind::UnterminatedBlock, open.span)
                            .with_hint("add the missing '}'"),
                    )
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip tokens up to and including the next `;` at nesting depth zero
    fn skip_statement(&mut self) -> ParseResult<()> {
        let start = self.current().span;
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 {
                        return Err(self.unexpected(ExpectedToken::Token(TokenKind::Semicolon)));
                    }
                    depth -= 1;
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(ParseErrorKind::UnexpectedEof, start)
                        .with_hint("statement is missing its ';'"))
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ==================== Error Recovery ====================

    /// Synchronize parser state after an error
    fn synchronize(&mut self) {
        // Always make progress past the offending token
        self.advance();
        while !self.is_eof() {
            if self.current_kind() == TokenKind::Semicolon {
                self.advance();
                return;
            }

            match self.current_kind() {
                TokenKind::Import
                | TokenKind::Function
                | TokenKind::Struct
                | TokenKind::Connector
                | TokenKind::Const
                | TokenKind::Service
                | TokenKind::Public
                | TokenKind::Native
                | TokenKind::At => return,
                _ => {}
            }

            self.advance();
        }
    }
}

// ==================== Helper Functions ====================

/// Strip the quotes from a string literal and resolve escapes
fn unescape_string(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
