//! Token types for the Ballerina lexer

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("as")]
    As,
    #[token("public")]
    Public,
    #[token("native")]
    Native,
    #[token("function")]
    Function,
    #[token("connector")]
    Connector,
    #[token("action")]
    Action,
    #[token("struct")]
    Struct,
    #[token("const")]
    Const,
    #[token("service")]
    Service,

    // ========== Literals ==========
    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    HexInt,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    /// Double-quoted string literal, escapes left in place
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    /// Backtick template (json/xml literal)
    #[regex(r"`[^`]*`")]
    Template,

    // ========== Identifiers ==========
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // ========== Punctuation ==========
    #[token("@")]
    At,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,

    /// Any operator that only ever appears inside bodies and initializers
    #[regex(r"[+\-*/%!&|?^~]")]
    Operator,

    // ========== Trivia ==========
    #[regex(r"//[^\n]*")]
    LineComment,

    // ========== Special ==========
    /// End of file
    Eof,

    /// Lexer error - invalid character
    Error,
}

impl TokenKind {
    /// Returns true for tokens the parser never looks at
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::LineComment)
    }

    /// Returns true for keywords that may also be used as plain names
    ///
    /// Primitive type names such as `struct` and `connector` double as
    /// keywords, so type positions accept them.
    #[must_use]
    pub const fn is_type_keyword(&self) -> bool {
        matches!(self, Self::Struct | Self::Connector)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Import => write!(f, "import"),
            Self::As => write!(f, "as"),
            Self::Public => write!(f, "public"),
            Self::Native => write!(f, "native"),
            Self::Function => write!(f, "function"),
            Self::Connector => write!(f, "connector"),
            Self::Action => write!(f, "action"),
            Self::Struct => write!(f, "struct"),
            Self::Const => write!(f, "const"),
            Self::Service => write!(f, "service"),
            Self::Int => write!(f, "integer"),
            Self::HexInt => write!(f, "hex integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string literal"),
            Self::Template => write!(f, "template"),
            Self::Ident => write!(f, "identifier"),
            Self::At => write!(f, "@"),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Eq => write!(f, "="),
            Self::Operator => write!(f, "operator"),
            Self::LineComment => write!(f, "// comment"),
            Self::Eof => write!(f, "end of file"),
            Self::Error => write!(f, "error"),
        }
    }
}
