use logos::Logos;
use serde::Serialize;

use crate::span::Span;

/// Raw lexemes recognized by the scanner. Words and symbols are classified
/// into a [`TokenKind`] afterwards by [`super::lex`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""[^"\n]*""#)]
    Str,

    #[regex(r"[{}()\[\].,;+\-*/&|<>=~]")]
    Symbol,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,
}

/// Consumes everything up to and including the closing `*/`.
/// An unterminated comment is a lexing error.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// Token categories of the lexer contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical token. The parser only ever reads tokens; it never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Synthetic token with no source location.
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into(), span: Span::dummy() }
    }

    pub fn with_span(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self { kind, value: value.into(), span }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Keyword, value)
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Symbol, value)
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, value)
    }

    pub fn integer(value: impl Into<String>) -> Self {
        Self::new(TokenKind::IntegerConstant, value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(TokenKind::StringConstant, value)
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    /// Kind and value match, spans are not compared.
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::StringConstant => write!(f, "{} \"{}\"", self.kind, self.value),
            _ => write!(f, "{} '{}'", self.kind, self.value),
        }
    }
}

/// Largest value an integer constant may hold.
pub const MAX_INTEGER_CONSTANT: u32 = 32767;

/// Returns true if the given word is a reserved keyword.
pub fn is_keyword(s: &str) -> bool {
    matches!(s, "class" | "constructor" | "function" | "method" | "field" | "static"
        | "var" | "int" | "char" | "bool" | "void" | "true" | "false" | "null"
        | "this" | "let" | "do" | "if" | "else" | "while" | "return")
}
