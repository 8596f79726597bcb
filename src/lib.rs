pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use diagnostics::{CompileError, Expected, ParseError};
pub use lexer::{lex, Token, TokenKind};
pub use parser::tree::{Label, ParseTree};
pub use parser::{parse_tokens, Parser};

use std::path::Path;

/// Lex and parse a source string (lex → parse).
pub fn parse_source(source: &str) -> Result<ParseTree, CompileError> {
    let tokens = lexer::lex(source)?;
    Ok(parser::parse_tokens(&tokens)?)
}

pub fn read_source(path: &Path) -> Result<String, CompileError> {
    std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))
}

/// Parse the class in a source file.
pub fn parse_file(path: &Path) -> Result<ParseTree, CompileError> {
    let source = read_source(path)?;
    parse_source(&source)
}
