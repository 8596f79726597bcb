pub mod token;
pub use token::{is_keyword, Token, TokenKind};

use logos::Logos;
use tracing::debug;

use crate::diagnostics::CompileError;
use crate::span::Span;
use token::{RawToken, MAX_INTEGER_CONSTANT};

/// Turn source text into the token sequence consumed by the parser.
/// Whitespace and comments are dropped.
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        let slice = lexer.slice();
        let kind = match result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => continue,
            Ok(RawToken::Word) if is_keyword(slice) => TokenKind::Keyword,
            Ok(RawToken::Word) => TokenKind::Identifier,
            Ok(RawToken::Symbol) => TokenKind::Symbol,
            Ok(RawToken::Integer) => {
                if !slice.parse::<u32>().is_ok_and(|n| n <= MAX_INTEGER_CONSTANT) {
                    return Err(CompileError::lex(
                        format!("integer constant '{slice}' exceeds {MAX_INTEGER_CONSTANT}"),
                        span,
                    ));
                }
                TokenKind::IntegerConstant
            }
            Ok(RawToken::Str) => {
                // Quotes are not part of the value.
                let inner = &slice[1..slice.len() - 1];
                tokens.push(Token::with_span(TokenKind::StringConstant, inner, span));
                continue;
            }
            Err(()) if slice.starts_with("/*") => {
                return Err(CompileError::lex("unterminated block comment", span));
            }
            Err(()) if slice.starts_with('"') => {
                return Err(CompileError::lex("unterminated string constant", span));
            }
            Err(()) => {
                return Err(CompileError::lex(format!("unexpected character '{slice}'"), span));
            }
        };
        tokens.push(Token::with_span(kind, slice, span));
    }

    debug!(tokens = tokens.len(), bytes = source.len(), "lexed source");
    Ok(tokens)
}
