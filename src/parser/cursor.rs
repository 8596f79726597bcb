use tracing::trace;

use crate::diagnostics::{Expected, ParseError};
use crate::lexer::token::{Token, TokenKind};

/// Read-only position over a token sequence.
///
/// `position` only moves forward, one token per [`advance`](Self::advance).
/// Matching (`have`, `must_be`) never moves it; callers advance explicitly
/// once they have attached the token they matched.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Token `n` places after the current one (`peek_nth(0) == peek()`).
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    pub fn current(&self) -> Result<&'a Token, ParseError> {
        self.peek().ok_or_else(|| ParseError::end_of_input(Expected::AnyToken, self.pos))
    }

    /// Moves past the current token. At the end of input this is a no-op,
    /// so `position` never exceeds the sequence length.
    pub fn advance(&mut self) {
        if let Some(tok) = self.peek() {
            trace!(position = self.pos, token = %tok, "consume");
            self.pos += 1;
        }
    }

    pub fn have(&self, kind: TokenKind, value: &str) -> bool {
        self.peek().is_some_and(|tok| tok.is(kind, value))
    }

    pub fn have_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|tok| tok.kind == kind)
    }

    /// Current token if it is exactly `(kind, value)`. Does not advance.
    pub fn must_be(&self, kind: TokenKind, value: &'static str) -> Result<&'a Token, ParseError> {
        self.must_match(Expected::Exact(kind, value), |tok| tok.is(kind, value))
    }

    /// Current token if it has `kind`. Does not advance.
    pub fn must_be_kind(&self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        self.must_match(Expected::Kind(kind), |tok| tok.kind == kind)
    }

    /// Current token if it satisfies `accept`; otherwise fail reporting `expected`.
    pub fn must_match(
        &self,
        expected: Expected,
        accept: impl FnOnce(&Token) -> bool,
    ) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(tok) if accept(tok) => Ok(tok),
            Some(tok) => Err(ParseError::unexpected(expected, tok, self.pos)),
            None => Err(ParseError::end_of_input(expected, self.pos)),
        }
    }

    /// Fails on the first leftover token.
    pub fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(ParseError::unexpected(Expected::EndOfInput, tok, self.pos)),
        }
    }
}
