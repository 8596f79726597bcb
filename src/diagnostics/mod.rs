use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use thiserror::Error;

/// What the active production required at the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A token with this exact kind and value.
    Exact(TokenKind, &'static str),
    /// A token of this kind carrying one of these values.
    OneOf(TokenKind, &'static [&'static str]),
    /// Any token of this kind.
    Kind(TokenKind),
    /// `identifier | int | char | bool`
    Type,
    /// A type or `void`.
    ReturnType,
    /// Something that can begin a term.
    Term,
    /// `name(...)` or `target.name(...)`
    SubroutineCall,
    /// The token stream should be exhausted.
    EndOfInput,
    /// Raw cursor access with no production context.
    AnyToken,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Exact(kind, value) => write!(f, "{kind} '{value}'"),
            Expected::OneOf(kind, values) => {
                write!(f, "{kind} ")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        let sep = if i + 1 == values.len() { " or " } else { ", " };
                        f.write_str(sep)?;
                    }
                    write!(f, "'{value}'")?;
                }
                Ok(())
            }
            Expected::Kind(kind) => write!(f, "{kind}"),
            Expected::Type => write!(f, "a type"),
            Expected::ReturnType => write!(f, "a return type"),
            Expected::Term => write!(f, "a term"),
            Expected::SubroutineCall => write!(f, "a subroutine call"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::AnyToken => write!(f, "a token"),
        }
    }
}

/// Grammar mismatch. `position` is the index of the offending token in the
/// input sequence (or the sequence length when input ran out).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} (token {position})")]
    UnexpectedToken { expected: Expected, found: Token, position: usize },

    #[error("expected {expected}, found end of input (token {position})")]
    UnexpectedEndOfInput { expected: Expected, position: usize },
}

impl ParseError {
    pub fn unexpected(expected: Expected, found: &Token, position: usize) -> Self {
        Self::UnexpectedToken { expected, found: found.clone(), position }
    }

    pub fn end_of_input(expected: Expected, position: usize) -> Self {
        Self::UnexpectedEndOfInput { expected, position }
    }

    pub fn expected(&self) -> Expected {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEndOfInput { expected, .. } => *expected,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEndOfInput { position, .. } => *position,
        }
    }

    /// The token the parser stopped on, if input had not run out.
    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(found),
            ParseError::UnexpectedEndOfInput { .. } => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.found().map(|tok| tok.span)
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lex error: {msg}")]
    Lex { msg: String, span: Span },

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

impl CompileError {
    pub fn lex(msg: impl Into<String>, span: Span) -> Self {
        Self::Lex { msg: msg.into(), span }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Write a CompileError as an ariadne report over `source`.
pub fn write_error<W: Write>(
    source: &str,
    err: &CompileError,
    color: bool,
    mut out: W,
) -> std::io::Result<()> {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let (kind_str, msg, range) = match err {
        CompileError::Lex { msg, span } => ("lex", msg.clone(), span.range()),
        CompileError::Parse(parse_err) => {
            // Running out of input points just past the last character.
            let range = match parse_err.span() {
                Some(span) if !span.is_dummy() => span.range(),
                _ => source.len()..source.len(),
            };
            ("syntax", parse_err.to_string(), range)
        }
        CompileError::Io { .. } => {
            return writeln!(out, "error: {err}");
        }
    };

    Report::build(ReportKind::Error, (), range.start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("{kind_str} error"))
        .with_label(Label::new(range).with_message(msg))
        .finish()
        .write(Source::from(source), out)
}

/// Render a CompileError to stderr, colored only when stderr is a terminal.
pub fn render_error(source: &str, err: &CompileError) {
    let color = std::io::stderr().is_terminal();
    if write_error(source, err, color, std::io::stderr()).is_err() {
        eprintln!("error: {err}");
    }
}
