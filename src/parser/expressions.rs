use crate::diagnostics::{Expected, ParseError};
use crate::lexer::token::{Token, TokenKind};

use super::tree::{Label, ParseTree};
use super::Parser;

pub const BINARY_OPERATORS: &[&str] = &["+", "-", "*", "/", "&", "|", "<", ">", "="];
pub const UNARY_OPERATORS: &[&str] = &["-", "~"];

pub fn is_binary_op(tok: &Token) -> bool {
    tok.kind == TokenKind::Symbol && BINARY_OPERATORS.contains(&tok.value.as_str())
}

pub fn is_unary_op(tok: &Token) -> bool {
    tok.kind == TokenKind::Symbol && UNARY_OPERATORS.contains(&tok.value.as_str())
}

/// Which `term` alternative a token begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermStart {
    IntegerConstant,
    StringConstant,
    /// One of the identifier forms; see [`IdentifierForm`].
    Identifier,
    /// `"(" expression ")"`
    Group,
    /// `unaryOp term`
    Unary,
}

impl TermStart {
    pub fn classify(tok: &Token) -> Option<Self> {
        match tok.kind {
            TokenKind::IntegerConstant => Some(TermStart::IntegerConstant),
            TokenKind::StringConstant => Some(TermStart::StringConstant),
            TokenKind::Identifier => Some(TermStart::Identifier),
            TokenKind::Symbol if tok.value == "(" => Some(TermStart::Group),
            TokenKind::Symbol if is_unary_op(tok) => Some(TermStart::Unary),
            _ => None,
        }
    }
}

/// Shape of a term that starts with an identifier, decided by the one token
/// that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierForm {
    /// `name`
    Plain,
    /// `name "[" expression "]"`
    Indexed,
    /// `name "(" expressionList ")"`
    Call,
    /// `name "." name "(" expressionList ")"`
    MemberCall,
}

impl IdentifierForm {
    pub fn classify(next: Option<&Token>) -> Self {
        match next {
            Some(tok) if tok.kind == TokenKind::Symbol => match tok.value.as_str() {
                "[" => IdentifierForm::Indexed,
                "(" => IdentifierForm::Call,
                "." => IdentifierForm::MemberCall,
                _ => IdentifierForm::Plain,
            },
            _ => IdentifierForm::Plain,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, IdentifierForm::Call | IdentifierForm::MemberCall)
    }
}

const CALL_CONTINUATIONS: &[&str] = &["(", "."];

impl<'a> Parser<'a> {
    /// True if the current token can begin a term, and so an expression.
    pub fn can_start_term(&self) -> bool {
        self.cursor.peek().and_then(TermStart::classify).is_some()
    }

    /// `expression := term (binaryOp term)*`
    pub fn parse_expression(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::Expression);
        let mut node = ParseTree::new(Label::Expression);
        node.add_child(self.parse_term()?);
        while let Some(op) = self.cursor.peek().filter(|tok| is_binary_op(tok)) {
            self.take(&mut node, op);
            node.add_child(self.parse_term()?);
        }
        Ok(node)
    }

    /// ```text
    /// term := integerConstant | stringConstant | identifier
    ///       | identifier "[" expression "]"
    ///       | identifier "(" expressionList ")"
    ///       | identifier "." identifier "(" expressionList ")"
    ///       | "(" expression ")" | unaryOp term
    /// ```
    pub fn parse_term(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::Term);
        let mut node = ParseTree::new(Label::Term);
        let (start, tok) = self.term_start()?;
        match start {
            TermStart::IntegerConstant | TermStart::StringConstant => self.take(&mut node, tok),
            TermStart::Group => {
                self.take(&mut node, tok);
                node.add_child(self.parse_expression()?);
                self.consume(&mut node, TokenKind::Symbol, ")")?;
            }
            TermStart::Unary => {
                self.take(&mut node, tok);
                node.add_child(self.parse_term()?);
            }
            TermStart::Identifier => {
                let form = IdentifierForm::classify(self.cursor.peek_nth(1));
                self.take(&mut node, tok);
                self.parse_identifier_tail(&mut node, form)?;
            }
        }
        Ok(node)
    }

    fn term_start(&self) -> Result<(TermStart, &'a Token), ParseError> {
        let tok = self.cursor.must_match(Expected::Term, |t| TermStart::classify(t).is_some())?;
        match TermStart::classify(tok) {
            Some(start) => Ok((start, tok)),
            None => Err(ParseError::unexpected(Expected::Term, tok, self.cursor.position())),
        }
    }

    /// Everything after the leading identifier of a term.
    fn parse_identifier_tail(
        &mut self,
        node: &mut ParseTree,
        form: IdentifierForm,
    ) -> Result<(), ParseError> {
        match form {
            IdentifierForm::Plain => {}
            IdentifierForm::Indexed => {
                self.consume(node, TokenKind::Symbol, "[")?;
                node.add_child(self.parse_expression()?);
                self.consume(node, TokenKind::Symbol, "]")?;
            }
            IdentifierForm::Call => self.parse_arguments(node)?,
            IdentifierForm::MemberCall => {
                self.consume(node, TokenKind::Symbol, ".")?;
                self.consume_kind(node, TokenKind::Identifier)?;
                self.parse_arguments(node)?;
            }
        }
        Ok(())
    }

    /// `"(" expressionList ")"`
    fn parse_arguments(&mut self, node: &mut ParseTree) -> Result<(), ParseError> {
        self.consume(node, TokenKind::Symbol, "(")?;
        node.add_child(self.parse_expression_list()?);
        self.consume(node, TokenKind::Symbol, ")")
    }

    /// `expressionList := (expression ("," expression)*)?`
    pub fn parse_expression_list(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::ExpressionList);
        let mut node = ParseTree::new(Label::ExpressionList);
        if !self.can_start_term() {
            return Ok(node);
        }
        node.add_child(self.parse_expression()?);
        while self.have_symbol(",") {
            self.consume(&mut node, TokenKind::Symbol, ",")?;
            node.add_child(self.parse_expression()?);
        }
        Ok(node)
    }

    /// An `expression` whose only term is a subroutine call, as `do` requires.
    pub fn parse_call_expression(&mut self) -> Result<ParseTree, ParseError> {
        let name = self
            .cursor
            .must_match(Expected::SubroutineCall, |t| t.kind == TokenKind::Identifier)?;
        let next_position = self.cursor.position() + 1;
        match self.cursor.peek_nth(1) {
            Some(next) if IdentifierForm::classify(Some(next)).is_call() => {}
            Some(next) => {
                return Err(ParseError::unexpected(
                    Expected::OneOf(TokenKind::Symbol, CALL_CONTINUATIONS),
                    next,
                    next_position,
                ));
            }
            None => {
                return Err(ParseError::end_of_input(
                    Expected::OneOf(TokenKind::Symbol, CALL_CONTINUATIONS),
                    next_position,
                ));
            }
        }

        self.enter(Label::Expression);
        let mut expr = ParseTree::new(Label::Expression);
        let mut term = ParseTree::new(Label::Term);
        let form = IdentifierForm::classify(self.cursor.peek_nth(1));
        self.take(&mut term, name);
        self.parse_identifier_tail(&mut term, form)?;
        expr.add_child(term);
        Ok(expr)
    }
}
