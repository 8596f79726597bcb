pub mod cursor;
pub mod expressions;
pub mod tree;

use tracing::{debug, trace};

use crate::diagnostics::{Expected, ParseError};
use crate::lexer::token::{Token, TokenKind};
use cursor::TokenCursor;
use tree::{Label, ParseTree};

const CLASS_VAR_KINDS: &[&str] = &["static", "field"];
const SUBROUTINE_KINDS: &[&str] = &["constructor", "function", "method"];
const STATEMENT_KEYWORDS: &[&str] = &["let", "if", "while", "do", "return"];

/// Parse a complete token sequence into a tree rooted at `class`.
pub fn parse_tokens(tokens: &[Token]) -> Result<ParseTree, ParseError> {
    Parser::new(tokens).parse_program()
}

/// `identifier | int | char | bool`
pub fn is_type(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Identifier => true,
        TokenKind::Keyword => matches!(tok.value.as_str(), "int" | "char" | "bool"),
        _ => false,
    }
}

pub fn is_return_type(tok: &Token) -> bool {
    is_type(tok) || tok.is(TokenKind::Keyword, "void")
}

/// The statement a keyword introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Let,
    If,
    While,
    Do,
    Return,
}

impl StatementKind {
    pub fn classify(tok: &Token) -> Option<Self> {
        if tok.kind != TokenKind::Keyword {
            return None;
        }
        match tok.value.as_str() {
            "let" => Some(StatementKind::Let),
            "if" => Some(StatementKind::If),
            "while" => Some(StatementKind::While),
            "do" => Some(StatementKind::Do),
            "return" => Some(StatementKind::Return),
            _ => None,
        }
    }
}

/// Recursive-descent parser, one method per grammar production.
///
/// Every production consumes exactly the tokens it attaches to its node and
/// returns the finished node; a mismatch aborts the whole parse with the
/// first [`ParseError`].
pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { cursor: TokenCursor::new(tokens) }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn enter(&self, label: Label) {
        trace!(production = %label, position = self.cursor.position(), "enter");
    }

    /// Attach `tok` as a terminal and move past it.
    fn take(&mut self, node: &mut ParseTree, tok: &Token) {
        node.add_child(ParseTree::terminal(tok));
        self.cursor.advance();
    }

    fn consume(
        &mut self,
        node: &mut ParseTree,
        kind: TokenKind,
        value: &'static str,
    ) -> Result<(), ParseError> {
        let tok = self.cursor.must_be(kind, value)?;
        self.take(node, tok);
        Ok(())
    }

    fn consume_kind(&mut self, node: &mut ParseTree, kind: TokenKind) -> Result<(), ParseError> {
        let tok = self.cursor.must_be_kind(kind)?;
        self.take(node, tok);
        Ok(())
    }

    fn consume_one_of(
        &mut self,
        node: &mut ParseTree,
        kind: TokenKind,
        values: &'static [&'static str],
    ) -> Result<(), ParseError> {
        let tok = self.cursor.must_match(Expected::OneOf(kind, values), |t| {
            t.kind == kind && values.contains(&t.value.as_str())
        })?;
        self.take(node, tok);
        Ok(())
    }

    fn consume_type(&mut self, node: &mut ParseTree) -> Result<(), ParseError> {
        let tok = self.cursor.must_match(Expected::Type, is_type)?;
        self.take(node, tok);
        Ok(())
    }

    fn have_symbol(&self, value: &str) -> bool {
        self.cursor.have(TokenKind::Symbol, value)
    }

    fn have_keyword(&self, value: &str) -> bool {
        self.cursor.have(TokenKind::Keyword, value)
    }

    /// `program := class` with nothing after the closing brace.
    pub fn parse_program(&mut self) -> Result<ParseTree, ParseError> {
        debug!(tokens = self.cursor.len(), "parse started");
        let class = self.parse_class()?;
        self.cursor.expect_end()?;
        debug!(nodes = class.node_count(), "parse finished");
        Ok(class)
    }

    /// `class := "class" identifier "{" classVarDec* subroutineDec* "}"`
    pub fn parse_class(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::Class);
        let mut node = ParseTree::new(Label::Class);
        self.consume(&mut node, TokenKind::Keyword, "class")?;
        self.consume_kind(&mut node, TokenKind::Identifier)?;
        self.consume(&mut node, TokenKind::Symbol, "{")?;

        while self.have_keyword("static") || self.have_keyword("field") {
            node.add_child(self.parse_class_var_dec()?);
        }
        while self.have_keyword("constructor")
            || self.have_keyword("function")
            || self.have_keyword("method")
        {
            node.add_child(self.parse_subroutine()?);
        }

        self.consume(&mut node, TokenKind::Symbol, "}")?;
        Ok(node)
    }

    /// `classVarDec := ("static"|"field") type identifier ("," identifier)* ";"`
    pub fn parse_class_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::ClassVarDec);
        let mut node = ParseTree::new(Label::ClassVarDec);
        self.consume_one_of(&mut node, TokenKind::Keyword, CLASS_VAR_KINDS)?;
        self.parse_declared_names(&mut node)?;
        Ok(node)
    }

    /// `subroutineDec := ("constructor"|"function"|"method") (type|"void") identifier
    ///                   "(" parameterList ")" subroutineBody`
    pub fn parse_subroutine(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::Subroutine);
        let mut node = ParseTree::new(Label::Subroutine);
        self.consume_one_of(&mut node, TokenKind::Keyword, SUBROUTINE_KINDS)?;

        let return_type = self.cursor.must_match(Expected::ReturnType, is_return_type)?;
        self.take(&mut node, return_type);

        self.consume_kind(&mut node, TokenKind::Identifier)?;
        self.consume(&mut node, TokenKind::Symbol, "(")?;
        node.add_child(self.parse_parameter_list()?);
        self.consume(&mut node, TokenKind::Symbol, ")")?;
        node.add_child(self.parse_subroutine_body()?);
        Ok(node)
    }

    /// `parameterList := (type identifier ("," type identifier)*)?`
    pub fn parse_parameter_list(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::ParameterList);
        let mut node = ParseTree::new(Label::ParameterList);
        if !self.cursor.peek().is_some_and(is_type) {
            return Ok(node);
        }

        self.consume_type(&mut node)?;
        self.consume_kind(&mut node, TokenKind::Identifier)?;
        while self.have_symbol(",") {
            self.consume(&mut node, TokenKind::Symbol, ",")?;
            self.consume_type(&mut node)?;
            self.consume_kind(&mut node, TokenKind::Identifier)?;
        }
        Ok(node)
    }

    /// `subroutineBody := "{" varDec* statements "}"`
    pub fn parse_subroutine_body(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::SubroutineBody);
        let mut node = ParseTree::new(Label::SubroutineBody);
        self.consume(&mut node, TokenKind::Symbol, "{")?;
        while self.have_keyword("var") {
            node.add_child(self.parse_var_dec()?);
        }
        node.add_child(self.parse_statements()?);
        self.consume(&mut node, TokenKind::Symbol, "}")?;
        Ok(node)
    }

    /// `varDec := "var" type identifier ("," identifier)* ";"`
    pub fn parse_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::VarDec);
        let mut node = ParseTree::new(Label::VarDec);
        self.consume(&mut node, TokenKind::Keyword, "var")?;
        self.parse_declared_names(&mut node)?;
        Ok(node)
    }

    /// Shared tail of `classVarDec` and `varDec`: `type identifier ("," identifier)* ";"`
    fn parse_declared_names(&mut self, node: &mut ParseTree) -> Result<(), ParseError> {
        self.consume_type(node)?;
        self.consume_kind(node, TokenKind::Identifier)?;
        while self.have_symbol(",") {
            self.consume(node, TokenKind::Symbol, ",")?;
            self.consume_kind(node, TokenKind::Identifier)?;
        }
        self.consume(node, TokenKind::Symbol, ";")
    }

    /// `statements := statement*`
    pub fn parse_statements(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::Statements);
        let mut node = ParseTree::new(Label::Statements);
        while self.cursor.peek().and_then(StatementKind::classify).is_some() {
            node.add_child(self.parse_statement()?);
        }
        Ok(node)
    }

    /// `statement := letStatement | ifStatement | whileStatement | doStatement | returnStatement`
    pub fn parse_statement(&mut self) -> Result<ParseTree, ParseError> {
        let tok = self
            .cursor
            .must_match(Expected::OneOf(TokenKind::Keyword, STATEMENT_KEYWORDS), |t| {
                StatementKind::classify(t).is_some()
            })?;
        match StatementKind::classify(tok) {
            Some(StatementKind::Let) => self.parse_let(),
            Some(StatementKind::If) => self.parse_if(),
            Some(StatementKind::While) => self.parse_while(),
            Some(StatementKind::Do) => self.parse_do(),
            Some(StatementKind::Return) => self.parse_return(),
            None => Err(ParseError::unexpected(
                Expected::OneOf(TokenKind::Keyword, STATEMENT_KEYWORDS),
                tok,
                self.cursor.position(),
            )),
        }
    }

    /// `letStatement := "let" identifier ("[" expression "]")? "=" expression ";"`
    pub fn parse_let(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::LetStatement);
        let mut node = ParseTree::new(Label::LetStatement);
        self.consume(&mut node, TokenKind::Keyword, "let")?;
        self.consume_kind(&mut node, TokenKind::Identifier)?;
        if self.have_symbol("[") {
            self.consume(&mut node, TokenKind::Symbol, "[")?;
            node.add_child(self.parse_expression()?);
            self.consume(&mut node, TokenKind::Symbol, "]")?;
        }
        self.consume(&mut node, TokenKind::Symbol, "=")?;
        node.add_child(self.parse_expression()?);
        self.consume(&mut node, TokenKind::Symbol, ";")?;
        Ok(node)
    }

    /// `ifStatement := "if" "(" expression ")" "{" statements "}" ("else" "{" statements "}")?`
    pub fn parse_if(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::IfStatement);
        let mut node = ParseTree::new(Label::IfStatement);
        self.consume(&mut node, TokenKind::Keyword, "if")?;
        self.parse_condition_and_block(&mut node)?;
        if self.have_keyword("else") {
            self.consume(&mut node, TokenKind::Keyword, "else")?;
            self.parse_block(&mut node)?;
        }
        Ok(node)
    }

    /// `whileStatement := "while" "(" expression ")" "{" statements "}"`
    pub fn parse_while(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::WhileStatement);
        let mut node = ParseTree::new(Label::WhileStatement);
        self.consume(&mut node, TokenKind::Keyword, "while")?;
        self.parse_condition_and_block(&mut node)?;
        Ok(node)
    }

    /// `"(" expression ")" "{" statements "}"`
    fn parse_condition_and_block(&mut self, node: &mut ParseTree) -> Result<(), ParseError> {
        self.consume(node, TokenKind::Symbol, "(")?;
        node.add_child(self.parse_expression()?);
        self.consume(node, TokenKind::Symbol, ")")?;
        self.parse_block(node)
    }

    /// `"{" statements "}"`
    fn parse_block(&mut self, node: &mut ParseTree) -> Result<(), ParseError> {
        self.consume(node, TokenKind::Symbol, "{")?;
        node.add_child(self.parse_statements()?);
        self.consume(node, TokenKind::Symbol, "}")
    }

    /// `doStatement := "do" expression ";"` where the expression is a single
    /// subroutine call.
    pub fn parse_do(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::DoStatement);
        let mut node = ParseTree::new(Label::DoStatement);
        self.consume(&mut node, TokenKind::Keyword, "do")?;
        node.add_child(self.parse_call_expression()?);
        self.consume(&mut node, TokenKind::Symbol, ";")?;
        Ok(node)
    }

    /// `returnStatement := "return" expression? ";"`
    pub fn parse_return(&mut self) -> Result<ParseTree, ParseError> {
        self.enter(Label::ReturnStatement);
        let mut node = ParseTree::new(Label::ReturnStatement);
        self.consume(&mut node, TokenKind::Keyword, "return")?;
        if self.can_start_term() {
            node.add_child(self.parse_expression()?);
        }
        self.consume(&mut node, TokenKind::Symbol, ";")?;
        Ok(node)
    }
}
