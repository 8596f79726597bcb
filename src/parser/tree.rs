use serde::Serialize;

use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Node label: the production that built the node, or the token kind of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Class,
    ClassVarDec,
    Subroutine,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
    Terminal(TokenKind),
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Class => "class",
            Label::ClassVarDec => "ClassVarDec",
            Label::Subroutine => "Subroutine",
            Label::ParameterList => "ParameterList",
            Label::SubroutineBody => "SubroutineBody",
            Label::VarDec => "VarDec",
            Label::Statements => "Statements",
            Label::LetStatement => "letStatement",
            Label::IfStatement => "ifStatement",
            Label::WhileStatement => "whileStatement",
            Label::DoStatement => "doStatement",
            Label::ReturnStatement => "returnStatement",
            Label::Expression => "expression",
            Label::Term => "term",
            Label::ExpressionList => "expressionList",
            Label::Terminal(kind) => kind.as_str(),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Concrete parse tree node.
///
/// Non-terminals carry an empty `value`; terminals carry the token's lexeme and
/// have no children. Children are kept in grammar order, so reading the leaves
/// left to right reproduces the consumed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    label: Label,
    value: String,
    span: Span,
    children: Vec<ParseTree>,
}

/// Terminals always carry `value`, even an empty string constant.
/// Non-terminals carry `children` when they have any.
impl Serialize for ParseTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut node = serializer.serialize_struct("ParseTree", 2)?;
        node.serialize_field("label", &self.label)?;
        if self.is_terminal() {
            node.serialize_field("value", &self.value)?;
        } else if !self.children.is_empty() {
            node.serialize_field("children", &self.children)?;
        }
        node.end()
    }
}

impl ParseTree {
    pub fn new(label: Label) -> Self {
        Self { label, value: String::new(), span: Span::dummy(), children: Vec::new() }
    }

    pub fn terminal(token: &Token) -> Self {
        Self {
            label: Label::Terminal(token.kind),
            value: token.value.clone(),
            span: token.span,
            children: Vec::new(),
        }
    }

    /// Appends in order. The node's span grows to cover the child.
    pub fn add_child(&mut self, child: ParseTree) {
        self.span = self.span.merge(child.span);
        self.children.push(child);
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[ParseTree] {
        &self.children
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.label, Label::Terminal(_))
    }

    /// Terminal nodes in source order, rebuilt as tokens.
    pub fn leaves(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Token>) {
        match self.label {
            Label::Terminal(kind) => {
                out.push(Token::with_span(kind, self.value.clone(), self.span))
            }
            _ => {
                for child in &self.children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseTree::node_count).sum::<usize>()
    }

    /// All nodes with `label`, in pre-order.
    pub fn find_all(&self, label: Label) -> Vec<&ParseTree> {
        let mut found = Vec::new();
        self.collect_label(label, &mut found);
        found
    }

    fn collect_label<'t>(&'t self, label: Label, found: &mut Vec<&'t ParseTree>) {
        if self.label == label {
            found.push(self);
        }
        for child in &self.children {
            child.collect_label(label, found);
        }
    }

    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{:indent$}{}", "", self.label, indent = depth * 2)?;
        if self.is_terminal() {
            write!(f, " {:?}", self.value)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented outline, one node per line.
impl std::fmt::Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}
