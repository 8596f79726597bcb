// End-to-end parses of whole classes: the documented scenarios, empty
// collections, and the shape of a realistic program.

mod common;
use common::*;

use charon::{Expected, Label, ParseError, Token, TokenKind};
use insta::assert_snapshot;

#[test]
fn empty_class_has_four_terminals() {
    let tree = parse("class Main { }");
    assert_eq!(tree.label(), Label::Class);
    assert_eq!(labels(&tree), ["keyword", "identifier", "symbol", "symbol"]);
    assert_eq!(values(&tree), ["class", "Main", "{", "}"]);
}

#[test]
fn empty_class_from_synthetic_tokens() {
    let tokens = vec![
        Token::keyword("class"),
        Token::identifier("Main"),
        Token::symbol("{"),
        Token::symbol("}"),
    ];
    let tree = charon::parse_tokens(&tokens).unwrap();
    assert_eq!(tree.children().len(), 4);
    assert!(tree.children().iter().all(|c| c.is_terminal()));
}

#[test]
fn static_declaration_list() {
    let tree = parse("class Main { static int x, y; }");
    let dec = &tree.children()[3];
    assert_eq!(dec.label(), Label::ClassVarDec);
    assert_eq!(values(dec), ["static", "int", "x", ",", "y", ";"]);
    assert_eq!(labels(dec), ["keyword", "keyword", "identifier", "symbol", "identifier", "symbol"]);
}

#[test]
fn if_else_with_empty_branches() {
    let stmt = first_statement("if (x) { } else { }");
    assert_eq!(stmt.label(), Label::IfStatement);
    let blocks = stmt.find_all(Label::Statements);
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| b.children().is_empty()));
}

#[test]
fn bare_return() {
    let stmt = first_statement("return;");
    assert_eq!(stmt.label(), Label::ReturnStatement);
    assert_eq!(values(&stmt), ["return", ";"]);
    assert!(stmt.find_all(Label::Expression).is_empty());
}

#[test]
fn missing_class_close_brace_fails() {
    let source = "class Main { function void main() { return; }";
    let err = parse_err(source);
    let token_count = tokens(source).len();
    assert_eq!(
        err,
        ParseError::end_of_input(Expected::Exact(TokenKind::Symbol, "}"), token_count)
    );
}

#[test]
fn empty_parameter_and_argument_lists() {
    let tree = parse(&in_main("do run();"));
    let params = tree.find_all(Label::ParameterList);
    assert_eq!(params.len(), 1);
    assert!(params[0].children().is_empty());
    let args = tree.find_all(Label::ExpressionList);
    assert_eq!(args.len(), 1);
    assert!(args[0].children().is_empty());
}

#[test]
fn square_class_structure() {
    let tree = parse(SQUARE);
    assert_eq!(tree.children()[1].value(), "Square");
    assert_eq!(tree.find_all(Label::ClassVarDec).len(), 3);
    assert_eq!(tree.find_all(Label::Subroutine).len(), 5);
    assert_eq!(tree.find_all(Label::VarDec).len(), 2);
    assert_eq!(tree.find_all(Label::WhileStatement).len(), 1);
    assert_eq!(tree.find_all(Label::IfStatement).len(), 2);
    assert_eq!(tree.find_all(Label::DoStatement).len(), 7);
    assert_eq!(tree.find_all(Label::ReturnStatement).len(), 5);
}

#[test]
fn square_leaves_match_tokens() {
    let toks = tokens(SQUARE);
    let tree = charon::parse_tokens(&toks).unwrap();
    assert_eq!(tree.leaves(), toks);
}

#[test]
fn parse_twice_gives_identical_trees() {
    let toks = tokens(SQUARE);
    let first = charon::parse_tokens(&toks).unwrap();
    let second = charon::parse_tokens(&toks).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn independent_parses_on_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("class C{i} {{ field int f{i}; }}");
                parse(&source).node_count()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
}

#[test]
fn tree_outline_snapshot() {
    let tree = parse("class Point { field int x; method int getX() { return x; } }");
    assert_snapshot!(tree.to_string(), @r#"
    class
      keyword "class"
      identifier "Point"
      symbol "{"
      ClassVarDec
        keyword "field"
        keyword "int"
        identifier "x"
        symbol ";"
      Subroutine
        keyword "method"
        keyword "int"
        identifier "getX"
        symbol "("
        ParameterList
        symbol ")"
        SubroutineBody
          symbol "{"
          Statements
            returnStatement
              keyword "return"
              expression
                term
                  identifier "x"
              symbol ";"
          symbol "}"
      symbol "}"
    "#);
}
