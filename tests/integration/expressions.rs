// Expression, term and expression-list shapes, checked through `let` statements.

mod common;
use common::*;

use charon::{Label, ParseTree};

/// The right-hand side of `let v = <expr>;`.
fn rhs(expr: &str) -> ParseTree {
    let stmt = first_statement(&format!("let v = {expr};"));
    stmt.children()[3].clone()
}

#[test]
fn integer_constant() {
    let expr = rhs("7");
    assert_eq!(expr.label(), Label::Expression);
    assert_eq!(labels(&expr.children()[0]), ["integerConstant"]);
}

#[test]
fn string_constant() {
    let expr = rhs("\"two words\"");
    assert_eq!(expr.children()[0].children()[0].value(), "two words");
}

#[test]
fn operators_alternate_with_terms() {
    let expr = rhs("1 + 2 * 3 - 4 / 5");
    assert_eq!(
        labels(&expr),
        ["term", "symbol", "term", "symbol", "term", "symbol", "term", "symbol", "term"]
    );
    let operators: Vec<&str> = values(&expr).into_iter().filter(|v| !v.is_empty()).collect();
    assert_eq!(operators, ["+", "*", "-", "/"]);
}

#[test]
fn comparison_and_logic() {
    let expr = rhs("(a < b) | (c > d) & ~e");
    assert_eq!(labels(&expr), ["term", "symbol", "term", "symbol", "term"]);
    assert_eq!(labels(&expr.children()[4]), ["symbol", "term"]);
}

#[test]
fn equality_inside_let() {
    let expr = rhs("a = b");
    assert_eq!(values(&expr)[1], "=");
}

#[test]
fn identifier_forms() {
    assert_eq!(labels(&rhs("x").children()[0]), ["identifier"]);
    assert_eq!(
        labels(&rhs("x[0]").children()[0]),
        ["identifier", "symbol", "expression", "symbol"]
    );
    assert_eq!(
        labels(&rhs("f(1)").children()[0]),
        ["identifier", "symbol", "expressionList", "symbol"]
    );
    assert_eq!(
        labels(&rhs("o.m(1)").children()[0]),
        ["identifier", "symbol", "identifier", "symbol", "expressionList", "symbol"]
    );
}

#[test]
fn nested_calls_and_indexing() {
    let expr = rhs("Math.max(a[f(i)], g(h(1), 2))");
    assert_eq!(expr.find_all(Label::ExpressionList).len(), 4);
    assert_eq!(expr.find_all(Label::Term).iter().filter(|t| t.children().len() == 4).count(), 4);
}

#[test]
fn argument_list_separators() {
    let expr = rhs("f(a, b + 1, \"c\")");
    let list = &expr.find_all(Label::ExpressionList)[0];
    assert_eq!(labels(list), ["expression", "symbol", "expression", "symbol", "expression"]);
}

#[test]
fn deeply_grouped() {
    let expr = rhs("((((x))))");
    assert_eq!(expr.find_all(Label::Term).len(), 5);
    assert_eq!(expr.leaves().len(), 9);
}
