// Statement productions inside a subroutine body.

mod common;
use common::*;

use charon::Label;

#[test]
fn let_plain() {
    let stmt = first_statement("let x = 1;");
    assert_eq!(stmt.label(), Label::LetStatement);
    assert_eq!(labels(&stmt), ["keyword", "identifier", "symbol", "expression", "symbol"]);
}

#[test]
fn let_indexed_target() {
    let stmt = first_statement("let a[i + 1] = b[i];");
    assert_eq!(
        labels(&stmt),
        [
            "keyword",
            "identifier",
            "symbol",
            "expression",
            "symbol",
            "symbol",
            "expression",
            "symbol"
        ]
    );
    assert_eq!(stmt.children()[2].value(), "[");
    assert_eq!(stmt.children()[4].value(), "]");
}

#[test]
fn if_without_else() {
    let stmt = first_statement("if (a < b) { let m = a; }");
    assert_eq!(stmt.label(), Label::IfStatement);
    assert_eq!(stmt.children().len(), 7);
    assert_eq!(stmt.find_all(Label::LetStatement).len(), 1);
}

#[test]
fn if_else_followed_by_statement() {
    let tree = parse(&in_main("if (a) { } else { let b = 1; } return;"));
    let stmts = main_statements(&tree);
    assert_eq!(labels(stmts), ["ifStatement", "returnStatement"]);
}

#[test]
fn while_loop() {
    let stmt = first_statement("while (i < 10) { let i = i + 1; do tick(); }");
    assert_eq!(stmt.label(), Label::WhileStatement);
    assert_eq!(
        labels(&stmt),
        ["keyword", "symbol", "expression", "symbol", "symbol", "Statements", "symbol"]
    );
    assert_eq!(labels(&stmt.children()[5]), ["letStatement", "doStatement"]);
}

#[test]
fn nested_control_flow() {
    let stmt = first_statement("while (a) { if (b) { while (c) { return; } } }");
    assert_eq!(stmt.find_all(Label::WhileStatement).len(), 2);
    assert_eq!(stmt.find_all(Label::IfStatement).len(), 1);
    assert_eq!(stmt.find_all(Label::ReturnStatement).len(), 1);
}

#[test]
fn do_plain_call() {
    let stmt = first_statement("do draw();");
    assert_eq!(stmt.label(), Label::DoStatement);
    let term = &stmt.children()[1].children()[0];
    assert_eq!(values(term), ["draw", "(", "", ")"]);
}

#[test]
fn do_member_call_with_arguments() {
    let stmt = first_statement("do Screen.drawLine(x, y, x + 1, y);");
    let args = stmt.find_all(Label::ExpressionList);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].find_all(Label::Expression).len(), 4);
}

#[test]
fn return_with_expression() {
    let stmt = first_statement("return a * b;");
    assert_eq!(labels(&stmt), ["keyword", "expression", "symbol"]);
}

#[test]
fn return_negative_value() {
    let stmt = first_statement("return -1;");
    let expr = &stmt.children()[1];
    assert_eq!(labels(&expr.children()[0]), ["symbol", "term"]);
}

#[test]
fn local_declarations_precede_statements() {
    let tree = parse(&in_main("var int a, b; var Array c; let a = 1;"));
    let body = &tree.find_all(Label::SubroutineBody)[0];
    assert_eq!(labels(body), ["symbol", "VarDec", "VarDec", "Statements", "symbol"]);
    assert_eq!(values(&body.children()[2]), ["var", "Array", "c", ";"]);
}

#[test]
fn empty_body() {
    let tree = parse("class Main { function void main() { } }");
    let stmts = main_statements(&tree);
    assert!(stmts.children().is_empty());
}
