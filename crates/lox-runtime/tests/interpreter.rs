//! End-to-end interpreter tests
//!
//! Whole programs through scan, parse and interpret.

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use lox_runtime::ast::{Expr, GetExpr, LiteralValue, SetExpr, Stmt, SuperExpr};
use lox_runtime::{
    error_codes, Interpreter, InterpreterOptions, Lox, RuntimeError, Token, TokenKind,
    UninitializedPolicy,
};
use rstest::rstest;

#[test]
fn test_variable_declaration_and_assignment() {
    assert_prints(
        "var a = 1;\nprint a;\na = \"changed\";\nprint a;",
        &["1", "changed"],
    );
}

#[test]
fn test_arithmetic_precedence() {
    assert_prints("print 1 + 2 * 3 - 4 / 2;", &["5"]);
}

#[test]
fn test_three_scope_shadowing() {
    let source = r#"
var a = "global a";
var b = "global b";
var c = "global c";
{
  var a = "outer a";
  var b = "outer b";
  {
    var a = "inner a";
    print a;
    print b;
    print c;
  }
  print a;
  print b;
  print c;
}
print a;
print b;
print c;
"#;
    assert_prints(
        source,
        &[
            "inner a", "outer b", "global c", "outer a", "outer b", "global c", "global a",
            "global b", "global c",
        ],
    );
}

#[test]
fn test_logical_operators() {
    assert_prints(
        "print 1 and 2;\nprint nil and 2;\nprint 1 or 2;\nprint nil or 2;",
        &["2", "nil", "1", "2"],
    );
}

#[test]
fn test_while_loop() {
    assert_prints(
        "var i = 0;\nwhile (i < 3) {\n  print i;\n  i = i + 1;\n}",
        &["0", "1", "2"],
    );
}

#[test]
fn test_for_loop() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", &["0", "1", "2"]);
}

#[test]
fn test_for_loop_with_outer_counter() {
    assert_prints(
        "var i = 10;\nfor (i = 0; i < 2; i = i + 1) print i;\nprint i;",
        &["0", "1", "2"],
    );
}

#[test]
fn test_fibonacci() {
    let source = r#"
var a = 0;
var temp;
for (var b = 1; a < 50; b = temp + b) {
  print a;
  temp = a;
  a = b;
}
"#;
    // `temp` starts unbound, so the first assignment to it fails
    let diag = assert_runtime_error(source, error_codes::UNDEFINED_VARIABLE, &["0"]);
    assert_eq!(diag.message, "Undefined variable 'temp'.");

    let mut lox = Lox::with_options(InterpreterOptions {
        uninitialized: UninitializedPolicy::Nil,
    });
    assert_eq!(
        lox.eval(source).unwrap(),
        vec!["0", "1", "1", "2", "3", "5", "8", "13", "21", "34"]
    );
}

#[test]
fn test_else_branch_only_when_falsy() {
    assert_prints(
        "if (1 < 2) print \"yes\"; else print \"no\";\nif (nil) print \"yes\"; else print \"no\";",
        &["yes", "no"],
    );
}

#[test]
fn test_nested_if_else() {
    assert_prints(
        "if (true) if (false) print 1; else print 2;",
        &["2"],
    );
}

#[test]
fn test_string_concatenation_and_equality() {
    assert_prints(
        "var s = \"lo\" + \"x\";\nprint s;\nprint s == \"lox\";\nprint 1 == \"1\";",
        &["lox", "true", "false"],
    );
}

#[test]
fn test_multiline_string_prints_raw() {
    assert_prints("print \"one\ntwo\";", &["one\ntwo"]);
}

#[rstest]
#[case::read("print x;", "Undefined variable 'x'.")]
#[case::assign("x = 1;", "Undefined variable 'x'.")]
#[case::assign_in_block("{ y = 1; }", "Undefined variable 'y'.")]
fn test_undefined_variable(#[case] source: &str, #[case] message: &str) {
    let diag = assert_runtime_error(source, error_codes::UNDEFINED_VARIABLE, &[]);
    assert_eq!(diag.message, message);
    assert_eq!(diag.line, 1);
}

#[rstest]
#[case::negate("print -true;", "Operand of '-' must be a number.")]
#[case::subtract("print \"a\" - 1;", "Operands of '-' must be numbers.")]
#[case::compare("print nil > 1;", "Operands of '>' must be numbers.")]
#[case::add("print \"a\" + 1;", "Operands of '+' must be two numbers or two strings.")]
fn test_type_errors(#[case] source: &str, #[case] message: &str) {
    let diag = assert_runtime_error(source, error_codes::TYPE_MISMATCH, &[]);
    assert_eq!(diag.message, message);
}

#[test]
fn test_runtime_error_stops_execution() {
    let diag = assert_runtime_error(
        "print \"before\";\nprint -\"x\";\nprint \"after\";",
        error_codes::TYPE_MISMATCH,
        &["before"],
    );
    assert_eq!(diag.line, 2);
    assert_eq!(diag.location, "at '-'");
}

#[test]
fn test_call_is_parsed_but_unsupported() {
    let diag = assert_runtime_error("clock();", error_codes::UNSUPPORTED_FEATURE, &[]);
    assert_eq!(diag.message, "Call expressions are not implemented.");
}

#[rstest]
#[case::get(
    Expr::Get(GetExpr {
        object: Box::new(Expr::Literal(LiteralValue::Nil)),
        name: Token::new(TokenKind::Identifier, "field", 3),
    }),
    "Property access expressions are not implemented."
)]
#[case::set(
    Expr::Set(SetExpr {
        object: Box::new(Expr::Literal(LiteralValue::Nil)),
        name: Token::new(TokenKind::Identifier, "field", 3),
        value: Box::new(Expr::Literal(LiteralValue::Bool(true))),
    }),
    "Property assignment expressions are not implemented."
)]
#[case::this(
    Expr::This(Token::new(TokenKind::This, "this", 3)),
    "'this' expressions are not implemented."
)]
#[case::super_(
    Expr::Super(SuperExpr {
        keyword: Token::new(TokenKind::Super, "super", 3),
        method: Token::new(TokenKind::Identifier, "init", 3),
    }),
    "'super' expressions are not implemented."
)]
fn test_member_shapes_are_unsupported(#[case] expr: Expr, #[case] message: &str) {
    let mut out: Vec<String> = Vec::new();
    let err = Interpreter::new()
        .interpret(&[Stmt::Expression(expr)], &mut out)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Unsupported { .. }));
    assert_eq!(err.to_string(), message);
    assert_eq!(err.line(), 3);
}

#[test]
fn test_scope_restored_after_runtime_error_in_block() {
    let mut lox = Lox::new();
    lox.eval("var a = \"global\";").unwrap();
    assert!(lox.eval("{ var a = \"block\"; print nope; }").is_err());
    assert_eq!(lox.interpreter().environment().depth(), 0);
    assert_eq!(lox.eval("print a;").unwrap(), vec!["global"]);
}

#[test]
fn test_redeclaring_global_overwrites() {
    assert_prints("var a = 1; var a = 2; print a;", &["2"]);
}

#[test]
fn test_assignment_in_inner_scope_updates_outer() {
    assert_prints(
        "var total = 0;\n{ { total = total + 5; } }\nprint total;",
        &["5"],
    );
}

#[test]
fn test_number_formatting() {
    assert_prints(
        "print 5; print 2.5; print -3; print 10 / 4; print 0.1 + 0.2;",
        &["5", "2.5", "-3", "2.5", "0.30000000000000004"],
    );
}

fn number(n: f64) -> Expr {
    Expr::Literal(LiteralValue::Number(n))
}

#[rstest]
#[case::binary(
    Expr::binary(number(1.0), Token::new(TokenKind::Comma, ",", 4), number(1.0)),
    "Invalid binary operator ','."
)]
#[case::unary(
    Expr::unary(Token::new(TokenKind::Plus, "+", 4), number(1.0)),
    "Invalid unary operator '+'."
)]
#[case::logical(
    Expr::logical(number(1.0), Token::new(TokenKind::Star, "*", 4), number(2.0)),
    "Invalid logical operator '*'."
)]
fn test_hand_built_tree_with_foreign_operator(#[case] expr: Expr, #[case] message: &str) {
    let mut out: Vec<String> = Vec::new();
    let err = Interpreter::new()
        .interpret(&[Stmt::Print(expr)], &mut out)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidOperator { .. }));
    assert_eq!(err.to_string(), message);
    assert_eq!(err.line(), 4);
    assert!(out.is_empty());
}

#[test]
fn test_foreign_operator_reports_its_code() {
    let program = [Stmt::Print(Expr::binary(
        number(1.0),
        Token::new(TokenKind::Comma, ",", 1),
        number(2.0),
    ))];
    let mut out: Vec<String> = Vec::new();
    let err = Interpreter::new().interpret(&program, &mut out).unwrap_err();
    let diag = lox_runtime::Diagnostic::from_runtime_error(&err);
    assert_eq!(diag.code, error_codes::INVALID_OPERATOR);
    assert_eq!(diag.line, 1);
}
