//! Parser integration tests
//!
//! Tree shape is checked through the S-expression printer; error recovery is
//! checked through the classic diagnostic lines.

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use insta::assert_snapshot;
use lox_runtime::{parse_source, AstPrinter, Program, VersionedProgram, AST_VERSION};
use rstest::rstest;

fn tree(source: &str) -> String {
    let (statements, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    AstPrinter::new().program(&statements)
}

#[rstest]
#[case("print 1 + 2 * 3 - 4 / 2;", "(print (- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0)))")]
#[case("print -(1 + 2);", "(print (- (group (+ 1.0 2.0))))")]
#[case("print !!true;", "(print (! (! true)))")]
#[case("print 1 < 2 == 3 >= 4;", "(print (== (< 1.0 2.0) (>= 3.0 4.0)))")]
#[case("print a or b and c;", "(print (or a (and b c)))")]
#[case("a = b = c;", "(; (= a (= b c)))")]
#[case("f(1)(2, x);", "(; (call (call f 1.0) 2.0 x))")]
#[case("print 1 - 2 - 3;", "(print (- (- 1.0 2.0) 3.0))")]
fn test_precedence_and_associativity(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(tree(source), expected);
}

#[test]
fn test_program_shape() {
    let source = r#"
var greeting = "hi";
{
  var n = 2;
  while (n > 0) {
    print greeting;
    n = n - 1;
  }
}
if (greeting == nil) print "none"; else print "some";
"#;
    assert_snapshot!(tree(source), @r###"
    (var greeting "hi")
    (block (var n 2.0) (while (> n 0.0) (block (print greeting) (; (= n (- n 1.0))))))
    (if (== greeting nil) (print "none") (print "some"))
    "###);
}

#[test]
fn test_for_desugars_to_while() {
    assert_snapshot!(
        tree("for (var i = 0; i < 3; i = i + 1) print i;"),
        @"(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
    );
}

#[rstest]
#[case::no_clauses("for (;;) print 1;", "(block (while true (block (print 1.0))))")]
#[case::condition_only("for (; false;) print 1;", "(block (while false (block (print 1.0))))")]
#[case::initializer_only(
    "for (var i = 0;;) print i;",
    "(block (var i 0.0) (while true (block (print i))))"
)]
#[case::increment_only(
    "for (;; i = i + 1) print i;",
    "(block (while true (block (print i) (; (= i (+ i 1.0))))))"
)]
#[case::block_body(
    "for (; x;) { print x; }",
    "(block (while x (block (block (print x)))))"
)]
fn test_for_omitted_clauses_keep_both_blocks(#[case] source: &str, #[case] expected: &str) {
    let (statements, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], lox_runtime::Stmt::Block(_)));
    assert_eq!(AstPrinter::new().program(&statements), expected);
}

#[test]
fn test_two_independent_errors_reported() {
    assert_compile_errors(
        "print ;\nvar = 1;\nprint \"ok\";",
        &[
            "[line 1] Error at ';': Expect expression.",
            "[line 2] Error at '=': Expect variable name.",
        ],
    );
}

#[test]
fn test_lexical_error_then_syntax_error() {
    assert_compile_errors(
        "print @;",
        &[
            "[line 1] Error: Unexpected character.",
            "[line 1] Error at ';': Expect expression.",
        ],
    );
}

#[test]
fn test_unterminated_string_then_error_at_end() {
    assert_compile_errors(
        "print \"abc",
        &[
            "[line 1] Error: Unterminated string.",
            "[line 1] Error at end: Expect expression.",
        ],
    );
}

#[test]
fn test_invalid_assignment_target_does_not_unwind() {
    let (statements, errors) = parse_source("a + b = c; print 1;");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "[line 1] Error at '=': Invalid assignment target."
    );
    // Both statements survive
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_recovery_inside_block_keeps_later_statements() {
    let (statements, errors) = parse_source("{\n  var x = ;\n  print 2;\n}\nprint 3;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(AstPrinter::new().program(&statements), "(block (print 2.0))\n(print 3.0)");
}

#[test]
fn test_missing_closing_brace_at_end() {
    assert_compile_errors(
        "{ print 1;",
        &["[line 1] Error at end: Expect '}' after block."],
    );
}

#[test]
fn test_too_many_arguments() {
    let args = vec!["0"; 256].join(", ");
    let (statements, errors) = parse_source(&format!("f({});", args));
    assert_eq!(statements.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), "LX1004");
    assert_eq!(errors[0].message(), "Can't have more than 255 arguments.");
}

#[test]
fn test_ast_json_roundtrip() {
    let (statements, _) = parse_source("var a = 1; if (a) print a; else { a = -a; }");
    let versioned = VersionedProgram::new(Program::from(statements.clone()));
    let json = versioned.to_json().unwrap();
    assert!(json.contains(&format!("\"ast_version\": {}", AST_VERSION)));

    let back = VersionedProgram::from_json(&json).unwrap();
    assert_eq!(back.ast_version, AST_VERSION);
    assert_eq!(back.program.statements, statements);
}
