//! Abstract Syntax Tree (AST) definitions
//!
//! Expressions and statements are immutable once the parser builds them.
//! Nodes keep the tokens they were parsed from so runtime errors can point
//! back at a line and lexeme.

use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AST schema version
///
/// Included in JSON dumps. Increment when making breaking changes to the
/// AST structure.
pub const AST_VERSION: u32 = 1;

/// Top-level program: the declarations that parsed successfully
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl From<Vec<Stmt>> for Program {
    fn from(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

/// Versioned AST wrapper for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    /// AST schema version
    pub ast_version: u32,
    /// The actual program AST
    #[serde(flatten)]
    pub program: Program,
}

impl VersionedProgram {
    /// Create a new versioned program wrapper
    pub fn new(program: Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Program> for VersionedProgram {
    fn from(program: Program) -> Self {
        Self::new(program)
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression evaluated for its effect
    Expression(Expr),
    /// `print expr;`
    Print(Expr),
    /// `var name (= initializer)?;`
    Var(VarDecl),
    /// `{ ... }`
    Block(Vec<Stmt>),
    If(IfStmt),
    While(WhileStmt),
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: Token,
    pub initializer: Option<Expr>,
}

/// If statement; `else` binds to the nearest `if`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// While loop (also the target of `for` desugaring)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(LiteralValue),
    Grouping(Box<Expr>),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    /// `and` / `or`, evaluated with short-circuiting
    Logical(BinaryExpr),
    Variable(Token),
    Assign(AssignExpr),
    Call(CallExpr),
    /// `object.name`; not produced by the current grammar
    Get(GetExpr),
    /// `object.name = value`; not produced by the current grammar
    Set(SetExpr),
    /// `this`; not produced by the current grammar
    This(Token),
    /// `super.method`; not produced by the current grammar
    Super(SuperExpr),
}

/// Literal value embedded in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => write!(f, "nil"),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => write!(f, "{:?}", n),
            LiteralValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Unary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Binary or logical expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Assignment to a named variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub name: Token,
    pub value: Box<Expr>,
}

/// Function call expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    /// Closing parenthesis, used to locate call errors
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

/// Property read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetExpr {
    pub object: Box<Expr>,
    pub name: Token,
}

/// Property write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExpr {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

/// Superclass method access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperExpr {
    pub keyword: Token,
    pub method: Token,
}

impl Expr {
    /// Boxed binary expression
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Boxed logical expression
    pub fn logical(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Logical(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Boxed unary expression
    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator,
            right: Box::new(right),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn sample_program() -> Program {
        Program::from(vec![Stmt::Print(Expr::binary(
            Expr::Literal(LiteralValue::Number(1.0)),
            Token::new(TokenKind::Plus, "+", 1),
            Expr::Literal(LiteralValue::Number(2.0)),
        ))])
    }

    #[test]
    fn test_versioned_program_json() {
        let json = VersionedProgram::new(sample_program()).to_json().unwrap();
        assert!(json.contains("\"ast_version\": 1"));
        assert!(json.contains("\"statements\""));
        assert!(json.contains("\"Print\""));
    }

    #[test]
    fn test_versioned_program_round_trip() {
        let original = VersionedProgram::new(sample_program());
        let json = original.to_json().unwrap();
        let back = VersionedProgram::from_json(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_future_version_still_parses() {
        let json = r#"{ "ast_version": 9, "statements": [] }"#;
        let versioned = VersionedProgram::from_json(json).unwrap();
        assert_ne!(versioned.ast_version, AST_VERSION);
        assert!(versioned.program.statements.is_empty());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(LiteralValue::Nil.to_string(), "nil");
        assert_eq!(LiteralValue::Number(3.0).to_string(), "3.0");
        assert_eq!(LiteralValue::String("hi".into()).to_string(), "hi");
    }
}
