//! Runtime value representation
//!
//! Values produced by the tree-walking interpreter.
//! - Nil, Bool, Number: immediate values
//! - String: reference-counted (`Rc<str>`), immutable; cloning is a refcount bump

use crate::token::Token;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Dynamically-typed runtime value
///
/// The enum is closed on purpose: callables and instances get their own
/// variants when functions and classes land, and every `match` on `Value`
/// has to handle them.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    /// `nil` and `false` are falsy, everything else (including `0` and `""`) is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(_) | Value::String(_) => true,
        }
    }

    /// Textual form used by `print`
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                // No trailing .0 for whole numbers
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Runtime error raised while evaluating a program
///
/// Every variant carries the token the error is attributed to, so the
/// diagnostic can name both the line and the offending lexeme.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Unary operator applied to a non-number
    #[error("Operand of '{}' must be a number.", .operator.lexeme)]
    OperandNotNumber { operator: Token },
    /// Arithmetic or comparison operator applied to non-numbers
    #[error("Operands of '{}' must be numbers.", .operator.lexeme)]
    OperandsNotNumbers { operator: Token },
    /// `+` applied to anything other than two numbers or two strings
    #[error("Operands of '{}' must be two numbers or two strings.", .operator.lexeme)]
    InvalidAddOperands { operator: Token },
    /// Read or assignment of a name bound nowhere in the scope chain
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },
    /// Expression shape that parses but has no evaluation semantics yet
    #[error("{feature} are not implemented.")]
    Unsupported { feature: &'static str, token: Token },
    /// Operator token that its expression kind does not accept
    #[error("Invalid {context} operator '{}'.", .operator.lexeme)]
    InvalidOperator {
        context: &'static str,
        operator: Token,
    },
}

impl RuntimeError {
    /// The token this error is attributed to
    pub fn token(&self) -> &Token {
        match self {
            RuntimeError::OperandNotNumber { operator } => operator,
            RuntimeError::OperandsNotNumbers { operator } => operator,
            RuntimeError::InvalidAddOperands { operator } => operator,
            RuntimeError::UndefinedVariable { name } => name,
            RuntimeError::Unsupported { token, .. } => token,
            RuntimeError::InvalidOperator { operator, .. } => operator,
        }
    }

    /// Source line of the offending token
    pub fn line(&self) -> usize {
        self.token().line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_number_display() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn test_other_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::string("hi there").to_string(), "hi there");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_eq!(Value::string("a"), Value::string("a"));
        assert_ne!(Value::Number(1.0), Value::string("1"));
        assert_ne!(Value::Nil, Value::Bool(false));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::string("x").type_name(), "string");
    }

    #[test]
    fn test_runtime_error_messages() {
        let name = Token::new(TokenKind::Identifier, "ghost", 4);
        let err = RuntimeError::UndefinedVariable { name };
        assert_eq!(err.to_string(), "Undefined variable 'ghost'.");
        assert_eq!(err.line(), 4);

        let minus = Token::new(TokenKind::Minus, "-", 2);
        let err = RuntimeError::OperandNotNumber { operator: minus };
        assert_eq!(err.to_string(), "Operand of '-' must be a number.");
        assert_eq!(err.token().kind, TokenKind::Minus);
    }
}
