//! Expression evaluation

use crate::ast::*;
use crate::interpreter::Interpreter;
use crate::token::{Token, TokenKind};
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Evaluate an expression
    pub(super) fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(Self::literal_value(lit)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary(unary) => self.eval_unary(unary),
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Logical(logical) => self.eval_logical(logical),
            Expr::Variable(name) => self.environment.get(name),
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                self.environment.assign(&assign.name, value.clone())?;
                Ok(value)
            }
            Expr::Call(call) => Err(RuntimeError::Unsupported {
                feature: "Call expressions",
                token: call.paren.clone(),
            }),
            Expr::Get(get) => Err(RuntimeError::Unsupported {
                feature: "Property access expressions",
                token: get.name.clone(),
            }),
            Expr::Set(set) => Err(RuntimeError::Unsupported {
                feature: "Property assignment expressions",
                token: set.name.clone(),
            }),
            Expr::This(keyword) => Err(RuntimeError::Unsupported {
                feature: "'this' expressions",
                token: keyword.clone(),
            }),
            Expr::Super(sup) => Err(RuntimeError::Unsupported {
                feature: "'super' expressions",
                token: sup.keyword.clone(),
            }),
        }
    }

    fn literal_value(lit: &LiteralValue) -> Value {
        match lit {
            LiteralValue::Nil => Value::Nil,
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::String(s) => Value::string(s),
        }
    }

    fn eval_unary(&mut self, unary: &UnaryExpr) -> Result<Value, RuntimeError> {
        let right = self.evaluate(&unary.right)?;

        match unary.operator.kind {
            TokenKind::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandNotNumber {
                    operator: unary.operator.clone(),
                }),
            },
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(RuntimeError::InvalidOperator {
                context: "unary",
                operator: unary.operator.clone(),
            }),
        }
    }

    /// `and` / `or` return the deciding operand itself, not a boolean
    fn eval_logical(&mut self, logical: &BinaryExpr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&logical.left)?;

        let short_circuits = match logical.operator.kind {
            TokenKind::Or => left.is_truthy(),
            TokenKind::And => !left.is_truthy(),
            _ => {
                return Err(RuntimeError::InvalidOperator {
                    context: "logical",
                    operator: logical.operator.clone(),
                })
            }
        };
        if short_circuits {
            return Ok(left);
        }

        self.evaluate(&logical.right)
    }

    fn eval_binary(&mut self, binary: &BinaryExpr) -> Result<Value, RuntimeError> {
        // Left operand is fully evaluated before the right
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.kind {
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => {
                    Ok(Value::string(format!("{}{}", a, b)))
                }
                _ => Err(RuntimeError::InvalidAddOperands {
                    operator: operator.clone(),
                }),
            },
            TokenKind::Minus => Self::arithmetic(operator, &left, &right, |a, b| a - b),
            TokenKind::Star => Self::arithmetic(operator, &left, &right, |a, b| a * b),
            // IEEE-754: division by zero yields inf or NaN
            TokenKind::Slash => Self::arithmetic(operator, &left, &right, |a, b| a / b),
            TokenKind::Greater => Self::comparison(operator, &left, &right, |a, b| a > b),
            TokenKind::GreaterEqual => Self::comparison(operator, &left, &right, |a, b| a >= b),
            TokenKind::Less => Self::comparison(operator, &left, &right, |a, b| a < b),
            TokenKind::LessEqual => Self::comparison(operator, &left, &right, |a, b| a <= b),
            _ => Err(RuntimeError::InvalidOperator {
                context: "binary",
                operator: operator.clone(),
            }),
        }
    }

    fn number_operands(
        operator: &Token,
        left: &Value,
        right: &Value,
    ) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::OperandsNotNumbers {
                operator: operator.clone(),
            }),
        }
    }

    fn arithmetic(
        operator: &Token,
        left: &Value,
        right: &Value,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(operator, left, right)?;
        Ok(Value::Number(op(a, b)))
    }

    fn comparison(
        operator: &Token,
        left: &Value,
        right: &Value,
        op: impl Fn(f64, f64) -> bool,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(operator, left, right)?;
        Ok(Value::Bool(op(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::Interpreter;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::value::RuntimeError;
    use rstest::rstest;

    fn eval_print(source: &str) -> Result<Vec<String>, RuntimeError> {
        let (tokens, _) = Lexer::new(source).tokenize();
        let (statements, errors) = Parser::new(tokens).parse();
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        let mut out: Vec<String> = Vec::new();
        Interpreter::new().interpret(&statements, &mut out)?;
        Ok(out)
    }

    #[rstest]
    #[case("print 1 + 2 * 3 - 4 / 2;", "5")]
    #[case("print (1 + 2) * 3;", "9")]
    #[case("print 7 / 2;", "3.5")]
    #[case("print -(-3);", "3")]
    #[case("print \"foo\" + \"bar\";", "foobar")]
    #[case("print 1 / 0;", "inf")]
    #[case("print -1 / 0;", "-inf")]
    #[case("print 3 > 2;", "true")]
    #[case("print 2 <= 1;", "false")]
    #[case("print !nil;", "true")]
    #[case("print !0;", "false")]
    #[case("print 1 == 1;", "true")]
    #[case("print \"1\" == 1;", "false")]
    #[case("print nil == nil;", "true")]
    #[case("print nil != false;", "true")]
    fn test_expression_values(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(eval_print(source).unwrap(), vec![expected]);
    }

    #[rstest]
    #[case("print 1 and 2;", "2")]
    #[case("print nil and 2;", "nil")]
    #[case("print 1 or 2;", "1")]
    #[case("print nil or 2;", "2")]
    #[case("print false or nil;", "nil")]
    fn test_logical_returns_operand(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(eval_print(source).unwrap(), vec![expected]);
    }

    #[test]
    fn test_short_circuit_skips_right_operand() {
        // The right side would fail with an undefined variable if evaluated
        assert_eq!(eval_print("print false and missing;").unwrap(), vec!["false"]);
        assert_eq!(eval_print("print true or missing;").unwrap(), vec!["true"]);
    }

    #[test]
    fn test_nan_division() {
        assert_eq!(eval_print("print 0 / 0;").unwrap(), vec!["NaN"]);
    }

    #[rstest]
    #[case("print -\"a\";", "Operand of '-' must be a number.")]
    #[case("print 1 - \"a\";", "Operands of '-' must be numbers.")]
    #[case("print nil * 2;", "Operands of '*' must be numbers.")]
    #[case("print \"a\" < \"b\";", "Operands of '<' must be numbers.")]
    #[case("print 1 + \"a\";", "Operands of '+' must be two numbers or two strings.")]
    #[case("print missing;", "Undefined variable 'missing'.")]
    #[case("missing = 1;", "Undefined variable 'missing'.")]
    #[case("f();", "Call expressions are not implemented.")]
    fn test_runtime_errors(#[case] source: &str, #[case] message: &str) {
        let err = eval_print(source).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_assignment_yields_value() {
        assert_eq!(
            eval_print("var a = 1; print a = 3; print a;").unwrap(),
            vec!["3", "3"]
        );
    }

    #[test]
    fn test_left_operand_evaluated_first() {
        // Left side's assignment is visible to the right side
        assert_eq!(
            eval_print("var a = 1; print (a = 2) + a;").unwrap(),
            vec!["4"]
        );
    }
}
