//! Expression parsing
//!
//! One method per precedence level, lowest first. Binary levels loop, so
//! every operator is left-associative; assignment recurses to the right.

use crate::ast::*;
use crate::diagnostic::error_codes;
use crate::parser::{ParseResult, Parser, MAX_ARGUMENTS};
use crate::token::{Literal, TokenKind};

impl Parser {
    /// expression → assignment
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// assignment → IDENTIFIER "=" assignment | logic_or
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if self.match_token(TokenKind::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            if let Expr::Variable(name) = expr {
                return Ok(Expr::Assign(AssignExpr {
                    name,
                    value: Box::new(value),
                }));
            }

            // Reported, but the parser is not confused: no resynchronization
            self.error_with_code(
                equals,
                "Invalid assignment target.",
                error_codes::INVALID_ASSIGNMENT_TARGET,
            );
        }

        Ok(expr)
    }

    /// logic_or → logic_and ( "or" logic_and )*
    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while self.match_token(TokenKind::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::logical(expr, operator, right);
        }

        Ok(expr)
    }

    /// logic_and → equality ( "and" equality )*
    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while self.match_token(TokenKind::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::logical(expr, operator, right);
        }

        Ok(expr)
    }

    /// equality → comparison ( ( "!=" | "==" ) comparison )*
    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
        )
    }

    /// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    /// term → factor ( ( "-" | "+" ) factor )*
    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    /// factor → unary ( ( "/" | "*" ) unary )*
    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// Left-associative loop shared by the binary precedence levels
    fn binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// unary → ( "!" | "-" ) unary | call
    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }

        self.call()
    }

    /// call → primary ( "(" arguments? ")" )*
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        while self.match_token(TokenKind::LeftParen) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGUMENTS {
                    let token = self.peek().clone();
                    self.error_with_code(
                        token,
                        "Can't have more than 255 arguments.",
                        error_codes::TOO_MANY_ARGUMENTS,
                    );
                }
                arguments.push(self.expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call(CallExpr {
            callee: Box::new(callee),
            paren,
            arguments,
        }))
    }

    /// primary → NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" expression ")"
    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        let expr = match token.kind {
            TokenKind::False => Expr::Literal(LiteralValue::Bool(false)),
            TokenKind::True => Expr::Literal(LiteralValue::Bool(true)),
            TokenKind::Nil => Expr::Literal(LiteralValue::Nil),
            TokenKind::Number | TokenKind::String => Expr::Literal(match token.literal {
                Some(Literal::Number(n)) => LiteralValue::Number(n),
                Some(Literal::String(s)) => LiteralValue::String(s),
                None => return Err(self.error(token, "Expect expression.")),
            }),
            TokenKind::Identifier => Expr::Variable(token),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping(Box::new(inner)));
            }
            _ => return Err(self.error(token, "Expect expression.")),
        };

        self.advance();
        Ok(expr)
    }
}
