//! Literal parsing for the lexer

use crate::diagnostic::CompileError;
use crate::lexer::Lexer;
use crate::token::{Literal, Token, TokenKind};

impl Lexer {
    /// Scan a string literal
    ///
    /// No escape processing: the literal is the raw text between the quotes.
    /// The token's line is the line the string ends on.
    pub(super) fn string(&mut self) -> Option<Token> {
        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.errors.push(CompileError::unterminated_string(self.line));
            return None;
        }

        self.advance(); // Closing "

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        Some(Token::with_literal(
            TokenKind::String,
            self.lexeme(),
            Literal::String(value),
            self.line,
        ))
    }

    /// Scan a number literal (integer or decimal)
    pub(super) fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A '.' is only part of the number when a digit follows it
        if self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        // Digits with at most one interior '.', always a valid f64
        let value = lexeme.parse::<f64>().unwrap_or_default();
        Token::with_literal(TokenKind::Number, lexeme, Literal::Number(value), self.line)
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = TokenKind::is_keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, self.line)
    }
}
