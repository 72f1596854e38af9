//! Parsing (tokens to AST)
//!
//! The parser converts a stream of tokens into a list of statements using
//! recursive descent, one method per grammar rule. On a syntax error it
//! records the error, skips to the next likely statement boundary, and keeps
//! going, so a single pass reports every independent mistake.

mod expr;
mod stmt;

use crate::ast::Stmt;
use crate::diagnostic::{error_codes, CompileError};
use crate::token::{Token, TokenKind};
use log::debug;

/// Marker for a failed rule; the error itself is already recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ParseError;

pub(super) type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of arguments in a call expression
pub const MAX_ARGUMENTS: usize = 255;

/// Parser state for building AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) errors: Vec<CompileError>,
}

impl Parser {
    /// Create a new parser for the given tokens
    ///
    /// A missing trailing `Eof` is supplied, so the parser never reads past
    /// the end of the vector.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parse tokens into statements
    ///
    /// Malformed declarations are left out of the result; their errors are
    /// returned alongside. Always terminates.
    pub fn parse(&mut self) -> (Vec<Stmt>, Vec<CompileError>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        debug!(
            "parsed {} statements ({} errors)",
            statements.len(),
            self.errors.len()
        );
        (statements, std::mem::take(&mut self.errors))
    }

    // === Token navigation ===

    /// Advance to next token and return the consumed one
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Peek at current token
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Most recently consumed token
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Check if current token matches kind
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Match and consume token if it matches
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Match and consume the current token if it is any of `kinds`
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.match_token(kind))
    }

    /// Consume token of given kind or error
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Check if at end of token stream
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    // === Errors ===

    /// Record a syntax error at `token`
    pub(super) fn error(&mut self, token: Token, message: &str) -> ParseError {
        self.error_with_code(token, message, error_codes::SYNTAX_ERROR)
    }

    /// Record a syntax error with a specific code
    pub(super) fn error_with_code(
        &mut self,
        token: Token,
        message: &str,
        code: &'static str,
    ) -> ParseError {
        self.errors
            .push(CompileError::syntax_with_code(token, message, code));
        ParseError
    }

    /// Record a syntax error at the current token
    pub(super) fn error_at_current(&mut self, message: &str) -> ParseError {
        let token = self.peek().clone();
        self.error(token, message)
    }

    /// Discard tokens until a likely statement boundary
    ///
    /// Stops just after a `;`, or before a token that starts a statement.
    pub(super) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }
}
