//! Lexical analysis (tokenization)
//!
//! The lexer converts Lox source code into a stream of tokens tagged with
//! their line. Errors are collected and scanning continues, so one pass
//! reports every lexical problem in the file.

use crate::diagnostic::CompileError;
use crate::token::{Token, TokenKind};
use log::debug;

mod literals;

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Current position in chars
    pub(super) current: usize,
    /// Start position of current token
    pub(super) start: usize,
    /// Current line number (1-indexed)
    pub(super) line: usize,
    /// Collected errors
    pub(super) errors: Vec<CompileError>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            start: 0,
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the source code, returning tokens and any errors
    ///
    /// The token vector always ends with exactly one `Eof` token.
    pub fn tokenize(&mut self) -> (Vec<Token>, Vec<CompileError>) {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }

        tokens.push(Token::eof(self.line));
        debug!(
            "scanned {} tokens over {} lines ({} errors)",
            tokens.len(),
            self.line,
            self.errors.len()
        );

        (tokens, std::mem::take(&mut self.errors))
    }

    /// Scan one lexeme; `None` for whitespace, comments and errors
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();

        let kind = match c {
            // Single-character tokens
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,

            // One or two character tokens
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.match_char('/') {
                    // Line comment runs to the newline, which is left for the next scan
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                    return None;
                }
                TokenKind::Slash
            }

            ' ' | '\r' | '\t' => return None,
            '\n' => {
                self.line += 1;
                return None;
            }

            '"' => return self.string(),
            c if c.is_ascii_digit() => return Some(self.number()),
            c if c.is_ascii_alphabetic() || c == '_' => return Some(self.identifier()),

            _ => {
                self.errors.push(CompileError::unexpected_character(self.line));
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    /// Pick `matched` if the next character is `expected`, else `single`
    fn either(&mut self, expected: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.match_char(expected) {
            matched
        } else {
            single
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    /// Peek at next character (current + 1)
    pub(super) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    /// Check if we've reached the end of source
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    /// Source text of the current lexeme
    pub(super) fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    /// Create a token spanning the current lexeme
    pub(super) fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.line)
    }
}
