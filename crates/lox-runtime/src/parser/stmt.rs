//! Statement parsing

use crate::ast::*;
use crate::parser::{ParseResult, Parser};
use crate::token::TokenKind;

impl Parser {
    /// declaration → varDecl | statement
    ///
    /// Recovery point: on error the parser resynchronizes and the
    /// declaration is dropped.
    pub(super) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_token(TokenKind::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    /// varDecl → "var" IDENTIFIER ( "=" expression )? ";"
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::Var(VarDecl { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_token(TokenKind::For) {
            return self.for_statement();
        }
        if self.match_token(TokenKind::If) {
            return self.if_statement();
        }
        if self.match_token(TokenKind::Print) {
            return self.print_statement();
        }
        if self.match_token(TokenKind::While) {
            return self.while_statement();
        }
        if self.match_token(TokenKind::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        }

        self.expression_statement()
    }

    /// forStmt → "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement
    ///
    /// Desugared into a `while` loop; no `for` node reaches the interpreter.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_token(TokenKind::Semicolon) {
            None
        } else if self.match_token(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let body = self.statement()?;

        // Always Block[initializer?, While(condition, Block[body, increment?])]
        let mut loop_body = vec![body];
        loop_body.extend(increment.map(Stmt::Expression));

        let condition = condition.unwrap_or(Expr::Literal(LiteralValue::Bool(true)));
        let while_loop = Stmt::While(WhileStmt {
            condition,
            body: Box::new(Stmt::Block(loop_body)),
        });

        let mut outer: Vec<Stmt> = initializer.into_iter().collect();
        outer.push(while_loop);
        Ok(Stmt::Block(outer))
    }

    /// ifStmt → "if" "(" expression ")" statement ( "else" statement )?
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        // Greedy: a dangling else belongs to the innermost if
        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// printStmt → "print" expression ";"
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    /// whileStmt → "while" "(" expression ")" statement
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    /// block → "{" declaration* "}"
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    /// exprStmt → expression ";"
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }
}
