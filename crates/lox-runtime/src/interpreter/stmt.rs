//! Statement execution

use crate::ast::*;
use crate::interpreter::{Interpreter, PrintSink, UninitializedPolicy};
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Execute a statement
    pub(super) fn execute(
        &mut self,
        stmt: &Stmt,
        out: &mut dyn PrintSink,
    ) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                out.print(&value.to_display_string());
                Ok(())
            }
            Stmt::Var(decl) => self.execute_var(decl),
            Stmt::Block(statements) => self.execute_block(statements, out),
            Stmt::If(if_stmt) => self.execute_if(if_stmt, out),
            Stmt::While(while_stmt) => self.execute_while(while_stmt, out),
        }
    }

    fn execute_var(&mut self, decl: &VarDecl) -> Result<(), RuntimeError> {
        let value = match &decl.initializer {
            Some(init) => self.evaluate(init)?,
            None => match self.options.uninitialized {
                UninitializedPolicy::Unbound => return Ok(()),
                UninitializedPolicy::Nil => Value::Nil,
            },
        };
        self.environment.define(decl.name.lexeme.clone(), value);
        Ok(())
    }

    /// Run statements in a fresh scope
    ///
    /// The enclosing scope is restored whether the block completes or fails.
    pub(super) fn execute_block(
        &mut self,
        statements: &[Stmt],
        out: &mut dyn PrintSink,
    ) -> Result<(), RuntimeError> {
        let mark = self.environment.enter_scope();
        let result = statements
            .iter()
            .try_for_each(|stmt| self.execute(stmt, out));
        self.environment.exit_scope(mark);
        result
    }

    fn execute_if(&mut self, if_stmt: &IfStmt, out: &mut dyn PrintSink) -> Result<(), RuntimeError> {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch, out)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch, out)
        } else {
            Ok(())
        }
    }

    fn execute_while(
        &mut self,
        while_stmt: &WhileStmt,
        out: &mut dyn PrintSink,
    ) -> Result<(), RuntimeError> {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            self.execute(&while_stmt.body, out)?;
        }
        Ok(())
    }
}
