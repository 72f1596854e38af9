//! S-expression rendering of the AST
//!
//! Produces a fully parenthesized form that makes grouping explicit, e.g.
//! `1 + 2 * 3` renders as `(+ 1.0 (* 2.0 3.0))`. Used by `lox --dump-ast`
//! and by parser tests.

use crate::ast::*;

/// AST to S-expression printer
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    /// Render every statement, one per line
    pub fn program(&self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|stmt| self.stmt(stmt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => self.parenthesize(";", [expr]),
            Stmt::Print(expr) => self.parenthesize("print", [expr]),
            Stmt::Var(decl) => match &decl.initializer {
                Some(init) => format!("(var {} {})", decl.name.lexeme, self.expr(init)),
                None => format!("(var {})", decl.name.lexeme),
            },
            Stmt::Block(statements) => {
                let mut out = String::from("(block");
                for stmt in statements {
                    out.push(' ');
                    out.push_str(&self.stmt(stmt));
                }
                out.push(')');
                out
            }
            Stmt::If(if_stmt) => {
                let mut out = format!(
                    "(if {} {}",
                    self.expr(&if_stmt.condition),
                    self.stmt(&if_stmt.then_branch)
                );
                if let Some(else_branch) = &if_stmt.else_branch {
                    out.push(' ');
                    out.push_str(&self.stmt(else_branch));
                }
                out.push(')');
                out
            }
            Stmt::While(while_stmt) => format!(
                "(while {} {})",
                self.expr(&while_stmt.condition),
                self.stmt(&while_stmt.body)
            ),
        }
    }

    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(LiteralValue::String(s)) => format!("{:?}", s),
            Expr::Literal(value) => value.to_string(),
            Expr::Grouping(inner) => self.parenthesize("group", [inner.as_ref()]),
            Expr::Unary(unary) => self.parenthesize(&unary.operator.lexeme, [unary.right.as_ref()]),
            Expr::Binary(binary) | Expr::Logical(binary) => self.parenthesize(
                &binary.operator.lexeme,
                [binary.left.as_ref(), binary.right.as_ref()],
            ),
            Expr::Variable(name) => name.lexeme.clone(),
            Expr::Assign(assign) => {
                format!("(= {} {})", assign.name.lexeme, self.expr(&assign.value))
            }
            Expr::Call(call) => {
                let mut out = format!("(call {}", self.expr(&call.callee));
                for arg in &call.arguments {
                    out.push(' ');
                    out.push_str(&self.expr(arg));
                }
                out.push(')');
                out
            }
            Expr::Get(get) => format!("(get {} {})", self.expr(&get.object), get.name.lexeme),
            Expr::Set(set) => format!(
                "(set {} {} {})",
                self.expr(&set.object),
                set.name.lexeme,
                self.expr(&set.value)
            ),
            Expr::This(_) => "this".to_string(),
            Expr::Super(sup) => format!("(super {})", sup.method.lexeme),
        }
    }

    fn parenthesize<'a>(&self, name: &str, exprs: impl IntoIterator<Item = &'a Expr>) -> String {
        let mut out = format!("({}", name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&self.expr(expr));
        }
        out.push(')');
        out
    }
}
