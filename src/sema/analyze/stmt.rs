//! Statement Analysis
//!
//! Type checking and scope handling for all statement variants. Every block
//! opens exactly one scope, so a scope's level always equals the number of
//! frames the generator will have open around it.

use crate::ast::{Block, Expr, Span, Spanned, Stmt, Type};
use crate::sema::SemaError;
use crate::sema::table::SymbolKind;
use crate::sema::types::Builtin;

use super::SemanticAnalyzer;

impl SemanticAnalyzer {
    pub(super) fn analyze_stmt(&mut self, stmt: &mut Spanned<Stmt>) -> Result<(), SemaError> {
        let span = stmt.span;
        match &mut stmt.node {
            Stmt::Declaration { name, ty } => {
                self.declare(&name.node, SymbolKind::Variable, ty.node, name.span)?;
            }
            Stmt::Assignment { name, ty, value } => {
                // The initializer cannot see the name it initializes
                self.expect_type(value, ty.node)?;
                self.declare(&name.node, SymbolKind::Variable, ty.node, name.span)?;
            }
            Stmt::Reassignment { name, value } => {
                let target = self.resolve(&name.node, name.span)?;
                self.expect_type(value, target.ty)?;
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                self.expect_type(condition, Type::Bool)?;
                self.analyze_block(then_block)?;
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block)?;
                }
            }
            Stmt::While { condition, body } => {
                self.expect_type(condition, Type::Bool)?;
                self.analyze_block(body)?;
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                // The header is a scope of its own holding the loop variable
                self.enter_block();
                let result = self.analyze_for(init, condition, step, body);
                self.exit_block();
                result?;
            }
            Stmt::Return(value) => self.analyze_return(value.as_mut(), span)?,
            Stmt::Function(def) => {
                if self.block_depth > 0 {
                    return Err(SemaError::NestedFunction {
                        name: def.name.node.clone(),
                        span: def.name.span,
                    });
                }
                self.analyze_function(def)?;
            }
            Stmt::Call(call) => {
                // A call statement may discard any result, including none
                self.check_call(call)?;
            }
            Stmt::Block(block) => self.analyze_block(block)?,
            Stmt::Print(value) => {
                self.check_value(value)?;
            }
            Stmt::Delay(millis) => self.check_builtin_args(Builtin::Delay, &mut [millis])?,
            Stmt::Write { x, y, colour } => {
                self.check_builtin_args(Builtin::Write, &mut [x, y, colour])?
            }
            Stmt::WriteBox {
                x,
                y,
                width,
                height,
                colour,
            } => self.check_builtin_args(Builtin::WriteBox, &mut [x, y, width, height, colour])?,
        }
        Ok(())
    }

    fn analyze_for(
        &mut self,
        init: &mut Option<Box<Spanned<Stmt>>>,
        condition: &mut Expr,
        step: &mut Option<Box<Spanned<Stmt>>>,
        body: &mut Block,
    ) -> Result<(), SemaError> {
        if let Some(init) = init {
            self.analyze_stmt(init)?;
        }
        self.expect_type(condition, Type::Bool)?;
        if let Some(step) = step {
            self.analyze_stmt(step)?;
        }
        self.analyze_block(body)
    }

    fn analyze_return(&mut self, value: Option<&mut Expr>, span: Span) -> Result<(), SemaError> {
        let Some(context) = self.current_function.clone() else {
            return Err(SemaError::ReturnOutsideFunction { span });
        };

        let (found, at) = match value {
            Some(value) => (Some(self.check_value(value)?), value.span),
            None => (None, span),
        };

        if found != context.returns {
            return Err(SemaError::ReturnTypeMismatch {
                expected: context.returns,
                found,
                span: at,
            });
        }
        Ok(())
    }

    /// Check a nested block inside a fresh scope
    pub(super) fn analyze_block(&mut self, block: &mut Block) -> Result<(), SemaError> {
        self.enter_block();
        let result = block
            .stmts
            .iter_mut()
            .try_for_each(|stmt| self.analyze_stmt(stmt));
        self.exit_block();
        result
    }

    fn enter_block(&mut self) {
        self.table.enter_scope();
        self.block_depth += 1;
    }

    fn exit_block(&mut self) {
        self.table.exit_scope();
        self.block_depth -= 1;
    }

    pub(super) fn check_builtin_args(
        &mut self,
        builtin: Builtin,
        args: &mut [&mut Expr],
    ) -> Result<(), SemaError> {
        for (arg, expected) in args.iter_mut().zip(builtin.params()) {
            self.expect_type(arg, *expected)?;
        }
        Ok(())
    }
}
