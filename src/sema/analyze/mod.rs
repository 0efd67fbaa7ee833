//! Semantic Analysis Logic
//!
//! Traverses the AST to populate the symbol tables and perform type checking.
//! Function signatures are registered before any statement is checked, so
//! calls may precede definitions and functions may recurse.

mod expr;
mod register;
mod returns;
mod stmt;

use rustc_hash::FxHashMap as HashMap;

use crate::ast::{FunctionDef, Program, Span, Type};
use crate::sema::table::{SymbolEntry, SymbolKind, SymbolTable};
use crate::sema::{FunctionInfo, FunctionSignature, ProgramInfo, SemaError};

/// The function whose body is being checked
#[derive(Debug, Clone)]
pub(super) struct FunctionContext {
    pub returns: Option<Type>,
}

pub struct SemanticAnalyzer {
    /// Scope chain currently in effect: the program table at top level, a
    /// function's own table inside its body
    pub(super) table: SymbolTable,
    pub(super) signatures: HashMap<String, FunctionSignature>,
    pub(super) functions: HashMap<String, FunctionInfo>,
    pub(super) resolved: HashMap<Span, SymbolEntry>,
    pub(super) current_function: Option<FunctionContext>,
    /// Blocks entered below the program's top level
    pub(super) block_depth: usize,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            signatures: HashMap::default(),
            functions: HashMap::default(),
            resolved: HashMap::default(),
            current_function: None,
            block_depth: 0,
        }
    }

    pub fn analyze_program(mut self, program: &mut Program) -> Result<ProgramInfo, SemaError> {
        self.register_functions(program)?;

        for stmt in program.block.stmts.iter_mut() {
            self.analyze_stmt(stmt)?;
        }

        Ok(ProgramInfo {
            table: self.table,
            functions: self.functions,
            resolved: self.resolved,
        })
    }

    /// Check one top-level function against a fresh table of its own.
    /// Parameters and the body's top-level locals share the level-0 scope.
    pub(super) fn analyze_function(&mut self, def: &mut FunctionDef) -> Result<(), SemaError> {
        let name = def.name.node.clone();
        let signature = self
            .signatures
            .get(&name)
            .cloned()
            .ok_or_else(|| SemaError::UndefinedFunction {
                name: name.clone(),
                span: def.name.span,
            })?;

        let outer_table = std::mem::replace(&mut self.table, SymbolTable::new());
        let outer_function = self.current_function.replace(FunctionContext {
            returns: signature.returns,
        });
        self.block_depth += 1;

        let result = self.check_function_body(def);

        self.block_depth -= 1;
        self.current_function = outer_function;
        let table = std::mem::replace(&mut self.table, outer_table);
        result?;

        if let Some(expected) = signature.returns
            && !returns::block_contains_return(&def.body)
        {
            return Err(SemaError::MissingReturn {
                function: name,
                expected,
                span: def.name.span,
            });
        }

        let falls_through = !returns::block_always_returns(&def.body);
        log::trace!(
            "function '{}': {} slot(s) in its frame{}",
            name,
            table.root_len(),
            if falls_through { ", falls through" } else { "" }
        );
        self.functions.insert(
            name.clone(),
            FunctionInfo {
                name,
                signature,
                table,
                falls_through,
            },
        );
        Ok(())
    }

    fn check_function_body(&mut self, def: &mut FunctionDef) -> Result<(), SemaError> {
        for param in &def.params {
            self.declare(&param.name.node, SymbolKind::Parameter, param.ty.node, param.name.span)?;
        }
        for stmt in def.body.stmts.iter_mut() {
            self.analyze_stmt(stmt)?;
        }
        Ok(())
    }

    /// Declare a name in the innermost scope and record its slot
    pub(super) fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ty: Type,
        span: Span,
    ) -> Result<SymbolEntry, SemaError> {
        let entry = self
            .table
            .declare(name, kind, ty, span)
            .map_err(|previous| SemaError::Redeclaration {
                name: name.to_string(),
                span,
                previous: previous.span,
            })?;
        self.resolved.insert(span, entry.clone());
        Ok(entry)
    }

    /// Resolve a variable mention and record its slot
    pub(super) fn resolve(&mut self, name: &str, span: Span) -> Result<SymbolEntry, SemaError> {
        let entry = self
            .table
            .lookup(name)
            .cloned()
            .ok_or_else(|| SemaError::UndefinedVariable {
                name: name.to_string(),
                span,
            })?;
        self.resolved.insert(span, entry.clone());
        Ok(entry)
    }
}
