//! Semantic Analysis module
//!
//! This module is responsible for:
//! - Symbol resolution (mapping every name to a frame-relative slot)
//! - Type checking, with resolved types written back into the AST
//! - Function signature and return-path checks

pub mod analyze;
pub mod table;
pub mod types;

use rustc_hash::FxHashMap as HashMap;

use crate::ast::{BinaryOp, Program, Span, Type, UnaryOp, display_return};
use analyze::SemanticAnalyzer;
use table::{SymbolEntry, SymbolTable};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemaError {
    /// Name declared twice in one scope, or function defined twice
    #[error("'{name}' is already declared in this scope")]
    Redeclaration {
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("undefined function '{name}'")]
    UndefinedFunction { name: String, span: Span },

    /// Call with the wrong number of arguments
    #[error("'{function}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// Argument `position` (1-based) has the wrong type
    #[error("argument {position} of '{function}' must be {expected}, found {found}")]
    ArgumentTypeMismatch {
        function: String,
        position: usize,
        expected: Type,
        found: Type,
        span: Span,
    },

    #[error("cannot apply '{}' to {left} and {right}", .op.symbol())]
    InvalidBinaryOp {
        op: BinaryOp,
        left: Type,
        right: Type,
        span: Span,
    },

    #[error("cannot apply '{}' to {operand}", .op.symbol())]
    InvalidUnaryOp {
        op: UnaryOp,
        operand: Type,
        span: Span,
    },

    /// Declaration, reassignment, condition or primitive operand of the wrong type
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: Type,
        found: Type,
        span: Span,
    },

    /// A call to a function without a return type used as a value
    #[error("'{function}' does not return a value")]
    VoidValue { function: String, span: Span },

    #[error("return type mismatch: expected {}, found {}", display_return(*.expected), display_return(*.found))]
    ReturnTypeMismatch {
        expected: Option<Type>,
        found: Option<Type>,
        span: Span,
    },

    #[error("return statement outside function")]
    ReturnOutsideFunction { span: Span },

    /// Non-void function body without any return statement
    #[error("function '{function}' returns {expected} but has no return statement")]
    MissingReturn {
        function: String,
        expected: Type,
        span: Span,
    },

    /// Function defined anywhere but the top level of the program
    #[error("function '{name}' must be defined at the top level")]
    NestedFunction { name: String, span: Span },
}

impl SemaError {
    pub fn span(&self) -> Span {
        match self {
            SemaError::Redeclaration { span, .. }
            | SemaError::UndefinedVariable { span, .. }
            | SemaError::UndefinedFunction { span, .. }
            | SemaError::ArityMismatch { span, .. }
            | SemaError::ArgumentTypeMismatch { span, .. }
            | SemaError::InvalidBinaryOp { span, .. }
            | SemaError::InvalidUnaryOp { span, .. }
            | SemaError::TypeMismatch { span, .. }
            | SemaError::VoidValue { span, .. }
            | SemaError::ReturnTypeMismatch { span, .. }
            | SemaError::ReturnOutsideFunction { span }
            | SemaError::MissingReturn { span, .. }
            | SemaError::NestedFunction { span, .. } => *span,
        }
    }

    /// Short heading printed above the source excerpt
    fn heading(&self) -> &'static str {
        match self {
            SemaError::Redeclaration { .. } => "redeclaration",
            SemaError::UndefinedVariable { .. } | SemaError::UndefinedFunction { .. } => {
                "unresolved name"
            }
            SemaError::ArityMismatch { .. } | SemaError::ArgumentTypeMismatch { .. } => {
                "function call"
            }
            SemaError::InvalidBinaryOp { .. } => "invalid binary operation",
            SemaError::InvalidUnaryOp { .. } => "invalid unary operation",
            SemaError::TypeMismatch { .. } | SemaError::VoidValue { .. } => "type mismatch",
            SemaError::ReturnTypeMismatch { .. } => "return type mismatch",
            SemaError::ReturnOutsideFunction { .. } | SemaError::MissingReturn { .. } => {
                "invalid return"
            }
            SemaError::NestedFunction { .. } => "nested function",
        }
    }

    /// Format error with source code context showing the actual line and error marker
    pub fn format_with_source(&self, source: &str) -> String {
        self.format_with_source_and_file(source, None)
    }

    /// Format error with source code context and filename
    pub fn format_with_source_and_file(&self, source: &str, filename: Option<&str>) -> String {
        let msg = match self {
            SemaError::Redeclaration { name, previous, .. } => format!(
                "'{}' is already declared in this scope (previously declared at {})",
                name,
                previous.format_position(source)
            ),
            other => other.to_string(),
        };
        format!(
            "error: {}\n{}",
            self.heading(),
            self.span().format_error_context(source, filename, &msg)
        )
    }
}

/// Parameter types and return type of a function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub params: Vec<Type>,
    /// `None` for void functions
    pub returns: Option<Type>,
}

/// Everything the generator needs to know about one function
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub name: String,
    pub signature: FunctionSignature,
    /// Parameters and locals; the level-0 frame holds the parameters followed
    /// by the body's top-level locals
    pub table: SymbolTable,
    /// Some path reaches the end of the body without a `return`
    pub falls_through: bool,
}

impl FunctionInfo {
    /// Slots in the function's own frame
    pub fn frame_size(&self) -> usize {
        self.table.root_len()
    }
}

/// Result of a successful analysis
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    /// Program-level variables
    pub table: SymbolTable,
    pub functions: HashMap<String, FunctionInfo>,
    /// Slot of every variable mention, keyed by the span of the name
    pub resolved: HashMap<Span, SymbolEntry>,
}

impl ProgramInfo {
    pub fn lookup(&self, span: Span) -> Option<&SymbolEntry> {
        self.resolved.get(&span)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.get(name)
    }
}

/// Check a parsed program, annotating every expression with its type
pub fn analyze(program: &mut Program) -> Result<ProgramInfo, SemaError> {
    let info = SemanticAnalyzer::new().analyze_program(program)?;
    log::debug!(
        "analysis ok: {} program variables, {} functions, {} resolved names",
        info.table.entries().len(),
        info.functions.len(),
        info.resolved.len()
    );
    Ok(info)
}
