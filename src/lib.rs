//! parlc - compiler for a small pixel-art language
//!
//! Source text goes through four stages: [`lex`], [`Parser::parse`],
//! [`analyze`] and [`generate`]. Each stage either hands its result to the
//! next or stops the pipeline with a diagnostic. [`compile`] runs all four.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod sema;

pub use ast::{Program, Span, Spanned};
pub use codegen::{Assembly, generate};
pub use config::{CodegenConfig, CompilerConfig};
pub use lexer::{LexError, lex};
pub use parser::{ParseError, Parser};
pub use sema::{SemaError, analyze};

use codegen::CodegenError;

/// Stage that rejected the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Sema,
    Internal,
}

/// First diagnostic produced by the pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sema(#[from] SemaError),

    #[error("internal compiler error: {0}")]
    Internal(#[from] CodegenError),
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lex(_) => ErrorKind::Lex,
            CompileError::Parse(_) => ErrorKind::Parse,
            CompileError::Sema(_) => ErrorKind::Sema,
            CompileError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(e) => Some(e.span),
            CompileError::Parse(e) => Some(e.span),
            CompileError::Sema(e) => Some(e.span()),
            CompileError::Internal(e) => e.span(),
        }
    }

    /// Codegen errors mean the analyzer let something through
    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::Internal(_))
    }

    pub fn format_with_source(&self, source: &str) -> String {
        self.format_with_source_and_file(source, None)
    }

    pub fn format_with_source_and_file(&self, source: &str, filename: Option<&str>) -> String {
        match self {
            CompileError::Lex(e) => e.format_with_source_and_file(source, filename),
            CompileError::Parse(e) => e.format_with_source_and_file(source, filename),
            CompileError::Sema(e) => e.format_with_source_and_file(source, filename),
            CompileError::Internal(e) => match e.span() {
                Some(span) => format!(
                    "error: internal compiler error\n{}",
                    span.format_error_context(source, filename, &e.to_string())
                ),
                None => format!("error: internal compiler error: {}", e),
            },
        }
    }
}

/// Run the whole pipeline over `source`
pub fn compile(source: &str, config: &CodegenConfig) -> Result<Assembly, CompileError> {
    let tokens = lex(source)?;
    let mut program = Parser::parse(&tokens)?;
    let info = analyze(&mut program)?;
    Ok(generate(&program, &info, config)?)
}
