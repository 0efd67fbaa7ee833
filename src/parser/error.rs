//! Syntax error types for the parser

use crate::ast::Span;
use crate::lexer::TokenKind;

/// A syntax error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
}

/// The kind of syntax error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A required token is missing or a different one was found
    #[error("expected {expected}, found {}", describe_found(.found, .lexeme))]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        lexeme: String,
    },
    /// Input ended while a production was still open
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    /// Numeric or colour literal that does not fit its type
    #[error("invalid literal: {0}")]
    InvalidLiteral(String),
    /// Type keyword the language does not define
    #[error("invalid type: {0}")]
    InvalidType(String),
}

fn describe_found(found: &TokenKind, lexeme: &str) -> String {
    match *found {
        TokenKind::Identifier => format!("identifier '{}'", lexeme),
        kind if kind.is_literal() => format!("{} {}", kind.describe(), lexeme),
        TokenKind::TypeName => format!("type '{}'", lexeme),
        kind => kind.describe().to_string(),
    }
}

impl ParseError {
    pub fn new(span: Span, kind: ParseErrorKind) -> Self {
        Self { span, kind }
    }

    pub fn unexpected_token(
        span: Span,
        expected: impl Into<String>,
        found: TokenKind,
        lexeme: impl Into<String>,
    ) -> Self {
        Self::new(
            span,
            ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found,
                lexeme: lexeme.into(),
            },
        )
    }

    pub fn unexpected_eof(span: Span, expected: impl Into<String>) -> Self {
        Self::new(
            span,
            ParseErrorKind::UnexpectedEof {
                expected: expected.into(),
            },
        )
    }

    /// Format error with source code context (line:col instead of byte offsets)
    pub fn format_with_source(&self, source: &str) -> String {
        self.format_with_source_and_file(source, None)
    }

    pub fn format_with_source_and_file(&self, source: &str, filename: Option<&str>) -> String {
        let msg = self.kind.to_string();
        format!(
            "error: syntax error\n{}",
            self.span.format_error_context(source, filename, &msg)
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
