//! Parser for the pixel language
//!
//! A predictive recursive descent parser that builds an AST from tokens.
//! The cursor only moves forward except through [`Parser::restore`], which
//! rewinds to a checkpoint taken at most [`MAX_REWIND`] tokens earlier.

mod error;
mod expr;
mod item;
mod stmt;

pub use error::{ParseError, ParseErrorKind, ParseResult};

use crate::ast::{Program, Span, Spanned, Type};
use crate::lexer::{Token, TokenKind};

/// How far back a checkpoint may rewind the cursor
pub const MAX_REWIND: usize = 2;

/// A saved cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The parser: a read-only token slice and one cursor
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse a complete program
    pub fn parse(tokens: &'a [Token]) -> ParseResult<Program> {
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program()?;
        log::debug!(
            "parsed {} top-level statements",
            program.block.stmts.len()
        );
        Ok(program)
    }

    // === Token navigation ===

    /// Kind of the current token; `Eof` once the slice is exhausted
    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn check(&self, expected: TokenKind) -> bool {
        self.peek() == expected
    }

    /// Consume the current token if it matches
    fn eat(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewind to a checkpoint taken a few tokens ago
    fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.pos && self.pos - checkpoint.0 <= MAX_REWIND);
        self.pos = checkpoint.0;
    }

    /// Expect a specific token or return an error
    fn expect(&mut self, expected: TokenKind) -> ParseResult<&'a Token> {
        match self.current() {
            Some(token) if token.kind == expected => {
                self.advance();
                Ok(token)
            }
            _ => Err(self.unexpected(expected.describe())),
        }
    }

    /// Expect an identifier and return it
    fn expect_ident(&mut self) -> ParseResult<Spanned<String>> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Spanned::new(token.lexeme.clone(), token.span))
    }

    /// Expect a type name and resolve it
    fn expect_type(&mut self) -> ParseResult<Spanned<Type>> {
        let token = self.expect(TokenKind::TypeName)?;
        Type::from_keyword(&token.lexeme)
            .map(|ty| Spanned::new(ty, token.span))
            .ok_or_else(|| ParseError::new(token.span, ParseErrorKind::InvalidType(token.lexeme.clone())))
    }

    /// Build an "expected X, found Y" error at the current token
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let span = self.current_span();
        match self.current() {
            Some(token) if token.kind != TokenKind::Eof => {
                ParseError::unexpected_token(span, expected, token.kind, token.lexeme.clone())
            }
            _ => ParseError::unexpected_eof(span, expected),
        }
    }

    /// Get the span of the current token
    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_else(|| {
                self.tokens
                    .last()
                    .map(|t| Span::new(t.span.end, t.span.end))
                    .unwrap_or_default()
            })
    }

    /// Get the span of the previous token
    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::default()
        }
    }
}
