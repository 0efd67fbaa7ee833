//! Program and function definition parsing

use crate::ast::{Block, FunctionDef, Param, Program, Span};
use crate::lexer::TokenKind;

use super::Parser;
use super::error::ParseResult;

impl Parser<'_> {
    /// Parse the whole token stream as the program block
    pub(super) fn parse_program(&mut self) -> ParseResult<Program> {
        let start = self.current_span();
        let mut stmts = Vec::new();

        while !self.check(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }

        let span = if stmts.is_empty() {
            Span::new(start.start, start.start)
        } else {
            start.merge(self.previous_span())
        };
        Ok(Program::new(Block::new(stmts, span)))
    }

    /// `fun name ( params ) [-> type] block`
    pub(super) fn parse_function(&mut self) -> ParseResult<FunctionDef> {
        self.expect(TokenKind::Fun)?;
        let name = self.expect_ident()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let return_type = if self.eat(TokenKind::Arrow) {
            Some(self.expect_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        log::trace!("parsed function '{}' ({} params)", name.node, params.len());

        Ok(FunctionDef {
            name,
            params,
            return_type,
            body,
        })
    }

    /// Comma separated `name : type` list, possibly empty
    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.expect_type()?;
            params.push(Param { name, ty });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }
}
