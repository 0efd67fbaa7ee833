//! Statement parsing

use crate::ast::{Block, Spanned, Stmt};
use crate::lexer::TokenKind;

use super::Parser;
use super::error::ParseResult;

impl Parser<'_> {
    /// Parse a statement
    pub(super) fn parse_stmt(&mut self) -> ParseResult<Spanned<Stmt>> {
        match self.peek() {
            TokenKind::Let => self.terminated(Self::parse_let),
            TokenKind::Identifier => self.parse_ident_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Print => self.terminated(|p| {
                p.advance();
                Ok(Stmt::Print(p.parse_expr()?))
            }),
            TokenKind::Delay => self.terminated(|p| {
                p.advance();
                Ok(Stmt::Delay(p.parse_expr()?))
            }),
            TokenKind::Write => self.terminated(Self::parse_write),
            TokenKind::WriteBox => self.terminated(Self::parse_write_box),
            TokenKind::If => self.compound(Self::parse_if_stmt),
            TokenKind::While => self.compound(Self::parse_while_stmt),
            TokenKind::For => self.compound(Self::parse_for_stmt),
            TokenKind::Fun => self.compound(|p| Ok(Stmt::Function(Box::new(p.parse_function()?)))),
            TokenKind::LBrace => self.compound(|p| Ok(Stmt::Block(p.parse_block()?))),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Run a simple statement production and require its closing `;`
    fn terminated(
        &mut self,
        production: impl FnOnce(&mut Self) -> ParseResult<Stmt>,
    ) -> ParseResult<Spanned<Stmt>> {
        let start = self.current_span();
        let stmt = production(self)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Spanned::new(stmt, start.merge(self.previous_span())))
    }

    /// Run a brace-terminated production; one stray `;` after it is dropped
    fn compound(
        &mut self,
        production: impl FnOnce(&mut Self) -> ParseResult<Stmt>,
    ) -> ParseResult<Spanned<Stmt>> {
        let start = self.current_span();
        let stmt = production(self)?;
        let span = start.merge(self.previous_span());
        self.eat(TokenKind::Semicolon);
        Ok(Spanned::new(stmt, span))
    }

    /// `let name : type [= expr]`, without the terminator
    fn parse_let(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Let)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.expect_type()?;

        if self.eat(TokenKind::Assign) {
            let value = self.parse_expr()?;
            Ok(Stmt::Assignment { name, ty, value })
        } else {
            Ok(Stmt::Declaration { name, ty })
        }
    }

    /// `name = expr`, without the terminator
    fn parse_reassignment(&mut self) -> ParseResult<Stmt> {
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Stmt::Reassignment { name, value })
    }

    /// Reassignment or call statement. Both start with an identifier; the
    /// token after it decides, and a call rewinds to re-read the name.
    fn parse_ident_stmt(&mut self) -> ParseResult<Spanned<Stmt>> {
        let mark = self.checkpoint();
        self.expect_ident()?;
        let is_call = self.check(TokenKind::LParen);
        self.restore(mark);

        if is_call {
            self.terminated(|p| Ok(Stmt::Call(p.parse_call()?)))
        } else {
            self.terminated(Self::parse_reassignment)
        }
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Spanned<Stmt>> {
        self.terminated(|p| {
            p.expect(TokenKind::Return)?;
            if p.check(TokenKind::Semicolon) {
                Ok(Stmt::Return(None))
            } else {
                Ok(Stmt::Return(Some(p.parse_expr()?)))
            }
        })
    }

    fn parse_write(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Write)?;
        let x = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let colour = self.parse_expr()?;
        Ok(Stmt::Write { x, y, colour })
    }

    fn parse_write_box(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::WriteBox)?;
        let x = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let width = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let height = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let colour = self.parse_expr()?;
        Ok(Stmt::WriteBox {
            x,
            y,
            width,
            height,
            colour,
        })
    }

    /// `( expr )`
    fn parse_condition(&mut self) -> ParseResult<crate::ast::Expr> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// `for ( [init] ; condition ; [step] ) block`
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = match self.peek() {
            TokenKind::Semicolon => None,
            TokenKind::Let => Some(self.spanned(Self::parse_let)?),
            _ => Some(self.spanned(Self::parse_reassignment)?),
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        let step = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.spanned(Self::parse_reassignment)?)
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(Stmt::For {
            init: init.map(Box::new),
            condition,
            step: step.map(Box::new),
            body,
        })
    }

    fn spanned(
        &mut self,
        production: impl FnOnce(&mut Self) -> ParseResult<Stmt>,
    ) -> ParseResult<Spanned<Stmt>> {
        let start = self.current_span();
        let stmt = production(self)?;
        Ok(Spanned::new(stmt, start.merge(self.previous_span())))
    }

    /// Parse a `{ ... }` block
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.current_span();
        self.expect(TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.check(TokenKind::Eof) {
                return Err(self.unexpected(TokenKind::RBrace.describe()));
            }
            stmts.push(self.parse_stmt()?);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Block::new(stmts, start.merge(self.previous_span())))
    }
}
