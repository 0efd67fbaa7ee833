//! Expression parsing
//!
//! Four precedence layers, loosest first: relational, additive,
//! multiplicative, unary. Every binary layer folds to the left.

use crate::ast::{BinaryOp, Call, Expr, ExprKind, Literal, Span, UnaryOp};
use crate::lexer::{Token, TokenKind};

use super::Parser;
use super::error::{ParseError, ParseErrorKind, ParseResult};

impl Parser<'_> {
    /// Parse an expression (relational layer)
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_simple_expr()?;
        while self.peek().is_relational_op() {
            let op = relational_op(self.peek());
            self.advance();
            let rhs = self.parse_simple_expr()?;
            lhs = Expr::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    /// Additive layer: `+`, `-`, `or`
    fn parse_simple_expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_term()?;
        while self.peek().is_additive_op() {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => BinaryOp::Or,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    /// Multiplicative layer: `*`, `/`, `%`, `and`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_factor()?;
        while self.peek().is_multiplicative_op() {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => BinaryOp::And,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Expr::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    /// Unary operators and atoms
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();

        match self.peek() {
            TokenKind::Minus => {
                self.advance();
                if self.check(TokenKind::IntLiteral) {
                    return self.parse_negative_integer(start);
                }
                let operand = self.parse_factor()?;
                let span = start.merge(operand.span);
                Ok(Expr::unary(UnaryOp::Neg, operand, span))
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_factor()?;
                let span = start.merge(operand.span);
                Ok(Expr::unary(UnaryOp::Not, operand, span))
            }

            TokenKind::LParen => {
                self.advance();
                let mut inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                inner.span = start.merge(self.previous_span());
                Ok(inner)
            }

            kind if kind.is_literal() => {
                let token = self.expect(kind)?;
                let literal = convert_literal(token)?;
                Ok(Expr::literal(literal, token.span))
            }

            TokenKind::Identifier => self.parse_ident_atom(),

            TokenKind::Width => {
                self.advance();
                Ok(Expr::new(ExprKind::Width, start))
            }
            TokenKind::Height => {
                self.advance();
                Ok(Expr::new(ExprKind::Height, start))
            }
            TokenKind::RandomInt => {
                self.advance();
                let bound = self.parse_factor()?;
                let span = start.merge(bound.span);
                Ok(Expr::new(ExprKind::RandomInt(Box::new(bound)), span))
            }
            TokenKind::Read => {
                self.advance();
                let x = self.parse_expr()?;
                self.expect(TokenKind::Comma)?;
                let y = self.parse_expr()?;
                let span = start.merge(y.span);
                Ok(Expr::new(
                    ExprKind::Read {
                        x: Box::new(x),
                        y: Box::new(y),
                    },
                    span,
                ))
            }

            _ => Err(self.unexpected("expression")),
        }
    }

    /// Variable reference or call. The identifier is consumed first and the
    /// cursor rewound when a `(` shows this is a call.
    fn parse_ident_atom(&mut self) -> ParseResult<Expr> {
        let mark = self.checkpoint();
        let name = self.expect_ident()?;
        if self.check(TokenKind::LParen) {
            self.restore(mark);
            let call = self.parse_call()?;
            let span = call.function.span.merge(self.previous_span());
            return Ok(Expr::new(ExprKind::Call(call), span));
        }
        Ok(Expr::new(ExprKind::Variable(name.node), name.span))
    }

    /// `name ( [args] )`
    pub(super) fn parse_call(&mut self) -> ParseResult<Call> {
        let function = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let args = self.parse_args()?;
        self.expect(TokenKind::RParen)?;
        Ok(Call { function, args })
    }

    /// Comma separated actual parameters, possibly none
    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }
}

impl Parser<'_> {
    /// `-` directly before an integer literal folds into the literal, so the
    /// range check sees the signed value and `i64::MIN` is writable
    fn parse_negative_integer(&mut self, start: Span) -> ParseResult<Expr> {
        let token = self.expect(TokenKind::IntLiteral)?;
        let span = start.merge(token.span);
        let value = format!("-{}", token.lexeme).parse::<i64>().map_err(|_| {
            ParseError::new(span, ParseErrorKind::InvalidLiteral(format!("-{}", token.lexeme)))
        })?;
        Ok(Expr::literal(Literal::Integer(value), span))
    }
}

fn relational_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::LessEq => BinaryOp::Le,
        TokenKind::GreaterEq => BinaryOp::Ge,
        TokenKind::EqEq => BinaryOp::Eq,
        _ => BinaryOp::Ne,
    }
}

/// Turn a literal token's lexeme into its value
fn convert_literal(token: &Token) -> ParseResult<Literal> {
    let invalid = || {
        ParseError::new(
            token.span,
            ParseErrorKind::InvalidLiteral(token.lexeme.clone()),
        )
    };

    match token.kind {
        TokenKind::IntLiteral => token
            .lexeme
            .parse::<i64>()
            .map(Literal::Integer)
            .map_err(|_| invalid()),
        TokenKind::FloatLiteral => token
            .lexeme
            .parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| invalid()),
        TokenKind::BoolLiteral => Ok(Literal::Bool(token.lexeme == "true")),
        TokenKind::ColourLiteral => token
            .lexeme
            .strip_prefix('#')
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .map(Literal::Colour)
            .ok_or_else(invalid),
        TokenKind::StringLiteral => {
            let body = token
                .lexeme
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .ok_or_else(invalid)?;
            Ok(Literal::String(unescape_string(body)))
        }
        _ => Err(invalid()),
    }
}

/// Process escape sequences in a string literal
fn unescape_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}
