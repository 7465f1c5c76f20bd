//! Expression parsing: precedence climbing over the two binary levels.
//!
//! Shifts bind at multiplicative strength, so `2 << ord + 1` groups as
//! `(2 << ord) + 1`. All binary operators are left-associative; unary
//! minus binds tightest.

use crate::error::ParseError;
use crate::lexer::Token;
use crate::parse::Parser;
use ordo_ast::{BinOp, Expr, ExprKind, Literal, UnaryOp};

/// Precedence and operator for binary tokens; higher binds tighter.
fn binary_op_info(token: &Token) -> Option<(u8, BinOp)> {
    match token {
        Token::Plus => Some((10, BinOp::Add)),
        Token::Minus => Some((10, BinOp::Sub)),
        Token::Star => Some((20, BinOp::Mul)),
        Token::Slash => Some((20, BinOp::Div)),
        Token::Percent => Some((20, BinOp::Rem)),
        Token::Shl => Some((20, BinOp::Shl)),
        Token::Shr => Some((20, BinOp::Shr)),
        _ => None,
    }
}

impl Parser<'_, '_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_pratt(0)
    }

    fn parse_pratt(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        while let Some(token) = self.stream.peek() {
            let Some((prec, op)) = binary_op_info(token) else {
                break;
            };
            if prec < min_prec {
                break;
            }

            self.stream.advance();
            let rhs = self.parse_pratt(prec + 1)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if !self.stream.check(&Token::Minus) {
            return self.parse_atom();
        }

        let start = self.stream.pos();
        self.stream.advance();
        let operand = self.parse_prefix()?;
        let span = self.stream.span_from(start);
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let start = self.stream.pos();
        let span = self.stream.current_span();

        match self.stream.peek().cloned() {
            Some(Token::IntLit(text)) => {
                self.stream.advance();
                let value = decode_int(&text).ok_or(ParseError::IntOutOfRange {
                    span: span.into(),
                })?;
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Int(value)),
                    self.stream.span_from(start),
                ))
            }
            Some(Token::FloatLit(text)) => {
                self.stream.advance();
                let value = decode_float(&text).ok_or(ParseError::FloatOutOfRange {
                    span: span.into(),
                })?;
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Float(value)),
                    self.stream.span_from(start),
                ))
            }
            Some(Token::Ord) => {
                self.stream.advance();
                Ok(Expr::new(ExprKind::Ord, self.stream.span_from(start)))
            }
            Some(Token::Ident(name)) => {
                self.stream.advance();
                Ok(Expr::new(
                    ExprKind::Ident(self.interner.intern(&name)),
                    self.stream.span_from(start),
                ))
            }
            Some(Token::LParen) => {
                self.stream.advance();
                let expr = self.parse_expr()?;
                self.stream.expect(Token::RParen, "`)`")?;
                Ok(expr)
            }
            _ => Err(ParseError::unexpected(
                self.stream.peek(),
                "in expression",
                span,
            )),
        }
    }
}

/// Decode an integer literal, handling radix prefixes and `_` separators.
fn decode_int(text: &str) -> Option<i64> {
    let text = text.replace('_', "");
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(digits, 16).ok()
    } else if let Some(digits) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        i64::from_str_radix(digits, 8).ok()
    } else if let Some(digits) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        i64::from_str_radix(digits, 2).ok()
    } else {
        text.parse().ok()
    }
}

/// Decode a float literal. Overlarge exponents parse to infinity, which
/// constants reject.
fn decode_float(text: &str) -> Option<f64> {
    let value: f64 = text.replace('_', "").parse().ok()?;
    value.is_finite().then_some(value)
}
