//! Precedence-climbing parser.
//!
//! Binding from loosest to tightest: `+ -`, `* / %`, prefix `-`/`+`, `^`.
//! `^` is right-associative, so `2^3^2` is `2^(3^2)` and `-2^2` is `-(2^2)`.

use std::f64::consts::{E, PI};

use crate::ast::{BinOp, Expr, Func};
use crate::error::CalcError;
use crate::token::{Token, TokenKind, tokenize};

const PREFIX_PRECEDENCE: u8 = 3;

/// Deepest tree the parser will build, counting both nesting and operator
/// chains. Evaluation recurses once per level.
pub const MAX_DEPTH: usize = 512;

/// Parse `input` into an expression tree.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser { tokens: &tokens, pos: 0, depth: 0 };
    let expr = parser.parse_expr(0)?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(unexpected(tok)),
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), CalcError> {
        match self.bump() {
            Some(tok) if tok.kind == *kind => Ok(()),
            Some(tok) => Err(unexpected(tok)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    /// Account for one more level of tree depth.
    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let at = self
                .peek()
                .or_else(|| self.tokens.last())
                .map_or(0, |t| t.span.start);
            return Err(CalcError::TooDeep { at });
        }
        Ok(())
    }

    fn parse_expr(&mut self, min_prec: u8) -> Result<Expr, CalcError> {
        let entry = self.depth;
        let result = self.parse_expr_at(min_prec);
        self.depth = entry;
        result
    }

    fn parse_expr_at(&mut self, min_prec: u8) -> Result<Expr, CalcError> {
        self.descend()?;
        let mut lhs = self.parse_prefix()?;

        while let Some(op) = self.peek().and_then(|t| binop(&t.kind)) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.descend()?;
            self.pos += 1;
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let rhs = self.parse_expr(next_min)?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, CalcError> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                let operand = self.parse_expr(PREFIX_PRECEDENCE)?;
                Ok(Expr::Neg(Box::new(operand)))
            },
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.parse_expr(PREFIX_PRECEDENCE)
            },
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, CalcError> {
        let tok = self.bump().ok_or(CalcError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Num(n)),
            TokenKind::LParen => {
                let inner = self.parse_expr(0)?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            },
            TokenKind::Ident(ref name) => match name.as_str() {
                "pi" => Ok(Expr::Num(PI)),
                "e" => Ok(Expr::Num(E)),
                other => {
                    let func = Func::from_name(other).ok_or_else(|| {
                        CalcError::UnknownIdentifier { name: other.to_owned(), at: tok.span.start }
                    })?;
                    self.expect(&TokenKind::LParen)?;
                    let arg = self.parse_expr(0)?;
                    self.expect(&TokenKind::RParen)?;
                    Ok(Expr::UnaryFn { func, arg: Box::new(arg) })
                },
            },
            _ => Err(unexpected(tok)),
        }
    }
}

fn binop(kind: &TokenKind) -> Option<BinOp> {
    Some(match *kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Rem,
        TokenKind::Caret => BinOp::Pow,
        _ => return None,
    })
}

fn unexpected(tok: &Token) -> CalcError {
    CalcError::UnexpectedToken { found: tok.kind.to_string(), at: tok.span.start }
}
