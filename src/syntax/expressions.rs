//! Expression parsing.
//!
//! Recursive descent with one iterative precedence level per binding
//! strength, lowest first:
//!
//! ```text
//! expression = term (('+' | '-') term)*
//! term       = unary (('*' | '/') unary)*
//! unary      = ('-' | '+') unary | primary
//! primary    = INT | FLOAT | STRING | NAME | '(' expression ')'
//! ```
//!
//! Binary levels fold left-to-right in a loop, so operator chains are
//! left-associative and never recurse on the left operand: `1-2-3` builds
//! `(- (- 1 2) 3)`. Unary operators recurse on themselves, so `--1` and
//! `-+1` are chains of unary nodes. The parser only builds trees; it never
//! evaluates.

use crate::syntax::ast::{BinOp, Expr, UnOp};
use crate::syntax::lexer::TokenKind;
use crate::syntax::parse::{ParseError, Parser};

impl Parser<'_, '_> {
    /// Parse an expression (top-level entry point).
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = if self.is_punct('+') {
                BinOp::Add
            } else if self.is_punct('-') {
                BinOp::Sub
            } else {
                break;
            };
            self.advance()?;

            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse a multiplicative chain.
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.is_punct('*') {
                BinOp::Mul
            } else if self.is_punct('/') {
                BinOp::Div
            } else {
                break;
            };
            self.advance()?;

            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse prefix `-`/`+`, each recursing into another unary.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_punct('-')? {
            let operand = self.parse_unary()?;
            Ok(Expr::unary(UnOp::Neg, operand))
        } else if self.match_punct('+')? {
            let operand = self.parse_unary()?;
            Ok(Expr::unary(UnOp::Plus, operand))
        } else {
            self.parse_primary()
        }
    }

    /// Parse a literal, a name, or a parenthesized expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_kind() {
            TokenKind::Int { value, .. } => {
                self.advance()?;
                Ok(Expr::int(value))
            }
            TokenKind::Float { value } => {
                self.advance()?;
                Ok(Expr::float(value))
            }
            TokenKind::Str { value } => {
                self.advance()?;
                Ok(Expr::str(value))
            }
            TokenKind::Name { name } => {
                self.advance()?;
                Ok(Expr::name(name))
            }
            TokenKind::Punct('(') => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect_punct(')')?;
                Ok(expr)
            }
            other => Err(self.error(format!("Expected expression, found {}", other))),
        }
    }
}
