//! Recursive-descent parser for template expressions.
//!
//! Precedence, loosest to tightest: ternary, equality/relational, logical
//! OR, logical AND, additive, multiplicative, unary. Equality binding
//! *looser* than `||` is deliberate; existing templates rely on that scan
//! order.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{TemplateError, TemplateResult};
use crate::lexer::{lex, Token};

pub struct ExprParser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
}

/// Parse one expression. The whole token stream must be consumed; trailing
/// tokens are a parse error so `foo bar` cannot silently evaluate as `foo`.
pub fn parse_expression(source: &str) -> TemplateResult<Expr> {
    let tokens = lex(source).map_err(|offset| TemplateError::Lex { offset })?;
    if tokens.is_empty() {
        return Err(TemplateError::parse("empty expression"));
    }
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.parse_ternary()?;
    if !parser.is_at_end() {
        return Err(TemplateError::parse(format!(
            "unexpected trailing token: {:?}",
            parser.peek()
        )));
    }
    Ok(expr)
}

impl<'src> ExprParser<'src> {
    fn parse_ternary(&mut self) -> TemplateResult<Expr> {
        let condition = self.parse_comparison()?;
        if self.eat(&Token::Question) {
            let then_branch = self.parse_ternary()?;
            self.expect(&Token::Colon)?;
            let else_branch = self.parse_ternary()?;
            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }
        Ok(condition)
    }

    fn parse_comparison(&mut self) -> TemplateResult<Expr> {
        let mut left = self.parse_or()?;
        loop {
            let op = match self.peek() {
                Some(Token::StrictEq) => BinaryOp::StrictEq,
                Some(Token::StrictNotEq) => BinaryOp::StrictNotEq,
                Some(Token::LooseEq) => BinaryOp::LooseEq,
                Some(Token::LooseNotEq) => BinaryOp::LooseNotEq,
                Some(Token::Gte) => BinaryOp::GreaterThanOrEqual,
                Some(Token::Lte) => BinaryOp::LessThanOrEqual,
                Some(Token::Gt) => BinaryOp::GreaterThan,
                Some(Token::Lt) => BinaryOp::LessThan,
                _ => break,
            };
            self.advance();
            let right = self.parse_or()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> TemplateResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::Or) {
            let right = self.parse_and()?;
            left = Expr::binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> TemplateResult<Expr> {
        let mut left = self.parse_additive()?;
        while self.eat(&Token::And) {
            let right = self.parse_additive()?;
            left = Expr::binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> TemplateResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> TemplateResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> TemplateResult<Expr> {
        if self.eat(&Token::Bang) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> TemplateResult<Expr> {
        match self.advance() {
            Some(Token::String(s)) | Some(Token::SingleQuoteString(s)) => {
                Ok(Expr::string(unescape(s)))
            }
            Some(Token::Number(n)) => Ok(Expr::number(n)),
            Some(Token::True) => Ok(Expr::Bool { value: true }),
            Some(Token::False) => Ok(Expr::Bool { value: false }),
            Some(Token::Ident(name)) => {
                let mut path = vec![name.to_string()];
                while self.eat(&Token::Dot) {
                    match self.advance() {
                        Some(Token::Ident(segment)) => path.push(segment.to_string()),
                        other => {
                            return Err(TemplateError::parse(format!(
                                "expected property name after '.', got {:?}",
                                other
                            )))
                        }
                    }
                }
                Ok(Expr::KeyRef { path })
            }
            Some(Token::LParen) => {
                let expr = self.parse_ternary()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            other => Err(TemplateError::parse(format!(
                "expected a value, got {:?}",
                other
            ))),
        }
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token<'src>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token<'src>) -> TemplateResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(TemplateError::parse(format!(
                "expected {:?}, got {:?}",
                expected,
                self.peek()
            )))
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
