//! The built-in expression grammar
//!
//! A precedence-climbing parser over the token stream from
//! [`lexer`](super::lexer). Precedence, lowest first:
//!
//! | Level          | Operators                  |
//! |----------------|----------------------------|
//! | or             | `\|\|`                     |
//! | and            | `&&`                       |
//! | comparison     | `== != < <= > >=`          |
//! | additive       | `+ -`                      |
//! | multiplicative | `* /`                      |
//! | prefix         | `! -`                      |
//! | postfix        | `.name` `[index]` `(args)` |
//!
//! All binary operators are left-associative. Every nesting step (an
//! operand in a chain, a prefix, a postfix, a parenthesized group) counts
//! toward [`EvalConfig::max_depth`].

use tracing::trace;

use crate::ast::{boolean_keyword, BinaryOp, Expr};
use crate::error::ParseError;
use crate::flatten::ParseNode;
use crate::frontend::Grammar;
use crate::numeric::Unit;
use crate::EvalConfig;

use super::lexer::{lex, Spanned, Token};

/// The standard expression grammar.
///
/// # Example
///
/// ```
/// use ethexpr::{EvalConfig, ExpressionGrammar, Grammar};
///
/// let mut grammar = ExpressionGrammar::new(&EvalConfig::default());
/// let forest = grammar.feed("1 ether + fee").unwrap();
/// assert_eq!(forest.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionGrammar {
    max_depth: usize,
}

impl ExpressionGrammar {
    /// Create a grammar honoring the nesting limit in `config`.
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            max_depth: config.max_depth,
        }
    }

    /// Parse `source` into a single expression tree.
    pub fn parse_expr(&self, source: &str) -> Result<Expr, ParseError> {
        let tokens = lex(source)?;
        trace!(tokens = tokens.len(), "lexed expression");

        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
            depth: 0,
            max_depth: self.max_depth,
        };
        let expr = parser.parse_binary(Level::Or)?;

        if let Some(tok) = parser.peek() {
            return Err(parser.error_at(
                format!("unexpected {} after expression", tok.token),
                tok.span.start,
            ));
        }
        Ok(expr)
    }
}

impl Default for ExpressionGrammar {
    fn default() -> Self {
        Self::new(&EvalConfig::default())
    }
}

impl Grammar for ExpressionGrammar {
    fn feed(&mut self, source: &str) -> Result<Vec<ParseNode<Expr>>, ParseError> {
        Ok(vec![ParseNode::leaf(self.parse_expr(source)?)])
    }

    fn name(&self) -> &str {
        "expression"
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Precedence Levels
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Or,
    And,
    Comparison,
    Additive,
    Multiplicative,
}

impl Level {
    /// The next tighter level; `None` below multiplicative means prefix.
    fn tighter(self) -> Option<Level> {
        match self {
            Level::Or => Some(Level::And),
            Level::And => Some(Level::Comparison),
            Level::Comparison => Some(Level::Additive),
            Level::Additive => Some(Level::Multiplicative),
            Level::Multiplicative => None,
        }
    }

    fn operator(self, token: Token) -> Option<BinaryOp> {
        let op = match (self, token) {
            (Level::Or, Token::OrOr) => BinaryOp::Or,
            (Level::And, Token::AndAnd) => BinaryOp::And,
            (Level::Comparison, Token::EqEq) => BinaryOp::Eq,
            (Level::Comparison, Token::NotEq) => BinaryOp::Ne,
            (Level::Comparison, Token::Lt) => BinaryOp::Lt,
            (Level::Comparison, Token::LtEq) => BinaryOp::Le,
            (Level::Comparison, Token::Gt) => BinaryOp::Gt,
            (Level::Comparison, Token::GtEq) => BinaryOp::Ge,
            (Level::Additive, Token::Plus) => BinaryOp::Add,
            (Level::Additive, Token::Minus) => BinaryOp::Sub,
            (Level::Multiplicative, Token::Star) => BinaryOp::Mul,
            (Level::Multiplicative, Token::Slash) => BinaryOp::Div,
            _ => return None,
        };
        Some(op)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Parser
// ═══════════════════════════════════════════════════════════════════════

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|t| t.token)
    }

    fn advance(&mut self) -> Result<Spanned, ParseError> {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            None => Err(self.error_at("unexpected end of input", self.source.len())),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<Spanned, ParseError> {
        let tok = self.advance()?;
        if tok.token != expected {
            return Err(self.error_at(
                format!("expected {}, found {}", expected, tok.token),
                tok.span.start,
            ));
        }
        Ok(tok)
    }

    fn text(&self, tok: &Spanned) -> &'a str {
        &self.source[tok.span.clone()]
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.source.len(), |t| t.span.start)
    }

    fn error_at(&self, message: impl Into<String>, offset: usize) -> ParseError {
        ParseError::new(message).at_offset(self.source, offset)
    }

    /// Enter one nesting level.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(
                ParseError::too_deep(self.max_depth).at_offset(self.source, self.offset())
            );
        }
        Ok(())
    }

    fn ascend(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn parse_operand(&mut self, level: Level) -> Result<Expr, ParseError> {
        match level.tighter() {
            Some(next) => self.parse_binary(next),
            None => self.parse_unary(),
        }
    }

    fn parse_binary(&mut self, level: Level) -> Result<Expr, ParseError> {
        let mut left = self.parse_operand(level)?;
        let mut levels = 0;

        while let Some(op) = self.peek_token().and_then(|t| level.operator(t)) {
            self.pos += 1;
            self.descend()?;
            levels += 1;
            let right = self.parse_operand(level)?;
            left = Expr::binary(op, left, right);
        }

        self.ascend(levels);
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_token() {
            Some(Token::Bang) => {
                self.pos += 1;
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend(1);
                Ok(Expr::Not(Box::new(operand)))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend(1);
                Ok(Expr::Negate(Box::new(operand)))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        let mut levels = 0;

        loop {
            match self.peek_token() {
                Some(Token::Dot) => {
                    self.pos += 1;
                    self.descend()?;
                    let name = self.expect(Token::Ident)?;
                    expr = Expr::Member {
                        target: Box::new(expr),
                        name: self.text(&name).to_string(),
                    };
                }
                Some(Token::LBracket) => {
                    self.pos += 1;
                    self.descend()?;
                    let index = self.parse_binary(Level::Or)?;
                    self.expect(Token::RBracket)?;
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                Some(Token::LParen) => {
                    self.pos += 1;
                    self.descend()?;
                    let args = self.parse_args()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => break,
            }
            levels += 1;
        }

        self.ascend(levels);
        Ok(expr)
    }

    /// Comma-separated arguments up to and including the closing paren.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.peek_token() == Some(Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            args.push(self.parse_binary(Level::Or)?);
            let tok = self.advance()?;
            match tok.token {
                Token::Comma => continue,
                Token::RParen => return Ok(args),
                other => {
                    return Err(self.error_at(
                        format!("expected `,` or `)`, found {}", other),
                        tok.span.start,
                    ))
                }
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.advance()?;
        let text = self.text(&tok);

        match tok.token {
            Token::Decimal | Token::Hex => self.unit_suffix(Expr::Number(text.to_string())),

            Token::Scientific => {
                let split = text.find(['e', 'E']).unwrap_or(text.len());
                let literal = Expr::Scientific {
                    mantissa: text[..split].to_string(),
                    exponent: text[split + 1..].to_string(),
                };
                self.unit_suffix(literal)
            }

            Token::Str => Ok(Expr::Str(text.to_string())),

            // Reserved boolean words win over variable references
            Token::Ident => Ok(Expr::variable(text)
                .unwrap_or_else(|| Expr::Bool(boolean_keyword(text) == Some(true)))),

            Token::LParen => {
                self.descend()?;
                let inner = self.parse_binary(Level::Or)?;
                self.expect(Token::RParen)?;
                self.ascend(1);
                Ok(inner)
            }

            other => Err(self.error_at(format!("unexpected {}", other), tok.span.start)),
        }
    }

    /// Wrap a numeric literal in a unit if one follows.
    fn unit_suffix(&mut self, literal: Expr) -> Result<Expr, ParseError> {
        let unit = match self.peek() {
            Some(tok) if tok.token == Token::Ident => Unit::from_keyword(self.text(tok)),
            _ => None,
        };

        match unit {
            Some(unit) => {
                self.pos += 1;
                Ok(Expr::Unit {
                    value: Box::new(literal),
                    unit,
                })
            }
            None => Ok(literal),
        }
    }
}
