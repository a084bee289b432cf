//! Typed expression tree produced by a grammar
//!
//! One variant per production, with named children. The attribute library
//! in [`crate::eval`] compiles these nodes into evaluators.

use std::fmt;

use crate::numeric::Unit;

/// Binary operators, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `&&` (both sides always evaluated)
    And,
    /// `||` (both sides always evaluated)
    Or,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl BinaryOp {
    /// Operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Decimal or `0x` hex integer literal, as written
    Number(String),

    /// `<mantissa>e<exponent>`
    Scientific {
        /// Digits before the `e`
        mantissa: String,
        /// Digits after the `e`
        exponent: String,
    },

    /// Numeric literal followed by `ether`, `gwei` or `wei`
    Unit {
        /// The scaled literal
        value: Box<Expr>,
        /// The suffix
        unit: Unit,
    },

    /// `-operand`
    Negate(Box<Expr>),

    /// Quoted string literal, including its quotes
    Str(String),

    /// `true` / `false`
    Bool(bool),

    /// Context lookup
    Variable(String),

    /// `left op right`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// `!operand`
    Not(Box<Expr>),

    /// `target[index]`
    Index {
        /// Indexed value
        target: Box<Expr>,
        /// Index expression
        index: Box<Expr>,
    },

    /// `target.name`
    Member {
        /// Accessed value
        target: Box<Expr>,
        /// Property name
        name: String,
    },

    /// `callee(args...)`
    Call {
        /// Called value
        callee: Box<Expr>,
        /// Arguments, in source order
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Build a variable reference, declining reserved boolean words.
    ///
    /// `true` and `false` (in any case) never name a variable; `None` tells
    /// the grammar to use the boolean literal production instead.
    pub fn variable(name: impl Into<String>) -> Option<Expr> {
        let name = name.into();
        if boolean_keyword(&name).is_some() {
            return None;
        }
        Some(Expr::Variable(name))
    }

    /// Build a binary node.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nesting depth: zero for a leaf, one more than the deepest child
    /// otherwise.
    ///
    /// Walks the tree with an explicit stack, so it is safe on trees of
    /// any height.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            expr.for_each_child(|child| pending.push((child, depth + 1)));
        }
        deepest
    }

    fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a Expr)) {
        match self {
            Expr::Unit { value: child, .. }
            | Expr::Negate(child)
            | Expr::Not(child)
            | Expr::Member { target: child, .. } => f(child),
            Expr::Binary { left, right, .. }
            | Expr::Index {
                target: left,
                index: right,
            } => {
                f(left);
                f(right);
            }
            Expr::Call { callee, args } => {
                f(callee);
                for arg in args {
                    f(arg);
                }
            }
            Expr::Number(_)
            | Expr::Scientific { .. }
            | Expr::Str(_)
            | Expr::Bool(_)
            | Expr::Variable(_) => {}
        }
    }

    /// Move every child out, leaving leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Unit { value: child, .. }
            | Expr::Negate(child)
            | Expr::Not(child)
            | Expr::Member { target: child, .. } => out.push(detach(child)),
            Expr::Binary { left, right, .. }
            | Expr::Index {
                target: left,
                index: right,
            } => {
                out.push(detach(left));
                out.push(detach(right));
            }
            Expr::Call { callee, args } => {
                out.push(detach(callee));
                out.append(args);
            }
            Expr::Number(_)
            | Expr::Scientific { .. }
            | Expr::Str(_)
            | Expr::Bool(_)
            | Expr::Variable(_) => {}
        }
    }
}

fn detach(slot: &mut Box<Expr>) -> Expr {
    std::mem::replace(&mut **slot, Expr::Bool(false))
}

// Trees handed over by a grammar can be arbitrarily tall; tear them down
// with a heap stack instead of recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// The boolean a reserved word stands for, matched case-insensitively.
pub fn boolean_keyword(word: &str) -> Option<bool> {
    if word.eq_ignore_ascii_case("true") {
        Some(true)
    } else if word.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_declines_boolean_words() {
        assert_eq!(Expr::variable("true"), None);
        assert_eq!(Expr::variable("FALSE"), None);
        assert_eq!(Expr::variable("True"), None);
        assert_eq!(
            Expr::variable("truthy"),
            Some(Expr::Variable("truthy".to_string()))
        );
    }

    #[test]
    fn test_boolean_keyword() {
        assert_eq!(boolean_keyword("tRuE"), Some(true));
        assert_eq!(boolean_keyword("false"), Some(false));
        assert_eq!(boolean_keyword("f"), None);
    }

    fn leaf() -> Expr {
        Expr::Number("1".to_string())
    }

    #[test]
    fn test_depth() {
        assert_eq!(leaf().depth(), 0);
        assert_eq!(Expr::Not(Box::new(leaf())).depth(), 1);

        let call = Expr::Call {
            callee: Box::new(Expr::Variable("f".to_string())),
            args: vec![
                leaf(),
                Expr::binary(BinaryOp::Add, leaf(), Expr::Not(Box::new(leaf()))),
            ],
        };
        assert_eq!(call.depth(), 3);
    }

    #[test]
    fn test_tall_tree_depth_and_drop() {
        let mut tall = leaf();
        for _ in 0..200_000 {
            tall = Expr::Not(Box::new(tall));
        }
        assert_eq!(tall.depth(), 200_000);
        drop(tall);
    }

    #[test]
    fn test_op_symbols() {
        assert_eq!(BinaryOp::Le.to_string(), "<=");
        assert_eq!(BinaryOp::And.symbol(), "&&");
    }
}
