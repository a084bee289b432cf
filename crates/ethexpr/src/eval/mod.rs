//! Attribute library: compiling expressions into evaluators
//!
//! Each production has a constructor that takes its already-compiled
//! children and returns a [`Node`]. [`compile`] walks an [`Expr`] bottom-up
//! and calls the matching constructor.

pub mod binary;
pub mod call;
pub mod field;
pub mod index;
pub mod literal;
pub mod path;
pub mod unary;

use std::fmt;

use tracing::trace;

use crate::ast::{boolean_keyword, BinaryOp, Expr};
use crate::error::ParseError;
use crate::{Context, EvalConfig, Result, Value};

/// Trait for compiled expression nodes.
///
/// This is the core abstraction of the evaluator: every production
/// compiles to a value implementing this trait. Nodes own their children,
/// hold no mutable state, and may be evaluated any number of times from
/// any thread.
pub trait Evaluate: fmt::Debug + Send + Sync {
    /// Evaluate this node against the given context.
    fn eval(&self, ctx: &Context) -> Result<Value>;
}

/// An owned, compiled node.
pub type Node = Box<dyn Evaluate>;

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Compiler
// ═══════════════════════════════════════════════════════════════════════

/// Compile an expression tree into a node tree.
///
/// # Errors
///
/// Fails with `Parse` when the tree is taller than
/// [`EvalConfig::max_depth`], and on literals that cannot be represented
/// (`InvalidNumericLiteral`, `ExponentOverflow`).
pub fn compile(expr: &Expr, config: &EvalConfig) -> Result<Node> {
    check_depth(expr, config.max_depth)?;
    compile_node(expr, config)
}

/// Reject trees taller than `limit`.
pub fn check_depth(expr: &Expr, limit: usize) -> Result<()> {
    let depth = expr.depth();
    if depth > limit {
        trace!(depth, limit, "expression tree too tall");
        return Err(ParseError::too_deep(limit).into());
    }
    Ok(())
}

fn compile_node(expr: &Expr, config: &EvalConfig) -> Result<Node> {
    match expr {
        Expr::Number(text) => literal::num(text),
        Expr::Scientific { mantissa, exponent } => {
            literal::scientific(mantissa, exponent, config.max_exponent)
        }
        Expr::Unit { value, unit } => Ok(literal::unit(compile_node(value, config)?, *unit)),
        Expr::Negate(operand) => Ok(literal::negnum(compile_node(operand, config)?)),
        Expr::Str(raw) => Ok(literal::str(raw)),
        Expr::Bool(b) => Ok(literal::boolean(*b)),

        // A grammar that skipped the reserved-word check still gets the
        // boolean literal.
        Expr::Variable(name) => match path::variable(name, config.unbound) {
            Some(node) => Ok(node),
            None => Ok(literal::boolean(boolean_keyword(name) == Some(true))),
        },

        Expr::Binary { op, left, right } => {
            let left = compile_node(left, config)?;
            let right = compile_node(right, config)?;
            Ok(binary_attribute(*op)(left, right))
        }

        Expr::Not(operand) => Ok(unary::neg(compile_node(operand, config)?)),

        Expr::Index { target, index } => Ok(index::indexer(
            compile_node(target, config)?,
            compile_node(index, config)?,
        )),

        Expr::Member { target, name } => Ok(field::get(
            compile_node(target, config)?,
            path::name(name),
            config.unbound,
        )),

        Expr::Call { callee, args } => {
            let callee = compile_node(callee, config)?;
            if args.is_empty() {
                return Ok(call::callable(callee));
            }
            let params = args
                .iter()
                .map(|arg| compile_node(arg, config))
                .collect::<Result<Vec<_>>>()?;
            Ok(call::callable_with_params(callee, params))
        }
    }
}

/// The attribute constructor for a binary operator.
fn binary_attribute(op: BinaryOp) -> fn(Node, Node) -> Node {
    match op {
        BinaryOp::Add => binary::add,
        BinaryOp::Sub => binary::sub,
        BinaryOp::Mul => binary::mul,
        BinaryOp::Div => binary::div,
        BinaryOp::And => binary::and,
        BinaryOp::Or => binary::or,
        BinaryOp::Eq => binary::eq,
        BinaryOp::Ne => binary::neq,
        BinaryOp::Lt => binary::lt,
        BinaryOp::Le => binary::lte,
        BinaryOp::Gt => binary::gt,
        BinaryOp::Ge => binary::gte,
    }
}
