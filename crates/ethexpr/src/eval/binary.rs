//! Binary operator attributes
//!
//! Both operands are always evaluated, left first, before the operator is
//! applied. That includes `&&` and `||`: host calls on either side run
//! regardless of the other side's value.

use std::cmp::Ordering;

use crate::ast::BinaryOp;
use crate::numeric::{self, is_truthy};
use crate::{Context, Result, Value};

use super::{Evaluate, Node};

/// A compiled binary operation.
#[derive(Debug)]
pub struct BinaryNode {
    op: BinaryOp,
    left: Node,
    right: Node,
}

impl Evaluate for BinaryNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        // Evaluate both operands
        let left = self.left.eval(ctx)?;
        let right = self.right.eval(ctx)?;
        apply(self.op, left, right)
    }
}

/// Apply `op` to two evaluated operands.
pub fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    match op {
        // Arithmetic
        BinaryOp::Add => numeric::add(left, right),
        BinaryOp::Sub => numeric::sub(left, right),
        BinaryOp::Mul => numeric::mul(&left, &right),
        BinaryOp::Div => numeric::div(&left, &right),

        // Logical (value-returning, not short-circuiting)
        BinaryOp::And => Ok(if is_truthy(&left) { right } else { left }),
        BinaryOp::Or => Ok(if is_truthy(&left) { left } else { right }),

        // Equality
        BinaryOp::Eq => numeric::equals(left, right).map(Value::Bool),
        BinaryOp::Ne => numeric::equals(left, right).map(|eq| Value::Bool(!eq)),

        // Ordering
        BinaryOp::Lt => ordered(op, left, right, |o| o == Ordering::Less),
        BinaryOp::Le => ordered(op, left, right, |o| o != Ordering::Greater),
        BinaryOp::Gt => ordered(op, left, right, |o| o == Ordering::Greater),
        BinaryOp::Ge => ordered(op, left, right, |o| o != Ordering::Less),
    }
}

fn ordered(
    op: BinaryOp,
    left: Value,
    right: Value,
    test: impl Fn(Ordering) -> bool,
) -> Result<Value> {
    numeric::compare(op.symbol(), left, right).map(|o| Value::Bool(test(o)))
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    Box::new(BinaryNode { op, left, right })
}

// ═══════════════════════════════════════════════════════════════════════
// Attribute Constructors
// ═══════════════════════════════════════════════════════════════════════

/// `left + right`
pub fn add(left: Node, right: Node) -> Node {
    binary(BinaryOp::Add, left, right)
}

/// `left - right`
pub fn sub(left: Node, right: Node) -> Node {
    binary(BinaryOp::Sub, left, right)
}

/// `left * right`
pub fn mul(left: Node, right: Node) -> Node {
    binary(BinaryOp::Mul, left, right)
}

/// `left / right`
pub fn div(left: Node, right: Node) -> Node {
    binary(BinaryOp::Div, left, right)
}

/// `left && right`
pub fn and(left: Node, right: Node) -> Node {
    binary(BinaryOp::And, left, right)
}

/// `left || right`
pub fn or(left: Node, right: Node) -> Node {
    binary(BinaryOp::Or, left, right)
}

/// `left == right`
pub fn eq(left: Node, right: Node) -> Node {
    binary(BinaryOp::Eq, left, right)
}

/// `left != right`
pub fn neq(left: Node, right: Node) -> Node {
    binary(BinaryOp::Ne, left, right)
}

/// `left < right`
pub fn lt(left: Node, right: Node) -> Node {
    binary(BinaryOp::Lt, left, right)
}

/// `left <= right`
pub fn lte(left: Node, right: Node) -> Node {
    binary(BinaryOp::Le, left, right)
}

/// `left > right`
pub fn gt(left: Node, right: Node) -> Node {
    binary(BinaryOp::Gt, left, right)
}

/// `left >= right`
pub fn gte(left: Node, right: Node) -> Node {
    binary(BinaryOp::Ge, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::literal::Literal;
    use crate::EvalError;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn lit(v: Value) -> Node {
        Box::new(Literal(v))
    }

    fn run(node: Node) -> Result<Value> {
        node.eval(&Context::new())
    }

    #[test]
    fn test_mixed_int_and_bigint() {
        let result = run(add(lit(Value::Int(1)), lit(Value::bigint(2)))).unwrap();
        assert_eq!(result, Value::bigint(3));
        let result = run(sub(lit(Value::bigint(1)), lit(Value::Int(2)))).unwrap();
        assert_eq!(result, Value::bigint(-1));
    }

    #[test]
    fn test_native_stays_native() {
        let result = run(add(lit(Value::Int(1)), lit(Value::Int(2)))).unwrap();
        assert_eq!(result, Value::Int(3));
    }

    #[test]
    fn test_mul_div_always_big() {
        assert_eq!(
            run(mul(lit(Value::Int(4)), lit(Value::Int(5)))).unwrap(),
            Value::bigint(20)
        );
        assert_eq!(
            run(div(lit(Value::Int(9)), lit(Value::Int(2)))).unwrap(),
            Value::bigint(4)
        );
        assert_eq!(
            run(div(lit(Value::Int(9)), lit(Value::bigint(0)))),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_comparisons() {
        let cases: [(fn(Node, Node) -> Node, i64, i64, bool); 8] = [
            (lt, 1, 2, true),
            (lt, 2, 2, false),
            (lte, 2, 2, true),
            (gt, 3, 2, true),
            (gt, 2, 3, false),
            (gte, 2, 2, true),
            (eq, 2, 2, true),
            (neq, 2, 2, false),
        ];
        for (ctor, a, b, expected) in cases {
            let result = run(ctor(lit(Value::bigint(a)), lit(Value::Int(b)))).unwrap();
            assert_eq!(result, Value::Bool(expected), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_eq_native_strict() {
        assert_eq!(
            run(eq(lit(Value::string("x")), lit(Value::string("x")))).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run(eq(lit(Value::Bool(true)), lit(Value::Int(1)))).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            run(neq(lit(Value::Undefined), lit(Value::Int(0)))).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_and_or_return_operands() {
        assert_eq!(
            run(and(lit(Value::bigint(0)), lit(Value::string("r")))).unwrap(),
            Value::bigint(0)
        );
        assert_eq!(
            run(and(lit(Value::Bool(true)), lit(Value::string("r")))).unwrap(),
            Value::string("r")
        );
        assert_eq!(
            run(or(lit(Value::Undefined), lit(Value::Int(7)))).unwrap(),
            Value::Int(7)
        );
        assert_eq!(
            run(or(lit(Value::Bool(true)), lit(Value::Int(7)))).unwrap(),
            Value::Bool(true)
        );
    }

    /// Counts evaluations so tests can observe that both sides ran.
    #[derive(Debug)]
    struct Counting(Arc<AtomicUsize>, Value);

    impl Evaluate for Counting {
        fn eval(&self, _ctx: &Context) -> Result<Value> {
            self.0.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(self.1.clone())
        }
    }

    #[test]
    fn test_and_or_evaluate_both_sides() {
        let hits = Arc::new(AtomicUsize::new(0));
        let node = and(
            Box::new(Counting(hits.clone(), Value::Bool(false))),
            Box::new(Counting(hits.clone(), Value::Bool(true))),
        );
        assert_eq!(run(node).unwrap(), Value::Bool(false));
        assert_eq!(hits.load(AtomicOrdering::SeqCst), 2);

        let node = or(
            Box::new(Counting(hits.clone(), Value::Bool(true))),
            Box::new(Counting(hits.clone(), Value::Bool(false))),
        );
        assert_eq!(run(node).unwrap(), Value::Bool(true));
        assert_eq!(hits.load(AtomicOrdering::SeqCst), 4);
    }

    #[test]
    fn test_type_error() {
        let err = run(sub(lit(Value::string("a")), lit(Value::Int(1)))).unwrap_err();
        assert!(matches!(err, EvalError::TypeError { .. }));
    }
}
