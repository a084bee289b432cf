//! Unary operator attributes

use num_traits::Zero;

use crate::numeric::is_truthy;
use crate::{Context, Result, Value};

use super::{Evaluate, Node};

/// Logical not.
#[derive(Debug)]
pub struct NotNode {
    operand: Node,
}

impl Evaluate for NotNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        let value = self.operand.eval(ctx)?;
        Ok(Value::Bool(match &value {
            Value::BigInt(n) => n.is_zero(),
            other => !is_truthy(other),
        }))
    }
}

/// `!operand`: big-integer zero is falsy, everything else follows
/// ordinary truthiness.
pub fn neg(operand: Node) -> Node {
    Box::new(NotNode { operand })
}
