//! Call attributes

use tracing::trace;

use crate::error::type_name;
use crate::{Context, EvalError, Result, Value};

use super::{Evaluate, Node};

/// `callee(args...)`
#[derive(Debug)]
pub struct CallNode {
    callee: Node,
    args: Vec<Node>,
}

impl Evaluate for CallNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        // Evaluate the function expression
        let func = self.callee.eval(ctx)?;

        // Evaluate arguments, left to right
        let args: Vec<Value> = self
            .args
            .iter()
            .map(|arg| arg.eval(ctx))
            .collect::<Result<Vec<_>>>()?;

        call_value(&func, &args)
    }
}

/// Call a Value as a function.
///
/// Bound methods run with their receiver; plain functions get
/// `Value::Undefined`. Errors raised by the host function are returned
/// unchanged.
///
/// # Errors
///
/// Returns `NotCallable` if the value is not callable.
/// Returns `ArityMismatch` if the argument count doesn't match.
pub fn call_value(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::Function(f) => {
            trace!(function = %f.name, args = args.len(), "calling host function");
            f.call(&Value::Undefined, args)
        }
        Value::Method(m) => {
            trace!(method = %m.func.name, args = args.len(), "calling bound method");
            m.call(args)
        }
        other => Err(EvalError::NotCallable {
            type_name: type_name(other).to_string(),
        }),
    }
}

/// `callee()`
pub fn callable(callee: Node) -> Node {
    Box::new(CallNode {
        callee,
        args: Vec::new(),
    })
}

/// `callee(a, b, ...)`
pub fn callable_with_params(callee: Node, args: Vec<Node>) -> Node {
    Box::new(CallNode { callee, args })
}
