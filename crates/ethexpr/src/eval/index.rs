//! Index attribute

use num_traits::ToPrimitive;

use crate::error::type_name;
use crate::numeric::to_numeric;
use crate::{Context, EvalError, Result, Value};

use super::{Evaluate, Node};

/// `target[index]`
#[derive(Debug)]
pub struct IndexNode {
    target: Node,
    index: Node,
}

impl Evaluate for IndexNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        // Evaluate the base expression
        let base = self.target.eval(ctx)?;

        // Evaluate the index expression
        let index = self.index.eval(ctx)?;

        index_value(&base, &index)
    }
}

/// Index into an evaluated value.
///
/// Supports arrays, strings (yielding one-character strings) and host
/// objects that implement indexing.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if the index is negative, does not fit a
/// machine word, or is past the end.
/// Returns `NotIndexable` if the base value doesn't support indexing.
pub fn index_value(base: &Value, index: &Value) -> Result<Value> {
    match base {
        Value::Array(items) => {
            let idx = to_index(index, Some(items.len()))?;
            items
                .get(idx)
                .cloned()
                .ok_or_else(|| out_of_range(idx, items.len()))
        }

        Value::String(s) => {
            let len = s.chars().count();
            let idx = to_index(index, Some(len))?;
            s.chars()
                .nth(idx)
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| out_of_range(idx, len))
        }

        // The host knows its own length; only the conversion is checked here
        Value::Host(host) => host.index(to_index(index, None)?),

        other => Err(EvalError::NotIndexable {
            type_name: type_name(other).to_string(),
        }),
    }
}

fn to_index(index: &Value, len: Option<usize>) -> Result<usize> {
    let n = to_numeric(index)?;
    n.to_usize().ok_or_else(|| EvalError::IndexOutOfRange {
        index: n.to_string(),
        len,
    })
}

fn out_of_range(index: usize, len: usize) -> EvalError {
    EvalError::IndexOutOfRange {
        index: index.to_string(),
        len: Some(len),
    }
}

/// `target[index]`
pub fn indexer(target: Node, index: Node) -> Node {
    Box::new(IndexNode { target, index })
}
