//! Identifier attributes: variable lookup and member names

use crate::ast::boolean_keyword;
use crate::{Context, EvalError, Result, UnboundPolicy, Value};

use super::{Evaluate, Node};

/// Looks a name up in the context.
#[derive(Debug)]
pub struct VariableNode {
    name: String,
    unbound: UnboundPolicy,
}

impl Evaluate for VariableNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        match ctx.get(&self.name) {
            Some(value) => Ok(value.clone()),
            None => match self.unbound {
                UnboundPolicy::Undefined => Ok(Value::Undefined),
                UnboundPolicy::Error => Err(EvalError::UnboundVariable {
                    name: self.name.clone(),
                }),
            },
        }
    }
}

/// Variable reference.
///
/// Returns `None` for `true` / `false` in any case: those words belong to
/// the boolean literal production and never reach the context.
pub fn variable(name: &str, unbound: UnboundPolicy) -> Option<Node> {
    if boolean_keyword(name).is_some() {
        return None;
    }
    Some(Box::new(VariableNode {
        name: name.to_string(),
        unbound,
    }))
}

/// Identifier used as a property name after `.`.
pub fn name(text: &str) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let ctx = Context::new().with("a", Value::Int(1));
        let node = variable("a", UnboundPolicy::Undefined).unwrap();
        assert_eq!(node.eval(&ctx).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_missing_lenient() {
        let node = variable("nope", UnboundPolicy::Undefined).unwrap();
        assert_eq!(node.eval(&Context::new()).unwrap(), Value::Undefined);
    }

    #[test]
    fn test_missing_strict() {
        let node = variable("nope", UnboundPolicy::Error).unwrap();
        assert_eq!(
            node.eval(&Context::new()),
            Err(EvalError::UnboundVariable {
                name: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_boolean_words() {
        assert!(variable("true", UnboundPolicy::Undefined).is_none());
        assert!(variable("False", UnboundPolicy::Error).is_none());
    }
}
