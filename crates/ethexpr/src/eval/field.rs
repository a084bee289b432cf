//! Member access attribute

use crate::error::type_name;
use crate::value::BoundMethod;
use crate::{Context, EvalError, Result, UnboundPolicy, Value};

use super::{Evaluate, Node};

/// `target.name`
#[derive(Debug)]
pub struct MemberNode {
    target: Node,
    name: String,
    unbound: UnboundPolicy,
}

impl Evaluate for MemberNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        let base = self.target.eval(ctx)?;
        get_property(&base, &self.name, self.unbound)
    }
}

/// Read a property from an evaluated value.
///
/// Functions read from an object come back bound to that object, so a
/// later call runs with the right receiver. Arrays and strings expose
/// `length`.
///
/// # Errors
///
/// Returns `PropertyNotFound` when `base` is not a host value, or when the
/// property is missing and `unbound` is [`UnboundPolicy::Error`].
pub fn get_property(base: &Value, name: &str, unbound: UnboundPolicy) -> Result<Value> {
    let found = match base {
        Value::Object(obj) => obj.get(name).cloned(),
        Value::Host(host) => host.get(name),
        Value::Array(items) if name == "length" => Some(Value::Int(items.len() as i64)),
        Value::String(s) if name == "length" => Some(Value::Int(s.chars().count() as i64)),
        Value::Array(_) | Value::String(_) | Value::Function(_) | Value::Method(_) => None,

        // Scalars have no properties at all
        other => return Err(not_found(name, other)),
    };

    match found {
        Some(Value::Function(func)) => Ok(Value::Method(BoundMethod::new(base.clone(), func))),
        Some(value) => Ok(value),
        None => match unbound {
            UnboundPolicy::Undefined => Ok(Value::Undefined),
            UnboundPolicy::Error => Err(not_found(name, base)),
        },
    }
}

fn not_found(name: &str, base: &Value) -> EvalError {
    EvalError::PropertyNotFound {
        property: name.to_string(),
        type_name: type_name(base).to_string(),
    }
}

/// `target.name`
pub fn get(target: Node, name: String, unbound: UnboundPolicy) -> Node {
    Box::new(MemberNode {
        target,
        name,
        unbound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectValue;

    fn point() -> Value {
        Value::object(
            ObjectValue::new("Point")
                .with_field("x", Value::Int(10))
                .with_method("getX", 0, |this, _| {
                    get_property(this, "x", UnboundPolicy::Error)
                }),
        )
    }

    #[test]
    fn test_field_access() {
        assert_eq!(
            get_property(&point(), "x", UnboundPolicy::Undefined).unwrap(),
            Value::Int(10)
        );
    }

    #[test]
    fn test_method_is_bound() {
        let p = point();
        let method = get_property(&p, "getX", UnboundPolicy::Undefined).unwrap();
        let Value::Method(bound) = method else {
            panic!("Expected bound method");
        };
        assert_eq!(*bound.receiver, p);
        assert_eq!(bound.call(&[]).unwrap(), Value::Int(10));
    }

    #[test]
    fn test_missing_property() {
        assert_eq!(
            get_property(&point(), "z", UnboundPolicy::Undefined).unwrap(),
            Value::Undefined
        );
        assert!(matches!(
            get_property(&point(), "z", UnboundPolicy::Error),
            Err(EvalError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn test_scalar_has_no_properties() {
        assert!(matches!(
            get_property(&Value::bigint(1), "x", UnboundPolicy::Undefined),
            Err(EvalError::PropertyNotFound { .. })
        ));
        assert!(matches!(
            get_property(&Value::Undefined, "x", UnboundPolicy::Undefined),
            Err(EvalError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn test_length() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            get_property(&arr, "length", UnboundPolicy::Error).unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            get_property(&Value::string("héllo"), "length", UnboundPolicy::Error).unwrap(),
            Value::Int(5)
        );
    }
}
