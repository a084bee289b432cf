//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create an array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    /// Create an object value
    pub fn object(o: ObjectValue) -> Self {
        Value::Object(Arc::new(o))
    }

    /// Wrap a custom host object
    pub fn host(h: impl HostObject + 'static) -> Self {
        Value::Host(Arc::new(h))
    }

    /// Create a big integer value
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(n.into())
    }

    /// Create a host function value
    pub fn function<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        Value::Function(NativeFn::new(name, arity, func))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is an integer of either width
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_))
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is a host value (array, object, host object or callable)
    pub fn is_host(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::Host(_)
                | Value::Function(_)
                | Value::Method(_)
        )
    }

    /// Check if value is callable
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Method(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (big integers only if they fit)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::BigInt(n) => n.to_i64(),
            _ => None,
        }
    }

    /// Extract as usize (non-negative integers that fit a machine word)
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Int(n) => usize::try_from(*n).ok(),
            Value::BigInt(n) => n.to_usize(),
            _ => None,
        }
    }

    /// Extract big integer reference
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract array as slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,

            // Primitives
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,

            // Host data (structural)
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.type_name == b.type_name && a.fields == b.fields
            }

            // Opaque host objects and functions compare by identity
            (Value::Host(a), Value::Host(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Method(a), Value::Method(b)) => {
                a.func.ptr_eq(&b.func) && a.receiver == b.receiver
            }

            // Different kinds are never equal
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<ObjectValue> for Value {
    fn from(o: ObjectValue) -> Self {
        Value::object(o)
    }
}

impl From<NativeFn> for Value {
    fn from(f: NativeFn) -> Self {
        Value::Function(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_and_bigint_are_distinct_variants() {
        assert_ne!(Value::Int(3), Value::bigint(3));
        assert_eq!(Value::bigint(3), Value::BigInt(BigInt::from(3)));
    }

    #[test]
    fn test_as_usize_rejects_negative() {
        assert_eq!(Value::Int(-1).as_usize(), None);
        assert_eq!(Value::bigint(-1).as_usize(), None);
        assert_eq!(Value::bigint(7).as_usize(), Some(7));
    }

    #[test]
    fn test_function_identity() {
        let f = NativeFn::new("f", 0, |_, _| Ok(Value::Undefined));
        let a = Value::Function(f.clone());
        let b = Value::Function(f);
        let c = Value::function("f", 0, |_, _| Ok(Value::Undefined));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_predicates() {
        assert!(Value::array(vec![]).is_host());
        assert!(!Value::Int(1).is_host());
        assert!(Value::function("f", 0, |_, _| Ok(Value::Undefined)).is_callable());
        assert!(Value::Undefined.is_undefined());
    }
}
