//! Callable value types: host functions and bound methods

use std::sync::Arc;

use super::Value;
use crate::error::{EvalError, Result};

/// Type alias for host function pointers.
///
/// The first argument is the receiver (`Value::Undefined` for free calls),
/// the second the evaluated arguments in source order.
pub type NativeFnPtr = Arc<dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync>;

/// A host function exposed to expressions.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: NativeFnPtr,
}

impl NativeFn {
    /// Create a host function with a fixed arity (-1 for variadic).
    pub fn new<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Invoke with an explicit receiver.
    ///
    /// Errors returned by the host function are passed through unchanged.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        if self.arity >= 0 && args.len() != self.arity as usize {
            return Err(EvalError::ArityMismatch {
                name: self.name.clone(),
                expected: self.arity as usize,
                got: args.len(),
            });
        }
        (self.func)(receiver, args)
    }

    /// Whether two handles share the same function pointer.
    pub fn ptr_eq(&self, other: &NativeFn) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl std::fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}

/// A host function paired with the receiver it was accessed on.
///
/// Produced by member access so that `obj.method(...)` runs with `obj`
/// as its receiver.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    /// The object the method was read from
    pub receiver: Arc<Value>,

    /// The method itself
    pub func: NativeFn,
}

impl BoundMethod {
    /// Bind `func` to `receiver`.
    pub fn new(receiver: Value, func: NativeFn) -> Self {
        Self {
            receiver: Arc::new(receiver),
            func,
        }
    }

    /// Invoke the method on its receiver.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        self.func.call(&self.receiver, args)
    }
}
