//! Compound host values: objects and custom host types

use indexmap::IndexMap;

use super::{NativeFn, Value};
use crate::error::{EvalError, Result};

/// An object with named properties.
///
/// Uses IndexMap to preserve property order (for predictable display
/// and JSON round-trips).
#[derive(Debug, Clone)]
pub struct ObjectValue {
    /// The object's type name (e.g., "object", "Token")
    pub type_name: String,

    /// The object's properties in insertion order
    pub fields: IndexMap<String, Value>,
}

impl ObjectValue {
    /// Create a new empty object
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a property (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Add a method (builder pattern)
    ///
    /// The function receives the object as its receiver when called
    /// through member access.
    pub fn with_method<F>(self, name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let method = NativeFn::new(name.clone(), arity, func);
        self.with_field(name, Value::Function(method))
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// An opaque object owned by the embedding application.
///
/// Implement this to expose a Rust type to expressions without converting
/// it to an [`ObjectValue`]. Every method has a default so implementors
/// only provide the capabilities they support.
pub trait HostObject: std::fmt::Debug + Send + Sync {
    /// Type name used in error messages.
    fn type_name(&self) -> &str {
        "host object"
    }

    /// Look up a property. Returning a [`Value::Function`] makes it callable
    /// as a method with this object as receiver.
    fn get(&self, _property: &str) -> Option<Value> {
        None
    }

    /// Element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `NotIndexable` unless overridden.
    fn index(&self, _index: usize) -> Result<Value> {
        Err(EvalError::NotIndexable {
            type_name: self.type_name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Opaque;

    impl HostObject for Opaque {}

    #[test]
    fn test_object_builder_preserves_order() {
        let obj = ObjectValue::new("object")
            .with_field("b", Value::Int(2))
            .with_field("a", Value::Int(1));
        let keys: Vec<_> = obj.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(obj.get("a"), Some(&Value::Int(1)));
        assert_eq!(obj.get("c"), None);
    }

    #[test]
    fn test_with_method_stores_function() {
        let obj = ObjectValue::new("object").with_method("f", 0, |_, _| Ok(Value::Bool(true)));
        assert!(matches!(obj.get("f"), Some(Value::Function(_))));
    }

    #[test]
    fn test_host_object_defaults() {
        let host = Opaque;
        assert_eq!(host.type_name(), "host object");
        assert!(host.get("x").is_none());
        assert!(matches!(
            host.index(0),
            Err(EvalError::NotIndexable { .. })
        ));
    }
}
