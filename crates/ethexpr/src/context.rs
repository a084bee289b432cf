//! Variable bindings supplied by the caller for one evaluation

use indexmap::IndexMap;

use crate::error::{EvalError, Result};
use crate::value::Value;

/// The variables an expression is evaluated against.
///
/// The caller owns the context; evaluation only borrows it and never
/// mutates it, so one context can be reused across many evaluations.
///
/// # Example
///
/// ```
/// use ethexpr::{Context, Value};
///
/// let ctx = Context::new()
///     .with("a", Value::Int(1))
///     .with("b", "text");
///
/// assert_eq!(ctx.get("a"), Some(&Value::Int(1)));
/// assert!(ctx.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    bindings: IndexMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding (builder pattern).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, value);
        self
    }

    /// Bind `name`, replacing any previous value.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Check whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the context has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a context from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if `json` is not an object.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .fold(Context::new(), |ctx, (k, v)| ctx.with(k, Value::from(v)))),
            other => Err(EvalError::TypeError {
                message: format!("context must be a JSON object, got {}", json_kind(&other)),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        for (k, v) in iter {
            ctx.define(k, v);
        }
        ctx
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
