//! Evaluation configuration

use serde::{Deserialize, Serialize};

/// What to do when an identifier or property is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnboundPolicy {
    /// Yield [`Value::Undefined`](crate::Value::Undefined)
    #[default]
    Undefined,

    /// Fail with `UnboundVariable` / `PropertyNotFound`
    Error,
}

/// Configuration applied when compiling and evaluating expressions.
///
/// An [`Evaluator`](crate::Evaluator) keeps the configuration it was
/// compiled with, so the same source may behave differently under two
/// engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Policy for unbound variables and missing properties
    pub unbound: UnboundPolicy,

    /// Largest exponent accepted in scientific notation
    pub max_exponent: u32,

    /// Maximum expression nesting depth.
    ///
    /// Bounds both the parser's recursion and the height of the tree that
    /// gets compiled and evaluated. A parenthesized group costs the parser
    /// several stack frames, so the default stays well inside a 2 MiB
    /// thread stack in unoptimized builds.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            unbound: UnboundPolicy::Undefined,
            max_exponent: 10_000,
            max_depth: 64,
        }
    }
}

impl EvalConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that fails on unbound names.
    pub fn strict() -> Self {
        Self {
            unbound: UnboundPolicy::Error,
            ..Default::default()
        }
    }

    /// Set the unbound-name policy.
    pub fn with_unbound(mut self, unbound: UnboundPolicy) -> Self {
        self.unbound = unbound;
        self
    }

    /// Set the largest accepted scientific-notation exponent.
    pub fn with_max_exponent(mut self, max_exponent: u32) -> Self {
        self.max_exponent = max_exponent;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether missing names are errors.
    pub fn is_strict(&self) -> bool {
        self.unbound == UnboundPolicy::Error
    }
}
