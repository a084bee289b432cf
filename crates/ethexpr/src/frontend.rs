//! Grammar trait for ethexpr
//!
//! This module defines the `Grammar` trait: the seam between the surface
//! syntax and the evaluator core. A grammar turns source text into a parse
//! forest of typed [`Expr`] trees; the driver flattens the forest, checks
//! that exactly one distinct expression came out, and compiles it.
//!
//! ```text
//! Source → [Grammar] → ParseNode<Expr> forest → [flatten] → Expr → [compile] → Evaluator
//! ```
//!
//! The built-in grammar lives in [`crate::frontends`]. Alternative grammars
//! can be plugged into an [`Engine`](crate::Engine) with
//! [`Engine::with_grammar`](crate::Engine::with_grammar).

use crate::ast::Expr;
use crate::error::ParseError;
use crate::flatten::ParseNode;
use crate::{EvalError, Value};

// ═══════════════════════════════════════════════════════════════════════
// GRAMMAR TRAIT
// ═══════════════════════════════════════════════════════════════════════

/// Surface grammar interface.
///
/// A grammar is constructed fresh for each parse and fed the whole
/// source once. It may return several alternative parses, nested to any
/// depth; the driver treats structurally equal alternatives as one.
///
/// # Example Implementation
///
/// ```
/// use ethexpr::{Expr, Grammar, ParseError, ParseNode};
///
/// /// Parses every input as the literal `1`.
/// struct One;
///
/// impl Grammar for One {
///     fn feed(&mut self, _source: &str) -> Result<Vec<ParseNode<Expr>>, ParseError> {
///         Ok(vec![ParseNode::leaf(Expr::Number("1".to_string()))])
///     }
///
///     fn name(&self) -> &str {
///         "one"
///     }
/// }
/// ```
pub trait Grammar: Send {
    /// Parse the complete source into a forest of expression trees.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the source cannot be parsed.
    fn feed(&mut self, source: &str) -> Result<Vec<ParseNode<Expr>>, ParseError>;

    /// Return the name of this grammar, for diagnostics.
    fn name(&self) -> &str;

    /// Format an error raised while parsing or evaluating `source`.
    ///
    /// The default points a caret at the parse error location, if any.
    fn format_error(&self, error: &EvalError, source: &str) -> String {
        match error {
            EvalError::Parse(ParseError {
                location: Some(loc),
                ..
            }) => {
                let line = source.lines().nth(loc.line - 1).unwrap_or("");
                format!(
                    "error: {}\n  {}\n  {}^",
                    error,
                    line,
                    " ".repeat(loc.column - 1)
                )
            }
            other => format!("error: {}", other),
        }
    }

    /// Format a value for display.
    fn format_value(&self, value: &Value) -> String {
        value.to_string()
    }
}
