//! Error types for ethexpr parsing and evaluation

use std::fmt;

use thiserror::Error;

use crate::Value;

/// Error that occurred while parsing source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Nesting beyond the configured depth limit.
    pub fn too_deep(limit: usize) -> Self {
        Self::new(format!("expression nested too deeply (limit {})", limit))
    }

    /// Attach the location of a byte offset within `source`.
    pub fn at_offset(self, source: &str, offset: usize) -> Self {
        self.with_location(SourceLocation::from_offset(source, offset))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}:{}", loc.line, loc.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset into the source
    pub offset: usize,

    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Compute line and column for a byte offset.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Main error type for parsing and evaluating expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Malformed source text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The grammar did not produce exactly one expression
    #[error("Ambiguous grammar: expected exactly one parse, found {count}")]
    AmbiguousGrammar {
        /// Number of distinct parses found
        count: usize,
    },

    /// A string could not be read as an integer
    #[error("Invalid numeric literal `{literal}`")]
    InvalidNumericLiteral {
        /// The offending text
        literal: String,
    },

    /// Scientific-notation exponent exceeds the configured maximum
    #[error("Exponent {exponent} exceeds the maximum of {max}")]
    ExponentOverflow {
        /// The requested exponent
        exponent: String,
        /// The configured maximum
        max: u32,
    },

    /// Integer division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// The indexed value does not support indexing
    #[error("Cannot index into {type_name}")]
    NotIndexable {
        /// Type of the indexed value
        type_name: String,
    },

    /// Index is negative, too large, or past the end
    #[error("Index {index} out of range{}", describe_len(.len))]
    IndexOutOfRange {
        /// The requested index
        index: String,
        /// Length of the indexed value, when known
        len: Option<usize>,
    },

    /// Member access on a missing property or a non-host value
    #[error("Property `{property}` not found on {type_name}")]
    PropertyNotFound {
        /// The requested property
        property: String,
        /// Type of the accessed value
        type_name: String,
    },

    /// Call on a value that is not callable
    #[error("Value of type {type_name} is not callable")]
    NotCallable {
        /// Type of the called value
        type_name: String,
    },

    /// Identifier missing from the context (strict mode only)
    #[error("Unbound variable `{name}`")]
    UnboundVariable {
        /// The identifier
        name: String,
    },

    /// Operand kinds the operator cannot combine
    #[error("Type error: {message}")]
    TypeError {
        /// Description of the mismatch
        message: String,
    },

    /// Host function called with the wrong number of arguments
    #[error("Function `{name}` takes {expected} argument(s) but {got} were supplied")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Declared arity
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// Error raised by a host callable
    #[error("{message}")]
    Host {
        /// Message supplied by the host
        message: String,
    },
}

impl EvalError {
    /// Build a host error, for use inside native functions.
    pub fn host(message: impl Into<String>) -> Self {
        EvalError::Host {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_operands(op: &str, left: &Value, right: &Value) -> Self {
        EvalError::TypeError {
            message: format!(
                "cannot apply `{}` to {} and {}",
                op,
                type_name(left),
                type_name(right)
            ),
        }
    }
}

fn describe_len(len: &Option<usize>) -> String {
    len.map(|n| format!(" for length {}", n)).unwrap_or_default()
}

/// Result type alias for ethexpr operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Human-readable name of a value's kind, for error messages.
pub fn type_name(value: &Value) -> &str {
    match value {
        Value::Undefined => "undefined",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::BigInt(_) => "bigint",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(o) => &o.type_name,
        Value::Host(h) => h.type_name(),
        Value::Function(_) => "function",
        Value::Method(_) => "method",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_offset() {
        let loc = SourceLocation::from_offset("a +\n  (", 6);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 3);
        assert_eq!(loc.offset, 6);
    }

    #[test]
    fn test_location_clamps_past_end() {
        let loc = SourceLocation::from_offset("1 +", 99);
        assert_eq!(loc.offset, 3);
        assert_eq!(loc.column, 4);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("unexpected end of input").at_offset("(", 1);
        assert_eq!(err.to_string(), "unexpected end of input at 1:2");
    }

    #[test]
    fn test_index_error_display() {
        let known = EvalError::IndexOutOfRange {
            index: "3".to_string(),
            len: Some(2),
        };
        assert_eq!(known.to_string(), "Index 3 out of range for length 2");

        let unknown = EvalError::IndexOutOfRange {
            index: "-1".to_string(),
            len: None,
        };
        assert_eq!(unknown.to_string(), "Index -1 out of range");
    }

    #[test]
    fn test_too_deep_message() {
        assert_eq!(
            ParseError::too_deep(64).to_string(),
            "expression nested too deeply (limit 64)"
        );
    }

    #[test]
    fn test_eval_error_from_parse_error() {
        let err: EvalError = ParseError::new("boom").into();
        assert!(matches!(err, EvalError::Parse(_)));
    }
}
