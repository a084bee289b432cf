//! # ethexpr
//!
//! An embeddable expression language with arbitrary-precision integers and
//! Ethereum unit literals.
//!
//! Expressions are compiled once into an [`Evaluator`] and then evaluated
//! against any number of [`Context`]s, each a mapping from variable names
//! to [`Value`]s. Host data plugs in as plain values, [`ObjectValue`]s with
//! native methods, or anything implementing [`HostObject`].
//!
//! ```
//! use ethexpr::{evaluate, Context, ObjectValue, Value};
//! use ethexpr::numeric::to_numeric;
//!
//! let wallet = ObjectValue::new("Wallet").with_method("sum", -1, |_, args| {
//!     let mut total = num_bigint::BigInt::from(0);
//!     for arg in args {
//!         total += to_numeric(arg)?;
//!     }
//!     Ok(Value::BigInt(total))
//! });
//! let ctx = Context::new().with("wallet", wallet);
//!
//! let result = evaluate("wallet.sum(1 gwei, 5e8) == 15e8", &ctx).unwrap();
//! assert_eq!(result, Value::Bool(true));
//! ```
//!
//! ## Architecture
//!
//! - **Grammar** ([`frontend`], [`frontends`]): source text to a forest of
//!   typed [`Expr`] trees
//! - **Flattener** ([`flatten`]): forest to its leaves
//! - **Attribute library** ([`eval`]): one node constructor per production
//! - **Numeric core** ([`numeric`]): big-integer coercion and operators
//! - **Driver** ([`evaluator`]): `parse` / `evaluate` and the [`Engine`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod config;
pub mod context;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod flatten;
pub mod frontend;
pub mod frontends;
pub mod numeric;
pub mod value;

// Re-export main types
pub use ast::{BinaryOp, Expr};
pub use config::{EvalConfig, UnboundPolicy};
pub use context::Context;
pub use error::{EvalError, ParseError, Result, SourceLocation};
pub use eval::Evaluate;
pub use evaluator::{evaluate, parse, Engine, Evaluator, GrammarFactory};
pub use flatten::{flatten_deep, ParseNode};
pub use frontend::Grammar;
pub use frontends::ExpressionGrammar;
pub use numeric::Unit;
pub use value::{BoundMethod, HostObject, NativeFn, NativeFnPtr, ObjectValue, Value};

/// ethexpr version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
