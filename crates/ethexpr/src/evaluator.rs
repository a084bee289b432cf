//! Evaluation driver
//!
//! Ties the pieces together: a [`Grammar`] parses source into a forest,
//! the forest is flattened and must yield exactly one distinct expression,
//! and that expression is compiled into an [`Evaluator`] that can be run
//! against any number of contexts.

use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::ast::Expr;
use crate::eval::{check_depth, compile, Evaluate};
use crate::flatten::{flatten_deep, ParseNode};
use crate::frontend::Grammar;
use crate::frontends::ExpressionGrammar;
use crate::{Context, EvalConfig, EvalError, Result, Value};

/// Builds a fresh grammar for each parse.
pub type GrammarFactory = Arc<dyn Fn(&EvalConfig) -> Box<dyn Grammar> + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════
// Evaluator
// ═══════════════════════════════════════════════════════════════════════

/// A compiled expression.
///
/// Immutable and cheap to clone; the same evaluator may be invoked
/// repeatedly, from several threads, with different contexts.
#[derive(Clone)]
pub struct Evaluator {
    root: Arc<dyn Evaluate>,
    source: Arc<str>,
    config: EvalConfig,
}

impl Evaluator {
    /// Evaluate the expression against `ctx`.
    ///
    /// The context is only read, and is not retained after the call.
    pub fn evaluate(&self, ctx: &Context) -> Result<Value> {
        debug!(source = %self.source, "evaluating expression");
        self.root.eval(ctx)
    }

    /// The source text this evaluator was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The configuration this evaluator was compiled with.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }
}

impl Evaluate for Evaluator {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        self.evaluate(ctx)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Engine
// ═══════════════════════════════════════════════════════════════════════

/// Parses and evaluates expressions under one configuration.
///
/// # Example
///
/// ```
/// use ethexpr::{Context, Engine, EvalConfig, Value};
///
/// let engine = Engine::with_config(EvalConfig::strict());
/// let ctx = Context::new().with("fee", Value::bigint(21_000));
/// let result = engine.evaluate("fee * 2 gwei", &ctx).unwrap();
/// assert_eq!(result, Value::bigint(42_000_000_000_000u64));
/// ```
#[derive(Clone)]
pub struct Engine {
    config: EvalConfig,
    grammar: GrammarFactory,
    cache: Arc<DashMap<String, Evaluator>>,
}

impl Engine {
    /// Create an engine with the default configuration and grammar.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            grammar: Arc::new(|config: &EvalConfig| -> Box<dyn Grammar> {
                Box::new(ExpressionGrammar::new(config))
            }),
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Replace the grammar. Clears the compile cache.
    pub fn with_grammar<F>(mut self, factory: F) -> Self
    where
        F: Fn(&EvalConfig) -> Box<dyn Grammar> + Send + Sync + 'static,
    {
        self.grammar = Arc::new(factory);
        self.cache = Arc::new(DashMap::new());
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Compile `source` into an evaluator.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed source or for an expression nested
    /// deeper than [`EvalConfig::max_depth`], `AmbiguousGrammar` when the
    /// grammar does not yield exactly one distinct expression, and the
    /// literal errors (`InvalidNumericLiteral`, `ExponentOverflow`) raised
    /// while compiling.
    pub fn parse(&self, source: &str) -> Result<Evaluator> {
        let mut grammar = (self.grammar)(&self.config);
        let forest = grammar.feed(source)?;

        // Heights are checked before anything recurses over the trees
        let leaves = flatten_deep(forest);
        for leaf in &leaves {
            check_depth(leaf, self.config.max_depth)?;
        }
        let expr = single(leaves)?;
        let root = compile(&expr, &self.config)?;

        debug!(grammar = grammar.name(), source, "compiled expression");
        Ok(Evaluator {
            root: Arc::from(root),
            source: Arc::from(source),
            config: self.config.clone(),
        })
    }

    /// Parse `source` and evaluate it once against `ctx`.
    pub fn evaluate(&self, source: &str, ctx: &Context) -> Result<Value> {
        self.parse(source)?.evaluate(ctx)
    }

    /// Like [`parse`](Self::parse), but reuses evaluators compiled earlier
    /// by this engine (or its clones) for the same source text.
    ///
    /// Failed parses are not cached.
    pub fn parse_cached(&self, source: &str) -> Result<Evaluator> {
        // Fast read path
        if let Some(found) = self.cache.get(source) {
            trace!(source, "compile cache hit");
            return Ok(found.value().clone());
        }

        let evaluator = self.parse(source)?;
        Ok(match self.cache.entry(source.to_string()) {
            Entry::Vacant(v) => {
                v.insert(evaluator.clone());
                evaluator
            }
            Entry::Occupied(o) => o.get().clone(),
        })
    }

    /// Number of cached evaluators.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached evaluator.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Reduce a parse forest to its single distinct expression.
///
/// # Errors
///
/// Returns `AmbiguousGrammar` with the number of distinct expressions when
/// that number is not exactly one.
///
/// Comparing candidates recurses over them; [`Engine::parse`] checks their
/// height first.
pub fn select_single(forest: Vec<ParseNode<Expr>>) -> Result<Expr> {
    single(flatten_deep(forest))
}

fn single(leaves: Vec<Expr>) -> Result<Expr> {
    let mut distinct: Vec<Expr> = Vec::new();
    for expr in leaves {
        if !distinct.contains(&expr) {
            distinct.push(expr);
        }
    }

    let count = distinct.len();
    match distinct.pop() {
        Some(expr) if count == 1 => Ok(expr),
        _ => Err(EvalError::AmbiguousGrammar { count }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Compile `source` with the default configuration.
///
/// Builds a fresh grammar on every call; nothing is cached.
///
/// ```
/// use ethexpr::{parse, Context, Value};
///
/// let check = parse("balance >= 1 ether").unwrap();
/// let rich = Context::new().with("balance", Value::bigint(2_000_000_000_000_000_000u64));
/// assert_eq!(check.evaluate(&rich).unwrap(), Value::Bool(true));
/// ```
pub fn parse(source: &str) -> Result<Evaluator> {
    Engine::new().parse(source)
}

/// Compile `source` with the default configuration and evaluate it once.
pub fn evaluate(source: &str, ctx: &Context) -> Result<Value> {
    Engine::new().evaluate(source, ctx)
}
