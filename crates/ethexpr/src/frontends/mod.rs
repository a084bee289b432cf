//! Grammars for ethexpr
//!
//! This module contains the built-in implementation of the [`Grammar`]
//! trait and the tokenizer it runs on.
//!
//! [`Grammar`]: crate::Grammar

pub mod expression;
pub mod lexer;

pub use expression::ExpressionGrammar;
