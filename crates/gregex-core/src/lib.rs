//! gregex core - uncertainty operators over glycan linear code
//!
//! Analyzes linear code expressions (LCEs) against the three uncertainty
//! operators of Krambeck et al. (2009): ligand `...`, continuation `_` and
//! possible branch point `|`. Each operator stands for an unknown, possibly
//! empty fragment of an expression.
//!
//! # Architecture
//!
//! ```text
//! LCE text → Tokenizer → tokens → Window Generator → Operator Predicates → Match Analyzer
//!                          │                                  ↑
//!                          │                     Substitution Validator, Comparator
//!                          ↓
//!                   Structural Parser → stem-and-subtrees / func-and-args / s-expression
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input always produces identical, identically
//!   ordered output
//! - **Pure**: no global state; the vocabulary is passed in explicitly
//! - **Bounded**: matching is quadratic in the number of tokens

pub mod analyzer;
pub mod comparator;
pub mod error;
pub mod operator;
pub mod parser;
pub mod substitution;
pub mod vocabulary;
pub mod window;

pub use analyzer::{analyze, MatchRecord};
pub use comparator::{compare, Comparison};
pub use error::{Error, Result};
pub use operator::OperatorKind;
pub use parser::ast::{FuncArgs, ParseTree, TreeStyle};
pub use parser::tokenizer::{tokenize, Token, TokenSequence, Tokenizer};
pub use parser::{parse_expression, parse_tree};
pub use substitution::check;
pub use vocabulary::Vocabulary;
