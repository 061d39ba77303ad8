//! Tree types for parsed linear code expressions
//!
//! Two equivalent shapes are provided:
//!
//! - [`ParseTree`] (stem-and-subtrees): the unbranched stem of an expression
//!   plus the parsed branches hanging off its far end.
//! - [`FuncArgs`] (func-and-args): every stem unit becomes a node whose single
//!   argument is the next unit; the last unit takes the subtrees as arguments.
//!
//! All trees are immutable after construction and built bottom-up.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::tokenizer::Token;
use crate::{Error, Result};

fn tokens_as_text<S: Serializer>(tokens: &[Token], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(tokens.iter().map(Token::to_string))
}

fn token_as_text<S: Serializer>(token: &Token, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(token)
}

/// Stem-and-subtrees form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    #[serde(serialize_with = "tokens_as_text")]
    stem: Vec<Token>,
    subtrees: Vec<ParseTree>,
}

impl ParseTree {
    pub(crate) fn new(stem: Vec<Token>, subtrees: Vec<ParseTree>) -> Self {
        ParseTree { stem, subtrees }
    }

    /// Stem units, root first
    pub fn stem(&self) -> &[Token] {
        &self.stem
    }

    /// Branches in the order they are written, left to right
    pub fn subtrees(&self) -> &[ParseTree] {
        &self.subtrees
    }

    /// Total number of units in the tree
    pub fn unit_count(&self) -> usize {
        self.stem.len() + self.subtrees.iter().map(ParseTree::unit_count).sum::<usize>()
    }

    /// Convert to func-and-args form.
    ///
    /// The stem becomes a unary spine, root first; the converted subtrees are
    /// the arguments of the spine's deepest node.
    pub fn to_func_and_args(&self) -> Result<FuncArgs> {
        let children = self
            .subtrees
            .iter()
            .map(ParseTree::to_func_and_args)
            .collect::<Result<Vec<_>>>()?;

        let mut spine = self.stem.iter().rev();
        let Some(deepest) = spine.next() else {
            return Err(Error::EmptyStem {
                tokens: String::new(),
            });
        };
        let leaf = FuncArgs {
            func: deepest.clone(),
            args: children,
        };
        Ok(spine.fold(leaf, |inner, token| FuncArgs {
            func: token.clone(),
            args: vec![inner],
        }))
    }

    /// Render in the requested style; the two tree styles as JSON
    pub fn render(&self, style: TreeStyle, unwrap_leaves: bool) -> Result<String> {
        match style {
            TreeStyle::StemAndSubtrees => Ok(serde_json::to_string_pretty(self)?),
            TreeStyle::FuncAndArgs => Ok(serde_json::to_string_pretty(&self.to_func_and_args()?)?),
            TreeStyle::SExp => Ok(self.to_func_and_args()?.to_sexp(unwrap_leaves)),
        }
    }
}

/// Func-and-args form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncArgs {
    #[serde(serialize_with = "token_as_text")]
    func: Token,
    args: Vec<FuncArgs>,
}

impl FuncArgs {
    pub fn func(&self) -> &Token {
        &self.func
    }

    pub fn args(&self) -> &[FuncArgs] {
        &self.args
    }

    pub fn is_leaf(&self) -> bool {
        self.args.is_empty()
    }

    /// Render as `(f a1 a2 ...)`.
    ///
    /// With `unwrap_leaves`, an argument that is itself a leaf is written
    /// without its parentheses: `(Mb4 Ma3 Ma6)` instead of `(Mb4 (Ma3) (Ma6))`.
    /// A tree that is a single leaf is always `(f)`.
    pub fn to_sexp(&self, unwrap_leaves: bool) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out, unwrap_leaves);
        out
    }

    fn write_sexp(&self, out: &mut String, unwrap_leaves: bool) {
        out.push('(');
        out.push_str(&self.func.to_string());
        for arg in &self.args {
            out.push(' ');
            if unwrap_leaves && arg.is_leaf() {
                out.push_str(&arg.func.to_string());
            } else {
                arg.write_sexp(out, unwrap_leaves);
            }
        }
        out.push(')');
    }
}

impl fmt::Display for FuncArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_sexp(false))
    }
}

/// Output shapes for a parsed expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    #[default]
    StemAndSubtrees,
    FuncAndArgs,
    SExp,
}

impl FromStr for TreeStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "stem-and-subtrees" => Ok(TreeStyle::StemAndSubtrees),
            "func-and-args" => Ok(TreeStyle::FuncAndArgs),
            "s-exp" => Ok(TreeStyle::SExp),
            other => Err(format!(
                "unknown tree style '{}', expected stem-and-subtrees, func-and-args or s-exp",
                other
            )),
        }
    }
}
