//! Structural parser - tokenizer, tree types, and branch reconstruction
//!
//! Linear code is written leaves-first and ascends to the right, so the
//! rightmost unit is the root. An expression is
//!
//! ```text
//! exp <- tail? branch* stem
//! branch <- "(" exp ")"
//! ```
//!
//! where `stem` is the maximal trailing run of units and `tail` is whatever
//! precedes the branches (itself an `exp`). The parser splits off the stem,
//! then repeatedly peels the rightmost well-formed branch off what remains.

pub mod ast;
pub mod tokenizer;

use tracing::trace;

use crate::vocabulary::Vocabulary;
use crate::{Error, Result};
use ast::ParseTree;
use tokenizer::{render, Token};

/// Tokenize and parse an expression
pub fn parse_expression(expr: &str, vocabulary: &Vocabulary) -> Result<ParseTree> {
    let tokens = tokenizer::tokenize(expr, vocabulary)?;
    parse_tree(&tokens)
}

/// Rebuild the branch hierarchy of a flat token sequence.
///
/// # Errors
/// - `EmptyStem` if a (sub)expression does not end in a unit
/// - `MalformedBranch` if a `)`-terminated run (including the whole
///   expression) has no well-formed rightmost branch, or a run ends in a
///   dangling `(`
pub fn parse_tree(tokens: &[Token]) -> Result<ParseTree> {
    let split = tokens.iter().rposition(Token::is_paren).map_or(0, |i| i + 1);
    let (rest, stem) = tokens.split_at(split);

    if stem.is_empty() {
        match tokens.last() {
            Some(Token::Open) => {
                return Err(Error::MalformedBranch {
                    tokens: render(tokens),
                })
            }
            // A stray close is malformed; a well-formed trailing branch just lacks a stem
            Some(Token::Close) => {
                rightmost_branch(tokens)?;
            }
            _ => {}
        }
        return Err(Error::EmptyStem {
            tokens: render(tokens),
        });
    }

    trace!(stem = %render(stem), rest = %render(rest), "split stem");
    let subtrees = parse_subtrees(rest)?;
    Ok(ParseTree::new(stem.iter().rev().cloned().collect(), subtrees))
}

/// Parse everything to the left of a stem: branches and an optional tail
fn parse_subtrees(rest: &[Token]) -> Result<Vec<ParseTree>> {
    let mut remainder = rest;
    // Discovered right to left
    let mut branches = Vec::new();

    while remainder.last() == Some(&Token::Close) {
        let start = rightmost_branch(remainder)?;
        branches.push(&remainder[start + 1..remainder.len() - 1]);
        remainder = &remainder[..start];
    }

    let mut subtrees = Vec::with_capacity(branches.len() + 1);
    if !remainder.is_empty() {
        subtrees.push(parse_tree(remainder)?);
    }
    for branch in branches.into_iter().rev() {
        subtrees.push(parse_tree(branch)?);
    }
    Ok(subtrees)
}

/// Start of the rightmost `(`...`)` suffix of `tokens` that is balanced
fn rightmost_branch(tokens: &[Token]) -> Result<usize> {
    (0..tokens.len())
        .rev()
        .find(|&i| tokens[i] == Token::Open && is_branch(&tokens[i..]))
        .ok_or_else(|| Error::MalformedBranch {
            tokens: render(tokens),
        })
}

fn is_branch(tokens: &[Token]) -> bool {
    if tokens.first() != Some(&Token::Open) || tokens.last() != Some(&Token::Close) {
        return false;
    }
    let mut depth: usize = 0;
    for token in tokens {
        match token {
            Token::Open => depth += 1,
            Token::Close => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
