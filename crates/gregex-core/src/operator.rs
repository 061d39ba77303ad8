//! Uncertainty operators and their structural predicates
//!
//! Each operator stands for an unknown, possibly empty fragment of an
//! expression. Whether a fragment can stand in for an operator depends only
//! on its parentheses, so every predicate works on the fragment's text.
//! Parentheses never occur inside unit codes, which makes a character-level
//! check equivalent to a token-level one.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The three uncertainty operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// `...` - any balanced fragment
    Ligand,
    /// `_` - a fragment with no dangling open parenthesis
    Continuation,
    /// `|` - closes followed by at most one bracketed branch
    PossibleBranchPoint,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 3] = [
        OperatorKind::Ligand,
        OperatorKind::Continuation,
        OperatorKind::PossibleBranchPoint,
    ];

    /// The operator's token as written in an expression
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Ligand => "...",
            OperatorKind::Continuation => "_",
            OperatorKind::PossibleBranchPoint => "|",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Ligand => "ligand",
            OperatorKind::Continuation => "continuation",
            OperatorKind::PossibleBranchPoint => "possible branch point",
        }
    }

    /// Non-overlapping occurrences of the operator's symbol in `expr`
    pub fn count_in(self, expr: &str) -> usize {
        expr.matches(self.symbol()).count()
    }

    /// Whether `text` (in its entirety) could be substituted for this operator
    pub fn matches(self, text: &str) -> bool {
        match self {
            OperatorKind::Ligand => is_ligand_match(text),
            OperatorKind::Continuation => is_continuation_match(text),
            OperatorKind::PossibleBranchPoint => is_possible_branch_point_match(text),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for OperatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "..." | "ligand" => Ok(OperatorKind::Ligand),
            "_" | "continuation" => Ok(OperatorKind::Continuation),
            "|" | "branch" | "possible-branch-point" => Ok(OperatorKind::PossibleBranchPoint),
            other => Err(Error::UnknownOperator(other.to_string())),
        }
    }
}

// ── Parenthesis checks ────────────────────────────────────

/// Every `(` has a later matching `)` and no `)` comes before its `(`
pub fn has_balanced_parens(text: &str) -> bool {
    let mut depth: usize = 0;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// Every `(` has a later matching `)`; unmatched `)` are ignored
pub fn every_open_paren_is_closed(text: &str) -> bool {
    let mut depth: usize = 0;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth == 0
}

// ── Operator predicates ───────────────────────────────────

pub fn is_ligand_match(text: &str) -> bool {
    text.is_empty() || has_balanced_parens(text)
}

pub fn is_continuation_match(text: &str) -> bool {
    text.is_empty() || every_open_paren_is_closed(text)
}

/// Empty, `)`, `)` followed by a match, or `(` L `)` with L balanced.
///
/// Unrolled: any run of leading `)` followed by nothing or by a single
/// bracketed branch with a balanced interior.
pub fn is_possible_branch_point_match(text: &str) -> bool {
    let rest = text.trim_start_matches(')');
    if rest.is_empty() {
        return true;
    }
    match rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(interior) => is_ligand_match(interior),
        None => false,
    }
}
