//! Match analyzer - which spans of an expression an operator can stand for
//!
//! # Pipeline
//!
//! `expression → tokenize → windows → operator predicate → sort → dedup`
//!
//! and, when a candidate substitution is given, each surviving window is
//! annotated with whether substituting the candidate for it leaves the whole
//! expression balanced.
//!
//! # Guarantees
//!
//! - **Deterministic**: output order is the sort order of the records, never
//!   the enumeration (or thread scheduling) order
//! - **Idempotent**: repeated calls with the same arguments return identical
//!   results

use serde::Serialize;
use tracing::debug;

use crate::operator::{has_balanced_parens, OperatorKind};
use crate::parser::tokenizer::{tokenize, Token};
use crate::vocabulary::Vocabulary;
use crate::window::{window_count, windows, Window};
use crate::{Error, Result};

// ── Records ───────────────────────────────────────────────

/// One analyzer result row.
///
/// `left`/`right` are present only when context was requested and `valid`
/// only when a substitution was supplied. Ordering compares the match text
/// first, then left and right context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MatchRecord {
    #[serde(rename = "match")]
    pub matched: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl MatchRecord {
    pub fn bare(matched: impl Into<String>) -> Self {
        MatchRecord {
            matched: matched.into(),
            left: None,
            right: None,
            valid: None,
        }
    }

    pub fn in_context(
        left: impl Into<String>,
        matched: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        MatchRecord {
            matched: matched.into(),
            left: Some(left.into()),
            right: Some(right.into()),
            valid: None,
        }
    }

    pub(crate) fn from_window(window: &Window<'_>, with_context: bool) -> Self {
        if with_context {
            MatchRecord::in_context(
                window.left_text(),
                window.matched_text(),
                window.right_text(),
            )
        } else {
            MatchRecord::bare(window.matched_text())
        }
    }

    pub fn with_validity(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    /// Drop left and right context, keeping the match and any validity flag
    pub fn without_context(mut self) -> Self {
        self.left = None;
        self.right = None;
        self
    }

    /// Present fields in display order: left, match, right, valid
    pub fn columns(&self) -> Vec<String> {
        let mut cols = Vec::with_capacity(4);
        if let Some(left) = &self.left {
            cols.push(left.clone());
        }
        cols.push(self.matched.clone());
        if let Some(right) = &self.right {
            cols.push(right.clone());
        }
        if let Some(valid) = self.valid {
            cols.push(valid.to_string());
        }
        cols
    }

    /// Column names matching [`MatchRecord::columns`] for the given mode
    pub fn headers(with_context: bool, with_substitution: bool) -> Vec<&'static str> {
        let mut cols = Vec::with_capacity(4);
        if with_context {
            cols.extend(["left_context", "match", "right_context"]);
        } else {
            cols.push("match");
        }
        if with_substitution {
            cols.push("valid_sub?");
        }
        cols
    }
}

// ── Window filtering ──────────────────────────────────────

/// Windows of `tokens` whose match text satisfies `operator`, in
/// enumeration order
pub fn matching_windows(tokens: &[Token], operator: OperatorKind) -> Vec<Window<'_>> {
    let is_match = |w: &Window<'_>| operator.matches(&w.matched_text());

    #[cfg(feature = "parallel")]
    let matched: Vec<Window<'_>> = {
        use rayon::prelude::*;
        let candidates: Vec<Window<'_>> = windows(tokens).collect();
        candidates.into_par_iter().filter(is_match).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let matched: Vec<Window<'_>> = windows(tokens).filter(is_match).collect();

    matched
}

/// Fail if any operator symbol already occurs in `expr`
pub(crate) fn ensure_operator_free(expr: &str) -> Result<()> {
    match OperatorKind::ALL.iter().find(|op| op.count_in(expr) > 0) {
        Some(op) => Err(Error::DuplicateOperator {
            operator: op.symbol().to_string(),
            expression: expr.to_string(),
        }),
        None => Ok(()),
    }
}

// ── Public API ────────────────────────────────────────────

/// Every distinct span of `expr` that `operator` could stand for.
///
/// Records are sorted by match text, then left and right context, and
/// deduplicated over whichever fields are present:
///
/// | substitution | context | record            |
/// |--------------|---------|-------------------|
/// | no           | no      | match             |
/// | no           | yes     | left, match, right |
/// | yes          | no      | match, valid      |
/// | yes          | yes     | left, match, right, valid |
///
/// `valid` is true iff the substitution itself matches `operator` and
/// `left + substitution + right` has balanced parentheses. Without context a
/// match text may appear twice, once per validity outcome.
///
/// # Errors
/// `DuplicateOperator` if `expr` already contains an operator symbol;
/// `Tokenization` if `expr` cannot be tokenized.
pub fn analyze(
    expr: &str,
    operator: OperatorKind,
    substitution: Option<&str>,
    with_context: bool,
    vocabulary: &Vocabulary,
) -> Result<Vec<MatchRecord>> {
    ensure_operator_free(expr)?;
    let tokens = tokenize(expr, vocabulary)?;

    debug!(
        operator = %operator,
        tokens = tokens.len(),
        windows = window_count(tokens.len()),
        "enumerating windows with context"
    );
    let mut records: Vec<MatchRecord> = matching_windows(&tokens, operator)
        .iter()
        .map(|w| MatchRecord::from_window(w, true))
        .collect();

    debug!(matches = records.len(), "sorting and removing duplicates");
    records.sort();
    records.dedup();

    let Some(substitution) = substitution else {
        if with_context {
            return Ok(records);
        }
        return Ok(collapse(records));
    };

    let substitution_matches = operator.matches(substitution);
    if !substitution_matches {
        debug!(
            %substitution,
            operator = %operator,
            "substitution can never stand for the operator"
        );
    }

    debug!("adding well-formedness result to every match");
    let annotated: Vec<MatchRecord> = records
        .into_iter()
        .map(|record| {
            let valid = substitution_matches && substitutes_cleanly(&record, substitution);
            record.with_validity(valid)
        })
        .collect();

    if with_context {
        Ok(annotated)
    } else {
        Ok(collapse(annotated))
    }
}

/// Drop context, then re-sort and deduplicate what remains
fn collapse(records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let mut collapsed: Vec<MatchRecord> = records
        .into_iter()
        .map(MatchRecord::without_context)
        .collect();
    collapsed.sort();
    collapsed.dedup();
    collapsed
}

fn substitutes_cleanly(record: &MatchRecord, substitution: &str) -> bool {
    let left = record.left.as_deref().unwrap_or_default();
    let right = record.right.as_deref().unwrap_or_default();
    let mut whole = String::with_capacity(left.len() + substitution.len() + right.len());
    whole.push_str(left);
    whole.push_str(substitution);
    whole.push_str(right);
    has_balanced_parens(&whole)
}
