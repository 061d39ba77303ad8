//! Substitution validator - can a literal stand in for the expression's operator?
//!
//! An expression carries at most one uncertainty operator. A candidate
//! substitution is valid when it matches that operator and the expression
//! with the operator replaced still has balanced parentheses. Balance is the
//! only well-formedness check performed.

use tracing::debug;

use crate::operator::{has_balanced_parens, OperatorKind};
use crate::{Error, Result};

/// The operator present in `expr`, if any.
///
/// # Errors
/// `AmbiguousOperator` when more than one operator occurrence (of any mix of
/// kinds) is present.
pub fn locate_operator(expr: &str) -> Result<Option<OperatorKind>> {
    let counts: Vec<(OperatorKind, usize)> = OperatorKind::ALL
        .iter()
        .map(|op| (*op, op.count_in(expr)))
        .collect();
    let total: usize = counts.iter().map(|(_, n)| n).sum();

    if total > 1 {
        return Err(Error::AmbiguousOperator {
            count: total,
            expression: expr.to_string(),
        });
    }
    Ok(counts
        .into_iter()
        .find(|(_, n)| *n == 1)
        .map(|(op, _)| op))
}

/// Whether `substitution` is a valid replacement for the operator in `expr`.
///
/// With no operator present only an absent or empty substitution is valid.
pub fn check(expr: &str, substitution: Option<&str>) -> Result<bool> {
    let substitution = substitution.unwrap_or_default();

    let Some(operator) = locate_operator(expr)? else {
        debug!(expression = %expr, "no uncertainty operator present");
        return Ok(substitution.is_empty());
    };

    if !operator.matches(substitution) {
        debug!(%substitution, operator = %operator, "substitution cannot match operator");
        return Ok(false);
    }

    let substituted = expr.replacen(operator.symbol(), substitution, 1);
    Ok(has_balanced_parens(&substituted))
}
