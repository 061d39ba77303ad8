//! Python bindings for gregex
//!
//! Thin wrapper around `gregex-core`. Every function uses the built-in
//! linear code vocabulary; structured results are returned as JSON strings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use gregex_core::{OperatorKind, TreeStyle, Vocabulary};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn operator(op: &str) -> PyResult<OperatorKind> {
    op.parse().map_err(value_error)
}

/// Split a linear code expression into token strings.
///
/// Args:
///     lce: linear code expression
///
/// Returns:
///     List of token texts in reading order
///
/// Raises:
///     ValueError: If the expression cannot be tokenized
#[pyfunction]
fn tokenizer(lce: &str) -> PyResult<Vec<String>> {
    let tokens = gregex_core::tokenize(lce, &Vocabulary::linear_code()).map_err(value_error)?;
    Ok(tokens.iter().map(ToString::to_string).collect())
}

/// Every span of `lce` the operator could stand for.
///
/// Args:
///     lce: linear code expression without any operator
///     op: "...", "_", "|" or "ligand", "continuation", "branch"
///     substitution: candidate to check against every match
///     with_context: include left and right context
///
/// Returns:
///     JSON array of {"match", "left"?, "right"?, "valid"?} records
///
/// Raises:
///     ValueError: If `op` is unknown, `lce` already contains an operator,
///         or `lce` cannot be tokenized
#[pyfunction]
#[pyo3(signature = (lce, op, substitution=None, with_context=false))]
fn analyze_matches(
    lce: &str,
    op: &str,
    substitution: Option<&str>,
    with_context: bool,
) -> PyResult<String> {
    let records = gregex_core::analyze(
        lce,
        operator(op)?,
        substitution,
        with_context,
        &Vocabulary::linear_code(),
    )
    .map_err(value_error)?;
    serde_json::to_string(&records).map_err(value_error)
}

/// Whether `substitution` may replace the single operator in `lce`.
///
/// Args:
///     lce: linear code expression with at most one operator
///     substitution: candidate fragment (empty when omitted)
///
/// Returns:
///     True if the substitution matches the operator and the substituted
///     expression has balanced parentheses. With no operator present, True
///     only for an empty substitution.
///
/// Raises:
///     ValueError: If more than one operator occurs in `lce`
#[pyfunction]
#[pyo3(signature = (lce, substitution=None))]
fn check_match(lce: &str, substitution: Option<&str>) -> PyResult<bool> {
    gregex_core::check(lce, substitution).map_err(value_error)
}

/// Compare the matches of two operators.
///
/// Args:
///     a, b: operators, as symbols or names
///     lce: linear code expression
///     with_contexts: include left and right context in every record
///     include_contexts_in_uniqueness: with contexts, report every distinct
///         context; otherwise one record per match text
///
/// Returns:
///     JSON object with "both", "just_a", "just_b" and "neither" arrays
///
/// Raises:
///     ValueError: If an operator is unknown or `lce` cannot be tokenized
#[pyfunction]
#[pyo3(signature = (a, b, lce, with_contexts=false, include_contexts_in_uniqueness=true))]
fn compare_matches(
    a: &str,
    b: &str,
    lce: &str,
    with_contexts: bool,
    include_contexts_in_uniqueness: bool,
) -> PyResult<String> {
    let comparison = gregex_core::compare(
        operator(a)?,
        operator(b)?,
        lce,
        with_contexts,
        include_contexts_in_uniqueness,
        &Vocabulary::linear_code(),
    )
    .map_err(value_error)?;
    serde_json::to_string(&comparison).map_err(value_error)
}

/// Parse `lce` into its branch structure.
///
/// Args:
///     lce: linear code expression
///     style: "stem-and-subtrees" or "func-and-args" (JSON), or "s-exp"
///
/// Returns:
///     The rendered tree
///
/// Raises:
///     ValueError: If the style is unknown or `lce` cannot be parsed
#[pyfunction]
#[pyo3(signature = (lce, style="stem-and-subtrees"))]
fn parse_exp(lce: &str, style: &str) -> PyResult<String> {
    let style: TreeStyle = style.parse().map_err(value_error)?;
    let tree =
        gregex_core::parse_expression(lce, &Vocabulary::linear_code()).map_err(value_error)?;
    tree.render(style, true).map_err(value_error)
}

/// Whether `text` can stand for the ligand operator `...`.
///
/// Args:
///     text: candidate fragment
///
/// Returns:
///     True if `text` is empty or has balanced parentheses
#[pyfunction]
fn is_ligand_match(text: &str) -> bool {
    gregex_core::operator::is_ligand_match(text)
}

/// Whether `text` can stand for the continuation operator `_`.
///
/// Args:
///     text: candidate fragment
///
/// Returns:
///     True if every `(` in `text` is later closed; stray `)` are allowed
#[pyfunction]
fn is_continuation_match(text: &str) -> bool {
    gregex_core::operator::is_continuation_match(text)
}

/// Whether `text` can stand for the possible branch point operator `|`.
///
/// Args:
///     text: candidate fragment
///
/// Returns:
///     True if `text` is a run of `)` followed by nothing or by a single
///     bracketed branch with a balanced interior
#[pyfunction]
fn is_possible_branch_point_match(text: &str) -> bool {
    gregex_core::operator::is_possible_branch_point_match(text)
}

/// gregex Python module
#[pymodule]
fn gregex(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tokenizer, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_matches, m)?)?;
    m.add_function(wrap_pyfunction!(check_match, m)?)?;
    m.add_function(wrap_pyfunction!(compare_matches, m)?)?;
    m.add_function(wrap_pyfunction!(parse_exp, m)?)?;
    m.add_function(wrap_pyfunction!(is_ligand_match, m)?)?;
    m.add_function(wrap_pyfunction!(is_continuation_match, m)?)?;
    m.add_function(wrap_pyfunction!(is_possible_branch_point_match, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
