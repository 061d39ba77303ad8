//! Comparator - set algebra between two operators' matches
//!
//! Both operators are run over the same tokenization. Every window lands in
//! one operator's matches or its non-matches; the four result sets are
//! built from those splits.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::analyzer::MatchRecord;
use crate::operator::OperatorKind;
use crate::parser::tokenizer::{tokenize, Token};
use crate::vocabulary::Vocabulary;
use crate::window::windows;
use crate::Result;

/// The four-way split of two operators' matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Matched by A and by B
    pub both: BTreeSet<MatchRecord>,
    /// Matched by A only
    pub just_a: BTreeSet<MatchRecord>,
    /// Matched by B only
    pub just_b: BTreeSet<MatchRecord>,
    /// Rejected by A or by B.
    ///
    /// This is the union of each operator's non-matches, not their
    /// intersection: a window rejected by only one operator is included.
    pub neither: BTreeSet<MatchRecord>,
}

struct Split {
    matches: BTreeSet<MatchRecord>,
    non_matches: BTreeSet<MatchRecord>,
}

fn split(tokens: &[Token], operator: OperatorKind, with_context: bool) -> Split {
    let (matches, non_matches): (Vec<_>, Vec<_>) =
        windows(tokens).partition(|w| operator.matches(&w.matched_text()));
    let records = |ws: Vec<_>| -> BTreeSet<MatchRecord> {
        ws.iter()
            .map(|w| MatchRecord::from_window(w, with_context))
            .collect()
    };
    Split {
        matches: records(matches),
        non_matches: records(non_matches),
    }
}

/// Keep the first record (in sort order) for each match text
fn one_per_match_text(records: BTreeSet<MatchRecord>) -> BTreeSet<MatchRecord> {
    let mut seen: Option<String> = None;
    records
        .into_iter()
        .filter(|record| {
            if seen.as_deref() == Some(record.matched.as_str()) {
                return false;
            }
            seen = Some(record.matched.clone());
            true
        })
        .collect()
}

/// Compare what `a` and `b` match in `expr`.
///
/// Records carry context when `with_context` is set. A window lands in
/// `both`, `just_a` or `just_b` by which operators accept its match text.
///
/// `uniqueness_includes_context` decides what counts as a distinct record
/// when context is carried. If set, every distinct (left, match, right)
/// record is reported. If cleared, each set holds one record per match
/// text, the one whose context sorts first. Without context the flag has no
/// effect.
pub fn compare(
    a: OperatorKind,
    b: OperatorKind,
    expr: &str,
    with_context: bool,
    uniqueness_includes_context: bool,
    vocabulary: &Vocabulary,
) -> Result<Comparison> {
    let tokens = tokenize(expr, vocabulary)?;

    let a_split = split(&tokens, a, with_context);
    let b_split = split(&tokens, b, with_context);
    debug!(
        a = %a,
        b = %b,
        a_matches = a_split.matches.len(),
        b_matches = b_split.matches.len(),
        "split windows"
    );

    let mut comparison = Comparison::default();
    for record in &a_split.matches {
        if b_split.matches.contains(record) {
            comparison.both.insert(record.clone());
        } else {
            comparison.just_a.insert(record.clone());
        }
    }
    comparison.just_b = b_split
        .matches
        .difference(&a_split.matches)
        .cloned()
        .collect();
    comparison.neither = a_split
        .non_matches
        .union(&b_split.non_matches)
        .cloned()
        .collect();

    if with_context && !uniqueness_includes_context {
        debug!("collapsing records to one per match text");
        comparison = Comparison {
            both: one_per_match_text(comparison.both),
            just_a: one_per_match_text(comparison.just_a),
            just_b: one_per_match_text(comparison.just_b),
            neither: one_per_match_text(comparison.neither),
        };
    }

    Ok(comparison)
}
