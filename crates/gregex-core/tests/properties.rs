//! Property-based tests for tokenization, window enumeration and matching
//!
//! Expressions are generated from a small abstract vocabulary ({X, Y, Z} plus
//! their bonded forms) so every generated string is tokenizable, but the
//! parentheses are placed freely and need not balance.

use std::collections::BTreeSet;

use gregex_core::operator::{has_balanced_parens, OperatorKind};
use gregex_core::window::{window_count, windows};
use gregex_core::{analyze, check, compare, tokenize, MatchRecord, Vocabulary};
use proptest::prelude::*;

fn vocabulary() -> Vocabulary {
    Vocabulary::from_units(["X", "Y", "Z"]).unwrap()
}

/// Generate an expression from units, bonded units and parentheses
fn expression_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        3 => Just("X"),
        2 => Just("Y"),
        2 => Just("Z"),
        1 => Just("X4"),
        1 => Just("Y6"),
        2 => Just("("),
        2 => Just(")"),
    ];
    prop::collection::vec(piece, 0..10).prop_map(|pieces| pieces.concat())
}

fn operator_strategy() -> impl Strategy<Value = OperatorKind> {
    prop_oneof![
        Just(OperatorKind::Ligand),
        Just(OperatorKind::Continuation),
        Just(OperatorKind::PossibleBranchPoint),
    ]
}

proptest! {
    #[test]
    fn tokenization_reproduces_input(expr in expression_strategy()) {
        let tokens = tokenize(&expr, &vocabulary()).unwrap();
        prop_assert_eq!(tokens.text(), expr);
    }

    #[test]
    fn windows_cover_and_reconstruct(expr in expression_strategy()) {
        let tokens = tokenize(&expr, &vocabulary()).unwrap();
        let all: Vec<_> = windows(&tokens).collect();
        prop_assert_eq!(all.len(), window_count(tokens.len()));
        for w in all {
            let joined = format!("{}{}{}", w.left_text(), w.matched_text(), w.right_text());
            prop_assert_eq!(joined, expr.clone());
        }
    }

    #[test]
    fn ligand_matches_are_continuation_matches(expr in expression_strategy()) {
        let vocab = vocabulary();
        let ligand: BTreeSet<MatchRecord> =
            analyze(&expr, OperatorKind::Ligand, None, true, &vocab).unwrap().into_iter().collect();
        let continuation: BTreeSet<MatchRecord> =
            analyze(&expr, OperatorKind::Continuation, None, true, &vocab).unwrap().into_iter().collect();
        prop_assert!(ligand.is_subset(&continuation));
    }

    #[test]
    fn analyzer_output_sorted_unique_and_matching(
        expr in expression_strategy(),
        op in operator_strategy(),
        with_context in any::<bool>(),
    ) {
        let records = analyze(&expr, op, None, with_context, &vocabulary()).unwrap();
        for pair in records.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for record in &records {
            prop_assert!(op.matches(&record.matched));
            prop_assert_eq!(record.left.is_some(), with_context);
        }
    }

    #[test]
    fn analyzer_is_idempotent(
        expr in expression_strategy(),
        op in operator_strategy(),
        substitution in expression_strategy(),
    ) {
        let vocab = vocabulary();
        let first = analyze(&expr, op, Some(&substitution), false, &vocab).unwrap();
        let second = analyze(&expr, op, Some(&substitution), false, &vocab).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn comparator_sets_are_disjoint(
        expr in expression_strategy(),
        a in operator_strategy(),
        b in operator_strategy(),
        with_context in any::<bool>(),
    ) {
        let cmp = compare(a, b, &expr, with_context, true, &vocabulary()).unwrap();
        prop_assert!(cmp.both.is_disjoint(&cmp.just_a));
        prop_assert!(cmp.both.is_disjoint(&cmp.just_b));

        let a_matches: BTreeSet<MatchRecord> =
            analyze(&expr, a, None, with_context, &vocabulary()).unwrap().into_iter().collect();
        let a_side: BTreeSet<MatchRecord> = cmp
            .just_a
            .union(&cmp.both)
            .filter(|r| a_matches.contains(*r))
            .cloned()
            .collect();
        prop_assert_eq!(a_side, a_matches);
    }

    #[test]
    fn restoring_a_ligand_window_is_valid(expr in expression_strategy()) {
        prop_assume!(has_balanced_parens(&expr));
        let tokens = tokenize(&expr, &vocabulary()).unwrap();
        for w in windows(&tokens) {
            let matched = w.matched_text();
            if OperatorKind::Ligand.matches(&matched) {
                let with_operator = format!("{}...{}", w.left_text(), w.right_text());
                prop_assert!(check(&with_operator, Some(&matched)).unwrap());
            }
        }
    }
}
