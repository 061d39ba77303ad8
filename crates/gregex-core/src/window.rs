//! Window generator - every contiguous run of tokens with its context
//!
//! For `n` tokens there are exactly `n(n+1)/2` non-empty windows. They are
//! produced start-major: for each start `i`, every end `j > i`.

use crate::parser::tokenizer::{render, Token};

/// A contiguous run of tokens together with what surrounds it.
///
/// `left ++ matched ++ right` is always the full sequence the window was
/// drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'t> {
    pub left: &'t [Token],
    pub matched: &'t [Token],
    pub right: &'t [Token],
}

impl Window<'_> {
    pub fn left_text(&self) -> String {
        render(self.left)
    }

    pub fn matched_text(&self) -> String {
        render(self.matched)
    }

    pub fn right_text(&self) -> String {
        render(self.right)
    }
}

/// Every non-empty window of `tokens`, with left and right context
pub fn windows(tokens: &[Token]) -> impl Iterator<Item = Window<'_>> + '_ {
    let n = tokens.len();
    (0..n).flat_map(move |i| {
        (i + 1..=n).map(move |j| Window {
            left: &tokens[..i],
            matched: &tokens[i..j],
            right: &tokens[j..],
        })
    })
}

/// Every non-empty contiguous subsequence of `tokens`, without context
pub fn subsequences(tokens: &[Token]) -> impl Iterator<Item = &[Token]> + '_ {
    windows(tokens).map(|w| w.matched)
}

/// Number of windows [`windows`] yields for `n` tokens
pub fn window_count(n: usize) -> usize {
    n * (n + 1) / 2
}
