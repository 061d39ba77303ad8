//! Linear code tokenizer - splits an expression into units and parentheses
//!
//! Tokens come in three categories: parentheses, bond-annotated units
//! (`Mb4`) and bare units (`GN`). There are no separators in the notation,
//! so the tokenizer scans from the right and, at each step, peels off the
//! longest suffix that belongs to a category. Categories are tried in the
//! order parenthesis, bonded unit, bare unit.
//!
//! Guarantees:
//! - Deterministic: same input and vocabulary always produce the same tokens
//! - Lossless: concatenating the tokens' text reproduces the input exactly

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::vocabulary::Vocabulary;
use crate::{Error, Result};

/// A single token of a linear code expression.
///
/// Unit tokens are only built by the [`Tokenizer`], so their category always
/// agrees with their text:
///
/// ```rust,compile_fail
/// use gregex_core::Token;
///
/// let forged = Token::BareUnit { code: "(".into() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A unit code without bond information, e.g. `GN` or `Mb`
    #[non_exhaustive]
    BareUnit { code: String },
    /// A unit code followed by an optional bond type and a bond location
    #[non_exhaustive]
    BondedUnit {
        code: String,
        bond_type: Option<char>,
        location: char,
    },
}

impl Token {
    pub fn is_paren(&self) -> bool {
        matches!(self, Token::Open | Token::Close)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::BareUnit { code } => write!(f, "{}", code),
            Token::BondedUnit {
                code,
                bond_type,
                location,
            } => {
                write!(f, "{}", code)?;
                if let Some(t) = bond_type {
                    write!(f, "{}", t)?;
                }
                write!(f, "{}", location)
            }
        }
    }
}

/// Concatenated text of a run of tokens
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

/// An ordered run of tokens read left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.0
    }

    /// The expression text the tokens were read from
    pub fn text(&self) -> String {
        render(&self.0)
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in &self.0 {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Right-greedy tokenizer over a fixed vocabulary
pub struct Tokenizer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Tokenizer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Tokenizer { vocabulary }
    }

    /// Tokenize an entire expression.
    ///
    /// # Errors
    /// `Tokenization` when some suffix of the untokenized remainder belongs
    /// to no category. The error carries the text tokenized so far and the
    /// remainder; no partial result is returned.
    pub fn tokenize(&self, expr: &str) -> Result<TokenSequence> {
        let mut reversed = Vec::new();
        let mut end = expr.len();

        while end > 0 {
            let remainder = &expr[..end];
            match self.peel(remainder) {
                Some((start, token)) => {
                    reversed.push(token);
                    end = start;
                }
                None => {
                    reversed.reverse();
                    let consumed = render(&reversed);
                    tracing::debug!(%consumed, %remainder, "tokenization failed");
                    return Err(Error::Tokenization {
                        consumed,
                        remainder: remainder.to_string(),
                    });
                }
            }
        }

        reversed.reverse();
        Ok(TokenSequence(reversed))
    }

    /// Peel the longest categorised suffix off `remainder`, returning its
    /// byte offset and token.
    fn peel(&self, remainder: &str) -> Option<(usize, Token)> {
        let limit = self.vocabulary.longest_code().max(1);
        let starts: Vec<usize> = remainder
            .char_indices()
            .rev()
            .take(limit)
            .map(|(i, _)| i)
            .collect();

        starts
            .into_iter()
            .rev()
            .find_map(|start| self.classify(&remainder[start..]).map(|t| (start, t)))
    }

    fn classify(&self, text: &str) -> Option<Token> {
        match text {
            "(" => Some(Token::Open),
            ")" => Some(Token::Close),
            _ if self.vocabulary.is_bonded_unit(text) => {
                let (code, bond_type, location) = self.vocabulary.split_bonded(text);
                Some(Token::BondedUnit {
                    code: code.to_string(),
                    bond_type,
                    location,
                })
            }
            _ if self.vocabulary.is_bare_unit(text) => Some(Token::BareUnit {
                code: text.to_string(),
            }),
            _ => None,
        }
    }
}

/// Tokenize `expr` with `vocabulary`
pub fn tokenize(expr: &str, vocabulary: &Vocabulary) -> Result<TokenSequence> {
    Tokenizer::new(vocabulary).tokenize(expr)
}
