//! Unit vocabulary - the finite code sets the tokenizer recognises
//!
//! A vocabulary holds the bare unit codes (`M`, `GNb`, ...) and the
//! bond-annotated unit codes (`Mb4`, `GNb4`, ...). It is plain configuration:
//! built once, passed by reference into the tokenizer, never mutated.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::operator::OperatorKind;
use crate::{Error, Result};

/// Anomeric bond types that may precede a bond location
pub const BOND_TYPES: [char; 3] = ['a', 'b', '?'];

/// Bond locations appended to a unit to form a bonded code
pub const BOND_LOCATIONS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Residue codes of the linear code notation
pub const LINEAR_CODE_RESIDUES: [&str; 21] = [
    "G", "A", "GN", "AN", "M", "N", "NN", "NJ", "K", "W", "L", "I", "H", "F", "X", "B", "R", "U",
    "O", "P", "E",
];

/// Bare and bond-annotated unit codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    bare_units: BTreeSet<String>,
    bonded_units: BTreeSet<String>,
    longest_code: usize,
}

/// On-disk form: `bonded_units` may be omitted and is then derived
#[derive(Deserialize)]
struct VocabularyFile {
    bare_units: Vec<String>,
    #[serde(default)]
    bonded_units: Option<Vec<String>>,
}

impl Vocabulary {
    /// Build a vocabulary from explicit bare and bonded code sets.
    ///
    /// # Errors
    /// `InvalidVocabulary` if a code is empty, contains a parenthesis or an
    /// operator symbol, or if a bonded code does not end in a location digit.
    pub fn new<B, D>(bare_units: B, bonded_units: D) -> Result<Self>
    where
        B: IntoIterator,
        B::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let bare_units: BTreeSet<String> = bare_units.into_iter().map(Into::into).collect();
        let bonded_units: BTreeSet<String> = bonded_units.into_iter().map(Into::into).collect();

        for code in bare_units.iter().chain(bonded_units.iter()) {
            validate_code(code)?;
        }
        for code in &bonded_units {
            let mut chars = code.chars().rev();
            let ends_in_location = chars.next().is_some_and(|c| BOND_LOCATIONS.contains(&c));
            if !ends_in_location || chars.next().is_none() {
                return Err(Error::InvalidVocabulary(format!(
                    "bonded code '{}' must be a unit followed by a location digit",
                    code
                )));
            }
        }

        let longest_code = bare_units
            .iter()
            .chain(bonded_units.iter())
            .map(|code| code.chars().count())
            .max()
            .unwrap_or(0);

        Ok(Vocabulary {
            bare_units,
            bonded_units,
            longest_code,
        })
    }

    /// Build a vocabulary from bare codes, deriving every bonded code as a
    /// bare code followed by a location digit.
    pub fn from_units<B>(bare_units: B) -> Result<Self>
    where
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let bare: Vec<String> = bare_units.into_iter().map(Into::into).collect();
        let bonded = derive_bonded(&bare);
        Vocabulary::new(bare, bonded)
    }

    /// The built-in linear code vocabulary: every residue code alone and
    /// with an anomeric suffix, plus the derived bonded codes.
    pub fn linear_code() -> Self {
        let bare: Vec<String> = LINEAR_CODE_RESIDUES
            .iter()
            .flat_map(|residue| {
                std::iter::once(residue.to_string())
                    .chain(BOND_TYPES.iter().map(move |t| format!("{}{}", residue, t)))
            })
            .collect();
        let bonded = derive_bonded(&bare);
        let longest_code = bare
            .iter()
            .chain(bonded.iter())
            .map(|code| code.chars().count())
            .max()
            .unwrap_or(0);

        Vocabulary {
            bare_units: bare.into_iter().collect(),
            bonded_units: bonded.into_iter().collect(),
            longest_code,
        }
    }

    /// Parse a vocabulary from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        match file.bonded_units {
            Some(bonded) => Vocabulary::new(file.bare_units, bonded),
            None => Vocabulary::from_units(file.bare_units),
        }
    }

    /// Read and parse a JSON vocabulary file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let vocabulary = Vocabulary::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            bare = vocabulary.bare_units.len(),
            bonded = vocabulary.bonded_units.len(),
            "loaded vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn is_bare_unit(&self, code: &str) -> bool {
        self.bare_units.contains(code)
    }

    pub fn is_bonded_unit(&self, code: &str) -> bool {
        self.bonded_units.contains(code)
    }

    /// Length in characters of the longest code; no token can be longer
    pub fn longest_code(&self) -> usize {
        self.longest_code
    }

    pub fn bonded_units(&self) -> impl Iterator<Item = &str> {
        self.bonded_units.iter().map(String::as_str)
    }

    /// Every bond label: a bond type followed by a location or `?`
    pub fn bond_labels() -> BTreeSet<String> {
        BOND_TYPES
            .iter()
            .flat_map(|t| {
                BOND_LOCATIONS
                    .iter()
                    .chain(std::iter::once(&'?'))
                    .map(move |loc| format!("{}{}", t, loc))
            })
            .collect()
    }

    /// Split a bonded code into (unit, bond type, location).
    ///
    /// The location is the last character. The character before it is a
    /// bond type only if it is one of `ab?` and what precedes it is itself a
    /// bare unit.
    pub(crate) fn split_bonded<'c>(&self, code: &'c str) -> (&'c str, Option<char>, char) {
        let mut chars = code.char_indices().rev();
        let Some((loc_at, location)) = chars.next() else {
            return (code, None, '?');
        };
        let head = &code[..loc_at];
        if let Some((type_at, bond_type)) = chars.next() {
            let unit = &code[..type_at];
            if BOND_TYPES.contains(&bond_type) && self.is_bare_unit(unit) {
                return (unit, Some(bond_type), location);
            }
        }
        (head, None, location)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::linear_code()
    }
}

fn derive_bonded(bare: &[String]) -> Vec<String> {
    bare.iter()
        .flat_map(|unit| BOND_LOCATIONS.iter().map(move |loc| format!("{}{}", unit, loc)))
        .collect()
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::InvalidVocabulary("empty unit code".into()));
    }
    if code.contains(['(', ')']) {
        return Err(Error::InvalidVocabulary(format!(
            "unit code '{}' contains a parenthesis",
            code
        )));
    }
    if let Some(op) = OperatorKind::ALL.iter().find(|op| code.contains(op.symbol())) {
        return Err(Error::InvalidVocabulary(format!(
            "unit code '{}' contains the {} operator '{}'",
            code,
            op.name(),
            op.symbol()
        )));
    }
    Ok(())
}
