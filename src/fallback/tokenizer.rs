//! Coding-effect tokenizer
//!
//! Splits a coding-effect string such as `229C>A` or `45+3_45+5del` into an
//! [`OperationKind`], the position-range text to its left and the operand
//! text to its right.

use std::fmt;

use crate::error::FerroError;
use crate::sequence;

/// Kind of edit named by a coding effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Substitution,
    Deletion,
    Insertion,
    Duplication,
    DeletionInsertion,
}

impl OperationKind {
    /// Delimiter that introduces this operation in a coding effect
    pub fn delimiter(&self) -> &'static str {
        match self {
            OperationKind::Substitution => ">",
            OperationKind::Deletion => "del",
            OperationKind::Insertion => "ins",
            OperationKind::Duplication => "dup",
            OperationKind::DeletionInsertion => "delins",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Substitution => "substitution",
            OperationKind::Deletion => "deletion",
            OperationKind::Insertion => "insertion",
            OperationKind::Duplication => "duplication",
            OperationKind::DeletionInsertion => "deletion-insertion",
        };
        write!(f, "{}", name)
    }
}

/// Delimiters in the order they are tried
///
/// `delins` must precede both `del` and `ins`, otherwise `10_12delinsAT`
/// would be read as a deletion of `insAT`.
pub const DELIMITER_PRIORITY: [OperationKind; 5] = [
    OperationKind::Substitution,
    OperationKind::DeletionInsertion,
    OperationKind::Deletion,
    OperationKind::Insertion,
    OperationKind::Duplication,
];

/// A coding effect split at its operation delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizedEffect<'a> {
    pub kind: OperationKind,
    /// Position-range text, e.g. `45+3_45+5`
    pub range: &'a str,
    /// Text after the delimiter, e.g. `ACGT`, `48` or empty
    pub operand: &'a str,
}

/// Split a coding effect into operation kind, range text and operand text
///
/// The input must already have HTML entities unescaped. For substitutions
/// any letters in the range text (the stated reference base, as in `229C`)
/// are dropped; the reference is always re-read from the genome.
///
/// # Errors
///
/// [`FerroError::UnrecognizedNotation`] when none of the delimiters in
/// [`DELIMITER_PRIORITY`] occurs.
pub fn tokenize(effect: &str) -> Result<TokenizedEffect<'_>, FerroError> {
    for kind in DELIMITER_PRIORITY {
        if let Some((range, operand)) = effect.split_once(kind.delimiter()) {
            let range = if kind == OperationKind::Substitution {
                strip_stated_reference(range)
            } else {
                range
            };
            log::trace!("tokenized '{}' as {} [{}|{}]", effect, kind, range, operand);
            return Ok(TokenizedEffect {
                kind,
                range,
                operand,
            });
        }
    }

    Err(FerroError::UnrecognizedNotation {
        notation: effect.to_string(),
    })
}

/// Trim the stated reference bases from a substitution range (`229C` → `229`)
///
/// Only leading and trailing letters are removed, so the result stays a
/// borrowed slice; letters inside a range are left for the range parser to
/// reject.
fn strip_stated_reference(range: &str) -> &str {
    range.trim_matches(|c: char| c.is_ascii_alphabetic())
}

/// Operand of a coding effect, classified
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Operand {
    /// Nothing after the delimiter (`45del`)
    #[default]
    None,
    /// A bare base count (`del48`, `ins3`)
    Count(u64),
    /// Literal bases, uppercased (`insACGT`)
    Bases(String),
}

impl Operand {
    /// Classify operand text
    ///
    /// Empty text is [`Operand::None`], digits are a [`Operand::Count`] and
    /// letters are [`Operand::Bases`]. `notation` is only used in errors.
    ///
    /// # Errors
    ///
    /// [`FerroError::InvalidBase`] for letters outside `{A,C,G,T,N}` and
    /// [`FerroError::InvalidOperand`] for anything else.
    pub fn parse(text: &str, notation: &str) -> Result<Self, FerroError> {
        let text = text.trim();
        let invalid = || FerroError::InvalidOperand {
            operand: text.to_string(),
            notation: notation.to_string(),
        };

        if text.is_empty() {
            Ok(Operand::None)
        } else if text.chars().all(|c| c.is_ascii_digit()) {
            text.parse().map(Operand::Count).map_err(|_| invalid())
        } else if text.chars().all(|c| c.is_ascii_alphabetic()) {
            sequence::normalize_bases(text).map(Operand::Bases)
        } else {
            Err(invalid())
        }
    }

    /// Length implied by the operand, if it implies one
    pub fn implied_length(&self) -> Option<u64> {
        match self {
            Operand::None => None,
            Operand::Count(n) => Some(*n),
            Operand::Bases(bases) => Some(bases.len() as u64),
        }
    }

    /// True when the operand is a literal base payload
    pub fn is_literal(&self) -> bool {
        matches!(self, Operand::Bases(_))
    }
}
