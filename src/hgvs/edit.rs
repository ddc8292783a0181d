//! Nucleic acid edits
//!
//! The subset of HGVS edits that can be placed on the genome as a single
//! biallelic VCF record: substitutions, deletions, duplications, insertions
//! and deletion-insertions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bases inserted by an `ins` or `delins` edit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertedSequence {
    /// Literal bases on the transcript strand (e.g., `insACGT`)
    Literal(String),
    /// Bare count of unspecified bases (e.g., `ins10`)
    Count(u64),
}

impl InsertedSequence {
    /// Number of inserted bases
    pub fn len(&self) -> u64 {
        match self {
            InsertedSequence::Literal(s) => s.len() as u64,
            InsertedSequence::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for InsertedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertedSequence::Literal(s) => write!(f, "{}", s),
            InsertedSequence::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Nucleic acid edit types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NaEdit {
    /// Substitution: single base change (e.g., A>G)
    Substitution { reference: char, alternative: char },

    /// Substitution without reference base (e.g., >A)
    SubstitutionNoRef { alternative: char },

    /// Deletion (e.g., del, delA, del3)
    Deletion {
        sequence: Option<String>,
        /// Explicit length of deleted region (e.g., del3)
        length: Option<u64>,
    },

    /// Duplication (e.g., dup, dupATG, dup3)
    Duplication {
        sequence: Option<String>,
        /// Explicit length of duplicated region (e.g., dup3)
        length: Option<u64>,
    },

    /// Insertion between two adjacent positions (e.g., insATG, ins10)
    Insertion { sequence: InsertedSequence },

    /// Deletion-insertion (e.g., delinsATG)
    Delins { sequence: InsertedSequence },
}

impl NaEdit {
    /// Short name of the edit type
    pub fn edit_type(&self) -> &'static str {
        match self {
            NaEdit::Substitution { .. } | NaEdit::SubstitutionNoRef { .. } => "substitution",
            NaEdit::Deletion { .. } => "deletion",
            NaEdit::Duplication { .. } => "duplication",
            NaEdit::Insertion { .. } => "insertion",
            NaEdit::Delins { .. } => "delins",
        }
    }

    /// Length of the affected reference span stated by the edit, if any
    ///
    /// Only deletions and duplications can state it (`delACG`, `del3`).
    pub fn stated_length(&self) -> Option<u64> {
        match self {
            NaEdit::Deletion { sequence, length } | NaEdit::Duplication { sequence, length } => {
                length.or_else(|| sequence.as_ref().map(|s| s.len() as u64))
            }
            _ => None,
        }
    }
}

impl fmt::Display for NaEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stated = |f: &mut fmt::Formatter<'_>, seq: &Option<String>, len: &Option<u64>| {
            match (seq, len) {
                (Some(s), _) => write!(f, "{}", s),
                (None, Some(n)) => write!(f, "{}", n),
                (None, None) => Ok(()),
            }
        };
        match self {
            NaEdit::Substitution {
                reference,
                alternative,
            } => write!(f, "{}>{}", reference, alternative),
            NaEdit::SubstitutionNoRef { alternative } => write!(f, ">{}", alternative),
            NaEdit::Deletion { sequence, length } => {
                write!(f, "del")?;
                stated(f, sequence, length)
            }
            NaEdit::Duplication { sequence, length } => {
                write!(f, "dup")?;
                stated(f, sequence, length)
            }
            NaEdit::Insertion { sequence } => write!(f, "ins{}", sequence),
            NaEdit::Delins { sequence } => write!(f, "delins{}", sequence),
        }
    }
}
