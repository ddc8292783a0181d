//! Parsed c. variants

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hgvs::edit::NaEdit;
use crate::hgvs::location::CdsPos;

/// Reference sequence accession (e.g., `NM_000546.5`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Accession {
    /// Accession without version (e.g., "NM_000546")
    pub name: String,
    /// Version number (e.g., 5 in NM_000546.5)
    pub version: Option<u32>,
}

impl Accession {
    pub fn new(name: impl Into<String>, version: Option<u32>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Full accession string including version, if any
    pub fn full(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(v) => write!(f, "{}.{}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A c. position or `start_end` span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CdsInterval {
    pub start: CdsPos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<CdsPos>,
}

impl CdsInterval {
    pub fn point(pos: CdsPos) -> Self {
        Self {
            start: pos,
            end: None,
        }
    }

    pub fn span(start: CdsPos, end: CdsPos) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Last position of the interval (the start for a point)
    pub fn last(&self) -> CdsPos {
        self.end.unwrap_or(self.start)
    }
}

impl fmt::Display for CdsInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}_{}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

/// Coding DNA variant (c.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CdsVariant {
    pub accession: Accession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    pub interval: CdsInterval,
    pub edit: NaEdit,
}

impl fmt::Display for CdsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.accession)?;
        if let Some(gene) = &self.gene_symbol {
            write!(f, "({})", gene)?;
        }
        write!(f, ":c.{}{}", self.interval, self.edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hgvs::edit::InsertedSequence;

    #[test]
    fn test_accession_display() {
        assert_eq!(Accession::new("NM_000546", Some(5)).full(), "NM_000546.5");
        assert_eq!(Accession::new("NM_000546", None).to_string(), "NM_000546");
    }

    #[test]
    fn test_variant_display() {
        let v = CdsVariant {
            accession: Accession::new("NM_000546", Some(5)),
            gene_symbol: Some("TP53".to_string()),
            interval: CdsInterval::span(CdsPos::new(123), CdsPos::new(124)),
            edit: NaEdit::Insertion {
                sequence: InsertedSequence::Literal("ACGT".to_string()),
            },
        };
        assert_eq!(v.to_string(), "NM_000546.5(TP53):c.123_124insACGT");
        assert_eq!(v.interval.last(), CdsPos::new(124));
    }
}
