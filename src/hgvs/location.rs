//! Coding-sequence (c.) positions
//!
//! `c.` coordinates count from the A of the start codon. Positions before it
//! are negative (`c.-15`), positions after the stop codon carry a `*`
//! (`c.*27`), and intronic positions are written as an exon boundary plus a
//! signed offset (`c.45+3`, `c.46-2`). There is no `c.0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in c. coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CdsPos {
    /// Base position in CDS (negative for 5' UTR, counted from the stop
    /// codon when `utr3` is set)
    pub base: i64,
    /// Intronic offset (+ downstream, - upstream of the exon boundary)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset: i64,
    /// Whether this is a 3' UTR position (uses * notation)
    #[serde(default)]
    pub utr3: bool,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl CdsPos {
    /// Create a simple exonic CDS position
    pub fn new(base: i64) -> Self {
        Self {
            base,
            offset: 0,
            utr3: false,
        }
    }

    /// Create a CDS position with intronic offset
    pub fn with_offset(base: i64, offset: i64) -> Self {
        Self {
            base,
            offset,
            utr3: false,
        }
    }

    /// Create a 3' UTR position
    pub fn utr3(base: i64) -> Self {
        Self {
            base,
            offset: 0,
            utr3: true,
        }
    }

    /// Same position with an intronic offset attached
    pub fn offset_by(self, offset: i64) -> Self {
        Self { offset, ..self }
    }

    pub fn is_intronic(&self) -> bool {
        self.offset != 0
    }

    /// Check if this position is in 5' UTR
    pub fn is_5utr(&self) -> bool {
        !self.utr3 && self.base < 1
    }

    /// Check if this position is in 3' UTR
    pub fn is_3utr(&self) -> bool {
        self.utr3
    }
}

impl fmt::Display for CdsPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.utr3 {
            write!(f, "*")?;
        }
        write!(f, "{}", self.base)?;
        match self.offset {
            0 => Ok(()),
            n if n > 0 => write!(f, "+{}", n),
            n => write!(f, "{}", n),
        }
    }
}
